//! Text and JSON rendering of notice collections.

use std::fmt::Write as _;

use kamar_notices::{MeetingNotice, Notice, NoticeCollection};

/// Which notice lists to print.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// General notices followed by meetings.
    All,
    /// General notices only.
    General,
    /// Meeting notices only.
    Meetings,
}

impl Selection {
    /// `true` when general notices are printed.
    const fn general(self) -> bool {
        matches!(self, Self::All | Self::General)
    }

    /// `true` when meeting notices are printed.
    const fn meetings(self) -> bool {
        matches!(self, Self::All | Self::Meetings)
    }
}

/// Heading line shared by both notice kinds.
fn heading(out: &mut String, notice: &Notice) {
    let _ = writeln!(out, "[{}] {} - {}", notice.level, notice.subject, notice.teacher);
}

/// Indented notice body, one output line per body line.
fn body(out: &mut String, notice: &Notice) {
    for line in notice.body.lines() {
        let _ = writeln!(out, "    {line}");
    }
}

/// Meeting details line; a missing date is printed as `date tbc`.
fn meeting_details(out: &mut String, meeting: &MeetingNotice) {
    let date = meeting
        .date
        .map_or_else(|| "date tbc".to_string(), |d| d.format("%a %d %b %Y").to_string());
    let _ = writeln!(
        out,
        "    When: {date} {}    Where: {}",
        meeting.time, meeting.place
    );
}

/// What: Render the selected notices as plain text.
///
/// Inputs:
/// - `notices`: Retrieved collection.
/// - `selection`: Lists to include.
///
/// Output:
/// - Sectioned text, or a single "No notices." line when nothing is selected.
pub fn render_text(notices: &NoticeCollection, selection: Selection) -> String {
    let mut out = String::new();
    if selection.general() && !notices.general().is_empty() {
        let _ = writeln!(out, "General notices ({})", notices.general().len());
        for notice in notices.general() {
            out.push('\n');
            heading(&mut out, notice);
            body(&mut out, notice);
        }
    }
    if selection.meetings() && !notices.meetings().is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = writeln!(out, "Meetings ({})", notices.meetings().len());
        for meeting in notices.meetings() {
            out.push('\n');
            heading(&mut out, &meeting.notice);
            meeting_details(&mut out, meeting);
            body(&mut out, &meeting.notice);
        }
    }
    if out.is_empty() {
        out.push_str("No notices.\n");
    }
    out
}

/// What: Render the selected notices as pretty-printed JSON.
///
/// Output:
/// - The whole collection for `All`; otherwise a bare array of the selected kind.
///
/// # Errors
/// - Serialization failures from `serde_json`.
pub fn render_json(notices: &NoticeCollection, selection: Selection) -> serde_json::Result<String> {
    let value = match selection {
        Selection::All => serde_json::to_value(notices)?,
        Selection::General => serde_json::to_value(notices.general())?,
        Selection::Meetings => serde_json::to_value(notices.meetings())?,
    };
    serde_json::to_string_pretty(&value)
}
