//! Mapping of a `NoticesResults` document into normalized notices.

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use super::xml::{XmlElement, parse_document};
use crate::error::{NoticeError, Result};
use crate::model::{MeetingNotice, Notice, NoticeCollection};

/// Root element of a notices response.
const RESULTS_TAG: &str = "NoticesResults";
/// Child of the root carrying an upstream failure message.
const ERROR_TAG: &str = "Error";
/// Format of `DateMeet` values.
const MEETING_DATE_FORMAT: &str = "%Y-%m-%d";

/// What: Undo the portal's double-encoded ampersands.
///
/// Inputs:
/// - `body`: Raw response body.
///
/// Output:
/// - Body with every literal `&amp;` replaced by `&`.
#[must_use]
pub fn sanitize_body(body: &str) -> String {
    body.replace("&amp;", "&")
}

/// Text of the named child, if the child exists (an empty element yields `""`).
fn field(candidate: &XmlElement, name: &str) -> Option<String> {
    candidate.child(name).map(|c| c.text().to_string())
}

/// What: Map a `General` element into a [`Notice`].
///
/// Output:
/// - `None` unless `Level`, `Subject`, `Body` and `Teacher` are all present.
fn general_notice(candidate: &XmlElement) -> Option<Notice> {
    Some(Notice {
        level: field(candidate, "Level")?,
        subject: field(candidate, "Subject")?,
        body: field(candidate, "Body")?,
        teacher: field(candidate, "Teacher")?,
    })
}

/// What: Interpret a `DateMeet` value.
///
/// Output:
/// - `None` for empty text or a value not in `yyyy-MM-dd` form.
fn meeting_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(raw, MEETING_DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(e) => {
            warn!(date = raw, error = %e, "unreadable meeting date, leaving it empty");
            None
        }
    }
}

/// What: Map a `Meeting` element into a [`MeetingNotice`].
///
/// Output:
/// - `None` unless all seven fields (`Level`, `Subject`, `Body`, `Teacher`,
///   `DateMeet`, `PlaceMeet`, `TimeMeet`) are present.
fn meeting_notice(candidate: &XmlElement) -> Option<MeetingNotice> {
    let notice = general_notice(candidate)?;
    let date = field(candidate, "DateMeet")?;
    let place = field(candidate, "PlaceMeet")?;
    let time = field(candidate, "TimeMeet")?;
    Some(MeetingNotice {
        notice,
        place,
        date: meeting_date(&date),
        time,
    })
}

/// What: Collect every well-formed record under `container/item`.
///
/// Inputs:
/// - `results`: The `NoticesResults` element.
/// - `container`, `item`: Wrapper and record tag names.
/// - `map`: Record mapper returning `None` for incomplete records.
///
/// Details:
/// - A missing container or an empty one yields an empty list.
/// - Incomplete records are dropped and logged at debug level.
fn collect_records<T>(
    results: &XmlElement,
    container: &str,
    item: &str,
    map: fn(&XmlElement) -> Option<T>,
) -> Vec<T> {
    results
        .child(container)
        .into_iter()
        .flat_map(|c| c.children_named(item))
        .enumerate()
        .filter_map(|(index, candidate)| {
            let record = map(candidate);
            if record.is_none() {
                debug!(kind = item, index, "dropping notice with missing fields");
            }
            record
        })
        .collect()
}

/// What: Validate and normalize a notices response body.
///
/// Inputs:
/// - `body`: Raw response text from the portal.
///
/// Output:
/// - `Ok(NoticeCollection)` with general notices, meeting notices and both combined.
///
/// # Errors
/// - `NoticeError::MalformedXml` when the sanitized body is not well-formed XML
/// - `NoticeError::MissingRoot` when the document root is not `NoticesResults`
/// - `NoticeError::Upstream` when `NoticesResults` carries an `Error` element
///
/// Details:
/// - `&amp;` is collapsed to `&` before parsing (see [`sanitize_body`]).
/// - `GeneralNotices/General` and `MeetingNotices/Meeting` are optional and may hold
///   one or many records; records lacking a required field are skipped.
pub fn parse_notices(body: &str) -> Result<NoticeCollection> {
    let document = parse_document(&sanitize_body(body))?;
    if document.name() != RESULTS_TAG {
        warn!(root = document.name(), "response root is not {RESULTS_TAG}");
        return Err(NoticeError::MissingRoot);
    }
    if let Some(error) = document.child(ERROR_TAG) {
        warn!(error = error.text(), "portal reported an error");
        return Err(NoticeError::Upstream(error.text().to_string()));
    }

    let general = collect_records(&document, "GeneralNotices", "General", general_notice);
    let meetings = collect_records(&document, "MeetingNotices", "Meeting", meeting_notice);
    info!(
        general = general.len(),
        meetings = meetings.len(),
        "parsed notices response"
    );
    Ok(NoticeCollection::new(general, meetings))
}
