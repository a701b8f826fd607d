//! Normalized notice records handed to callers.

use chrono::NaiveDate;
use serde::Serialize;

/// What: A general school announcement.
///
/// Details:
/// - `level` is usually `All`, `Juniors` or `Seniors`, but schools may use their own codes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notice {
    /// Audience level as sent by the portal.
    pub level: String,
    /// Notice title.
    pub subject: String,
    /// Notice text.
    pub body: String,
    /// Staff member who posted the notice.
    pub teacher: String,
}

/// Audience classification of a notice level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Audience<'a> {
    /// Whole school.
    All,
    /// Junior school.
    Juniors,
    /// Senior school.
    Seniors,
    /// School-specific level code.
    Other(&'a str),
}

impl Notice {
    /// What: Classify `level` into a well-known audience.
    ///
    /// Output:
    /// - `Audience::Other` carrying the raw (trimmed) level for anything unrecognised.
    ///
    /// Details:
    /// - Matching is case-insensitive and ignores surrounding whitespace.
    #[must_use]
    pub fn audience(&self) -> Audience<'_> {
        let level = self.level.trim();
        if level.eq_ignore_ascii_case("all") {
            Audience::All
        } else if level.eq_ignore_ascii_case("juniors") {
            Audience::Juniors
        } else if level.eq_ignore_ascii_case("seniors") {
            Audience::Seniors
        } else {
            Audience::Other(level)
        }
    }
}

/// What: A notice announcing a meeting.
///
/// Details:
/// - `date` is absent when the portal sent an empty (or unreadable) `DateMeet`.
/// - `place` and `time` are free text and are passed through untouched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MeetingNotice {
    /// Shared notice fields.
    #[serde(flatten)]
    pub notice: Notice,
    /// Where the meeting takes place.
    pub place: String,
    /// Meeting day, if the portal supplied one.
    pub date: Option<NaiveDate>,
    /// Meeting time as free text (e.g. "Interval", "12:30pm").
    pub time: String,
}

/// Either kind of notice, as stored in [`NoticeCollection::all`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnyNotice {
    /// A general notice.
    General(Notice),
    /// A meeting notice.
    Meeting(MeetingNotice),
}

impl AnyNotice {
    /// Shared notice fields of either variant.
    #[must_use]
    pub const fn notice(&self) -> &Notice {
        match self {
            Self::General(notice) => notice,
            Self::Meeting(meeting) => &meeting.notice,
        }
    }

    /// The meeting details, when this is a meeting notice.
    #[must_use]
    pub const fn as_meeting(&self) -> Option<&MeetingNotice> {
        match self {
            Self::General(_) => None,
            Self::Meeting(meeting) => Some(meeting),
        }
    }
}

/// What: Result of one retrieval.
///
/// Details:
/// - `all` holds every general notice followed by every meeting notice, each in portal order.
/// - Fields are read through accessors and the only constructor is [`NoticeCollection::new`],
///   so `all` cannot drift from the two lists.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NoticeCollection {
    /// General notices in portal order.
    general: Vec<Notice>,
    /// Meeting notices in portal order.
    meetings: Vec<MeetingNotice>,
    /// General notices first, then meeting notices.
    all: Vec<AnyNotice>,
}

impl NoticeCollection {
    /// What: Assemble a collection and derive the combined `all` list.
    ///
    /// Inputs:
    /// - `general`: General notices in portal order.
    /// - `meetings`: Meeting notices in portal order.
    ///
    /// Output:
    /// - Collection whose `all` is `general` followed by `meetings`.
    #[must_use]
    pub fn new(general: Vec<Notice>, meetings: Vec<MeetingNotice>) -> Self {
        let all = general
            .iter()
            .cloned()
            .map(AnyNotice::General)
            .chain(meetings.iter().cloned().map(AnyNotice::Meeting))
            .collect();
        Self {
            general,
            meetings,
            all,
        }
    }

    /// General notices in portal order.
    #[must_use]
    pub fn general(&self) -> &[Notice] {
        &self.general
    }

    /// Meeting notices in portal order.
    #[must_use]
    pub fn meetings(&self) -> &[MeetingNotice] {
        &self.meetings
    }

    /// General notices first, then meeting notices.
    #[must_use]
    pub fn all(&self) -> &[AnyNotice] {
        &self.all
    }

    /// What: Take the lists out of the collection.
    ///
    /// Output:
    /// - `(general, meetings)`; the combined list can be rebuilt with [`NoticeCollection::new`].
    #[must_use]
    pub fn into_parts(self) -> (Vec<Notice>, Vec<MeetingNotice>) {
        (self.general, self.meetings)
    }

    /// Number of notices of both kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.all.len()
    }

    /// `true` when the portal returned no usable notices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notice(level: &str, subject: &str) -> Notice {
        Notice {
            level: level.to_string(),
            subject: subject.to_string(),
            body: "Body".to_string(),
            teacher: "ABC".to_string(),
        }
    }

    #[test]
    /// What: `all` lists general notices before meetings, preserving order within each.
    ///
    /// Inputs:
    /// - Two general notices and one meeting notice.
    ///
    /// Output:
    /// - `all` has three entries in the order general, general, meeting.
    fn collection_orders_general_before_meetings() {
        let meeting = MeetingNotice {
            notice: notice("All", "Meeting"),
            place: "Library".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 5),
            time: "Lunch".to_string(),
        };
        let collection = NoticeCollection::new(
            vec![notice("All", "First"), notice("Seniors", "Second")],
            vec![meeting.clone()],
        );
        assert_eq!(collection.len(), 3);
        assert_eq!(collection.all()[0].notice().subject, "First");
        assert_eq!(collection.all()[1].notice().subject, "Second");
        assert_eq!(collection.all()[2].as_meeting(), Some(&meeting));
        assert!(collection.all()[0].as_meeting().is_none());
    }

    #[test]
    fn empty_collection_reports_empty() {
        let collection = NoticeCollection::new(Vec::new(), Vec::new());
        assert!(collection.is_empty());
        assert_eq!(collection, NoticeCollection::default());
    }

    #[test]
    /// What: Splitting a collection and rebuilding it reproduces the same `all` list.
    ///
    /// Inputs:
    /// - Collection with one general and one meeting notice.
    ///
    /// Output:
    /// - `into_parts` returns both lists; `new` on them equals the original.
    fn parts_rebuild_an_equal_collection() {
        let meeting = MeetingNotice {
            notice: notice("Juniors", "Club"),
            place: "Gym".to_string(),
            date: None,
            time: "3pm".to_string(),
        };
        let collection = NoticeCollection::new(vec![notice("All", "News")], vec![meeting]);
        let (general, meetings) = collection.clone().into_parts();
        assert_eq!(general, collection.general());
        assert_eq!(meetings, collection.meetings());
        assert_eq!(NoticeCollection::new(general, meetings), collection);
    }

    #[test]
    fn audience_matches_known_levels_case_insensitively() {
        assert_eq!(notice("All", "x").audience(), Audience::All);
        assert_eq!(notice(" juniors ", "x").audience(), Audience::Juniors);
        assert_eq!(notice("SENIORS", "x").audience(), Audience::Seniors);
        assert_eq!(notice("Yr 13", "x").audience(), Audience::Other("Yr 13"));
    }

    #[test]
    /// What: Meeting notices serialize flat with an ISO date or null.
    ///
    /// Inputs:
    /// - One dated and one undated meeting.
    ///
    /// Output:
    /// - JSON objects carry `subject` at top level and `date` as `"2024-03-05"` or `null`.
    fn meeting_serializes_flat_with_iso_date() {
        let dated = MeetingNotice {
            notice: notice("All", "Dated"),
            place: "Hall".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 5),
            time: "9am".to_string(),
        };
        let undated = MeetingNotice {
            date: None,
            ..dated.clone()
        };
        let json = serde_json::to_value(&dated).expect("serialize dated meeting");
        assert_eq!(json["subject"], "Dated");
        assert_eq!(json["date"], "2024-03-05");
        let json = serde_json::to_value(&undated).expect("serialize undated meeting");
        assert!(json["date"].is_null());
    }
}
