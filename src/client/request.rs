//! Form request sent to the notices endpoint.

use chrono::{Local, NaiveDate};

/// Authentication key the portal expects from its mobile clients.
pub const AUTH_KEY: &str = "vtku";
/// Portal command that returns notices.
pub const NOTICES_COMMAND: &str = "GetNotices";
/// User agent the portal requires; requests without it are rejected.
pub const KAMAR_USER_AGENT: &str = "KAMAR/ Linux/ Android/";
/// Content type of the request body.
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
/// Date format of the `Date` field (`dd/MM/yyyy`).
pub const REQUEST_DATE_FORMAT: &str = "%d/%m/%Y";

/// What: Day to request notices for.
///
/// Details:
/// - `Formatted` strings are sent verbatim and should already read `dd/MM/yyyy`.
/// - `Today` is resolved against the local clock when the request is built.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum NoticeDate {
    /// The current local day.
    #[default]
    Today,
    /// A date already formatted for the portal.
    Formatted(String),
    /// A calendar date, formatted as `dd/MM/yyyy` when sent.
    Date(NaiveDate),
}

impl NoticeDate {
    /// What: Render the date as the portal's `Date` field.
    ///
    /// Output:
    /// - `dd/MM/yyyy` text, or the caller's string unchanged for `Formatted`.
    #[must_use]
    pub fn resolve(&self) -> String {
        match self {
            Self::Today => Local::now()
                .date_naive()
                .format(REQUEST_DATE_FORMAT)
                .to_string(),
            Self::Formatted(date) => date.clone(),
            Self::Date(date) => date.format(REQUEST_DATE_FORMAT).to_string(),
        }
    }
}

impl From<&str> for NoticeDate {
    fn from(date: &str) -> Self {
        Self::Formatted(date.to_string())
    }
}

impl From<String> for NoticeDate {
    fn from(date: String) -> Self {
        Self::Formatted(date)
    }
}

impl From<NaiveDate> for NoticeDate {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl From<Option<NaiveDate>> for NoticeDate {
    fn from(date: Option<NaiveDate>) -> Self {
        date.map_or(Self::Today, Self::Date)
    }
}

/// What: The four form fields of one notices request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoticeRequest {
    /// Resolved `dd/MM/yyyy` date.
    date: String,
}

impl NoticeRequest {
    /// Resolve `date` and fix the request fields.
    #[must_use]
    pub fn new(date: &NoticeDate) -> Self {
        Self {
            date: date.resolve(),
        }
    }

    /// The resolved date string that will be sent.
    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    /// Form fields in the order the portal's own clients send them.
    #[must_use]
    pub fn form_fields(&self) -> [(&'static str, &str); 4] {
        [
            ("Key", AUTH_KEY),
            ("Command", NOTICES_COMMAND),
            ("ShowAll", "YES"),
            ("Date", self.date.as_str()),
        ]
    }

    /// What: Encode the fields as an `application/x-www-form-urlencoded` body.
    ///
    /// Output:
    /// - e.g. `Key=vtku&Command=GetNotices&ShowAll=YES&Date=05%2F03%2F2024`.
    #[must_use]
    pub fn encode(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.form_fields())
            .finish()
    }
}
