//! Library entry for kamar-notices: a client for the notices endpoint of KAMAR school portals.
//!
//! ```no_run
//! # async fn demo() -> kamar_notices::Result<()> {
//! let client = kamar_notices::NoticeClient::new("portal.example.school.nz", true);
//! let notices = client.retrieve_today().await?;
//! for notice in notices.all() {
//!     println!("{}: {}", notice.notice().subject, notice.notice().teacher);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod parse;

pub use client::{NoticeClient, NoticeDate};
pub use error::{NoticeError, Result};
pub use model::{AnyNotice, Audience, MeetingNotice, Notice, NoticeCollection};
pub use parse::parse_notices;
