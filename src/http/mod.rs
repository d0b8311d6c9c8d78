//! Admin HTTP surface.
//!
//! A single axum router: the unlock/logout pair is open, everything else sits
//! behind the session-cookie guard. Handlers stay thin — they parse input,
//! call into the authenticator or content store, and shape JSON.

pub mod guard;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::router;
pub use state::AppState;

use sea_orm::prelude::DateTimeWithTimeZone;
use time::OffsetDateTime;

// Bridge from the entities' chrono timestamps to the cookie crate's `time`
// type, so cookie expiry stays synchronized with the session row.
pub(crate) fn to_offset_datetime(dt: DateTimeWithTimeZone) -> OffsetDateTime {
    OffsetDateTime::from_unix_timestamp(dt.timestamp()).unwrap_or(OffsetDateTime::UNIX_EPOCH)
}
