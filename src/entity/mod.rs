//! Database entity models for the portfolio admin backend.
//!
//! This module contains the Sea-ORM entity definitions for the six tables the
//! backend owns: admin sessions and login attempts on the auth side, and the
//! series / image / content / settings collections on the content side.
//!
//! All models derive `Serialize`/`Deserialize` so the backup bundle can carry
//! rows verbatim.

/// Admin session rows: opaque capability tokens with an expiry.
pub mod session;

/// Append-only log of passphrase attempts, keyed by client address.
pub mod login_attempt;

/// Portfolio series: ordered top-level collections of images.
pub mod series;

/// Portfolio images, ordered within their owning series partition.
pub mod image;

/// Key/value rows backing editable site copy.
pub mod site_content;

/// Key/value rows backing site-wide settings.
pub mod site_setting;
