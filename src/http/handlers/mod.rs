//! Route handlers for the admin API.

pub mod auth;
pub mod backup;
pub mod content;
pub mod images;
pub mod series;
pub mod upload;
