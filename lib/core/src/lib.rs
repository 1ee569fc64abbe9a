//! Core types shared by every folio crate.
//!
//! This crate provides the identifiers used across the admin functions and
//! the `Result` alias built on rootcause reports.

pub mod error;
pub mod id;

pub use error::Result;
pub use id::{DiscordId, ParseIdError, RecordId};
