//! Portfolio content managed through the admin panel.
//!
//! This crate provides:
//! - Content rows (`SiteSettings`, `Skill`, `PortfolioProject`)
//! - Patch payloads, one per table, with per-table validation
//! - `Mutation`, the closed form an admin update request is resolved into
//! - The `ContentStore` trait and an in-memory implementation
//!
//! # Example
//!
//! ```
//! use folio_content::{ContentTable, Mutation};
//! use serde_json::json;
//!
//! let mutation = Mutation::resolve("skills", json!({ "name": "Rust" }), None)
//!     .expect("valid insert");
//! assert_eq!(mutation.table(), ContentTable::Skills);
//!
//! let err = Mutation::resolve("admin_users", json!({}), None).unwrap_err();
//! assert_eq!(err.to_string(), "Invalid table");
//! ```

pub mod error;
pub mod memory;
pub mod model;
pub mod mutation;
pub mod payload;
pub mod store;
pub mod table;

pub use error::ContentError;
pub use memory::MemoryContentStore;
pub use model::{DeleteAck, PortfolioProject, SiteSettings, Skill};
pub use mutation::{ContentPayload, DELETE_OPERATION, Mutation, MutationOutcome};
pub use payload::{ProjectPatch, SiteSettingsPatch, SkillPatch};
pub use store::ContentStore;
pub use table::ContentTable;
