//! Copyright status resolution engine.
//!
//! This crate provides:
//! - The [`CopyrightRepository`] collaborator contract for rule and
//!   record storage (plus an in-memory implementation)
//! - Expiry date calculation (standard life+term and per-jurisdiction
//!   special rules)
//! - Tri-state status resolution with historical fallback cutoffs
//! - Multi-jurisdiction status aggregation
//! - The status updater that refreshes a work's derived fields
//!
//! The engine is synchronous and deterministic: every time-sensitive
//! call takes `today` as an explicit parameter (see
//! `lapsed_core::config::current_date` for the default source).

pub mod expiry;
pub mod queries;
pub mod repository;
pub mod status;
pub mod update;

pub use expiry::{apply_special_rules, calculate_expiry, calculate_standard_expiry};
pub use queries::{days_until_expiry, works_by_status_in_jurisdiction};
pub use repository::{CopyrightRepository, MemoryRepository};
pub use status::{calculate_multi_jurisdiction_status, determine_status, persist_status_map};
pub use update::update_work_status;
