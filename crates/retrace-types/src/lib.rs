//! Shared type definitions for the Retrace alias tracker.
//!
//! This crate is the single source of truth for the data model used across
//! the Retrace workspace: stable identities, alias histories, and pending
//! observations awaiting resolution.
//!
//! # Modules
//!
//! - [`record`] -- Stable identities and their ordered alias histories
//! - [`observation`] -- Sightings queued for resolution, name normalization

pub mod observation;
pub mod record;

// Re-export all public types at crate root for convenience.
pub use observation::{PendingObservation, capitalize_name_part};
pub use record::{AliasEntry, AliasList, IdentityRecord, StableId};
