//! Memo domain model.
//!
//! # Responsibility
//! - Define the group/memo records shared by stores and the service.
//!
//! # Invariants
//! - Group and memo ids are generated by storage and never reassigned.
//! - Every group has exactly one owner.

pub mod memo;
