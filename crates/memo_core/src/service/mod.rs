//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate group/memo store calls into use-case level APIs.
//! - Keep callers decoupled from storage details and error types.

pub mod dto;
pub mod memo_service;
