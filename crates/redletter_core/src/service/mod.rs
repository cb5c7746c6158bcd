//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate parse/validate/persist into use-case level APIs.
//! - Keep boundary layers (CLI, future HTTP adapters) decoupled from
//!   storage details.

pub mod event_service;
