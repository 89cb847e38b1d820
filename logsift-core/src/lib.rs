//! Logsift Core
//!
//! Core types and abstractions for the Logsift log-pipeline system.
//!
//! This crate contains:
//! - Domain types: Core business entities (Pipeline, Stage, HistoryEntry, etc.)
//! - DTOs: Data transfer objects for inter-service communication

pub mod domain;
pub mod dto;
