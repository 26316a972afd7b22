//! # tally-core
//!
//! Core types and pure audit logic for Tally, the exchange audit and
//! compliance trail.
//!
//! This crate provides the foundational pieces shared across all Tally crates:
//! - `AuditLogEntry` and its actor, stream, severity and MFA sub-types
//! - The freeze checksum generator (salted SHA-256)
//! - The severity classifier for action tags
//! - The payload sanitizer applied before external payloads are persisted
//! - Action tag and ID prefix constants
//! - Cross-cutting error types
//! - Query response types (pages, statistics, integrity reports)
//! - Typed audit detail payloads

pub mod actions;
pub mod audit_detail;
pub mod checksum;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod responses;
pub mod sanitize;
pub mod severity;
pub mod timestamp;
