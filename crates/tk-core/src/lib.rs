//! # tk-core
//!
//! Core types, code grammar, and error types for the tk pipeline store.
//!
//! This crate provides the foundational types shared across all tk crates:
//! - Entity value objects for projects, taxonomies, assets, tasks and publishes
//! - Enums for entity kinds, code kinds and release channels
//! - The code grammar every human-readable code must satisfy
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod grammar;
