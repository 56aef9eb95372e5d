//! Product Icon Core - Shared types library.
//!
//! This crate provides common types used across all product icon components:
//! - `server` - Settings API, admin page, and storefront widget host
//! - `cli` - Command-line tools for migrations and direct settings access
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Settings record, wire shapes, icon positions, and type-safe IDs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
