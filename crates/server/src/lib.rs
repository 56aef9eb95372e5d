//! Product icon server library.
//!
//! This crate provides the settings service as a library, allowing it to be
//! tested and reused (the CLI shares its store and migrations).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
