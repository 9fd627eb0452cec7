//! Shared type definitions
//!
//! This module contains the marketplace entities, the injected client
//! configuration and the session shape kept in local storage.

pub mod config;
pub mod marketplace;
pub mod session;
