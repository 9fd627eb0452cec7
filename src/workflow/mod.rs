//! Screen workflows
//!
//! State machines behind the views. Everything here is free of UI code so
//! it can be driven from tests.

pub mod assign;
pub mod checkout;
pub mod job;
pub mod notification;
pub mod registration;
pub mod upload;
