//! Reusable UI pieces

pub mod toast;
