//! LensMarket Library
//!
//! Core library for the LensMarket desktop client: marketplace API,
//! local persistence, the booking workflows and their Dioxus screens.

pub mod api;
pub mod app;
pub mod storage;
pub mod types;
pub mod ui;
pub mod workflow;
