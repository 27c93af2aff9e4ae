// src/lib.rs
//! Terminal client for the medical report assistant: uploads reports for
//! disease extraction and highlights the findings, searches for hospitals
//! and submits patient intake forms.

pub mod api;
pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod filesystem;
pub mod highlight;
pub mod intake;
pub mod logging;
pub mod tui;
pub mod ui;
pub mod utils;

pub use config::AppConfig;
pub use error::{Error, Result};
pub use highlight::{HighlightedText, Highlighter, Strategy};
