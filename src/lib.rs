// src/lib.rs
//! Resume builder: an edited-in-memory resume document, a deterministic
//! preview renderer, model-assisted writing flows and a capture-based
//! A4 PDF exporter, served over HTTP or driven from the CLI.

pub mod ai;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod photo;
pub mod preview;
pub mod types;
pub mod utils;
pub mod validation;
pub mod web;

pub use controller::ResumeSession;
pub use error::{BuilderError, Result};
pub use types::ResumeData;
pub use web::start_web_server;
