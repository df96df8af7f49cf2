//! gh-daily-summary: fetch, aggregate and publish a daily markdown digest of
//! one GitHub account's activity.
//!
//! The core (aggregate → adjust → render) is a pure, deterministic pipeline
//! over the raw contribution dataset; the fetch boundary, configuration and
//! file writes are thin collaborators around it.

pub mod adjust;
pub mod aggregate;
pub mod cli;
pub mod config;
pub mod digest;
pub mod error;
pub mod github;
pub mod publish;
pub mod render;
pub mod window;
