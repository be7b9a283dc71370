//! Match agent library: client for the resume job-matching service

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod store;

pub use config::Config;
pub use error::{ApiFailure, MatchAgentError, Result};
pub use store::SessionStore;
