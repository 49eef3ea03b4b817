//! Core types, configuration, and error handling for ratelens.
//!
//! This crate provides the shared foundation used by the other ratelens crates:
//! - [`RatelensError`]: unified error type using `thiserror` and `miette`
//! - [`RatelensConfig`]: configuration loaded from `.ratelens.toml`
//! - [`SentimentScorer`]: the seam through which a scoring capability is injected
//! - Shared types: [`ReviewRecord`], [`PolarityScores`], [`ScoreLabel`],
//!   [`SubjectSentiment`], [`OutputFormat`]

mod config;
mod error;
mod scorer;
mod types;

pub use config::{BatchConfig, RatelensConfig, SentimentConfig};
pub use error::RatelensError;
pub use scorer::SentimentScorer;
pub use types::{OutputFormat, PolarityScores, ReviewRecord, ScoreLabel, SubjectSentiment};

/// A convenience `Result` type for ratelens operations.
pub type Result<T> = std::result::Result<T, RatelensError>;
