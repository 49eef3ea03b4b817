//! Review aggregation and scoring.
//!
//! Loads a subject's review file, joins every comment into one text, scores
//! it with an injected [`SentimentScorer`](ratelens_core::SentimentScorer),
//! and reports the result. [`batch`] drives the pipeline over many
//! identifiers with an explicit failure policy.

pub mod batch;
pub mod pipeline;
pub mod subject;
