//! Lexicon-based sentiment scoring in the VADER style.
//!
//! Provides the default [`SentimentScorer`](ratelens_core::SentimentScorer):
//! a [`Lexicon`] of token valences and a [`VaderAnalyzer`] that applies the
//! VADER heuristics (boosters, negation, capitalization, contrast, and
//! punctuation emphasis) on top of it.

pub mod analyzer;
pub mod lexicon;

pub use analyzer::VaderAnalyzer;
pub use lexicon::Lexicon;
