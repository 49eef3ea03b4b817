use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A single review as stored in a subject's review file.
///
/// Only the free-text comment is required; any other fields in the record
/// are ignored.
///
/// # Examples
///
/// ```
/// use ratelens_core::ReviewRecord;
///
/// let record: ReviewRecord =
///     serde_json::from_str(r#"{"rComments": "great lectures", "rClarity": 5}"#).unwrap();
/// assert_eq!(record.comments, "great lectures");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    /// Free-text comment body.
    #[serde(rename = "rComments")]
    pub comments: String,
}

/// Label of one entry in a [`PolarityScores`] set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreLabel {
    /// Proportion of negative valence.
    Neg,
    /// Proportion of neutral tokens.
    Neu,
    /// Proportion of positive valence.
    Pos,
    /// Normalized summary score in `[-1, 1]`.
    Compound,
}

impl ScoreLabel {
    /// All labels in reporting order.
    pub const ALL: [ScoreLabel; 4] = [
        ScoreLabel::Neg,
        ScoreLabel::Neu,
        ScoreLabel::Pos,
        ScoreLabel::Compound,
    ];

    /// Returns `true` for the single summary label.
    pub fn is_compound(self) -> bool {
        self == ScoreLabel::Compound
    }
}

impl fmt::Display for ScoreLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreLabel::Neg => write!(f, "neg"),
            ScoreLabel::Neu => write!(f, "neu"),
            ScoreLabel::Pos => write!(f, "pos"),
            ScoreLabel::Compound => write!(f, "compound"),
        }
    }
}

/// Sentiment scores for one piece of text.
///
/// Serializes with keys in reporting order: `neg`, `neu`, `pos`, `compound`.
///
/// # Examples
///
/// ```
/// use ratelens_core::{PolarityScores, ScoreLabel};
///
/// let scores = PolarityScores { neg: 0.041, neu: 0.671, pos: 0.288, compound: 0.9 };
/// assert_eq!(scores.get(ScoreLabel::Pos), 0.288);
/// assert_eq!(
///     scores.to_json_line().unwrap(),
///     r#"{"neg":0.041,"neu":0.671,"pos":0.288,"compound":0.9}"#
/// );
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarityScores {
    /// Negative proportion.
    pub neg: f64,
    /// Neutral proportion.
    pub neu: f64,
    /// Positive proportion.
    pub pos: f64,
    /// Normalized compound score.
    pub compound: f64,
}

impl PolarityScores {
    /// Value for a single label.
    pub fn get(&self, label: ScoreLabel) -> f64 {
        match label {
            ScoreLabel::Neg => self.neg,
            ScoreLabel::Neu => self.neu,
            ScoreLabel::Pos => self.pos,
            ScoreLabel::Compound => self.compound,
        }
    }

    /// Label/value pairs in reporting order.
    pub fn entries(&self) -> impl Iterator<Item = (ScoreLabel, f64)> + '_ {
        ScoreLabel::ALL.into_iter().map(|label| (label, self.get(label)))
    }

    /// The whole set rendered as one compact JSON object.
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// The scored outcome for one subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectSentiment {
    /// Display name derived from the identifier.
    pub subject: String,
    /// Scores for the subject's aggregated review text.
    pub scores: PolarityScores,
}

/// Output format for CLI subcommands.
///
/// Implements [`FromStr`] so it can be used directly with `clap` argument parsing.
///
/// # Examples
///
/// ```
/// use ratelens_core::OutputFormat;
///
/// let fmt: OutputFormat = "json".parse().unwrap();
/// assert_eq!(fmt, OutputFormat::Json);
///
/// let fmt: OutputFormat = "md".parse().unwrap();
/// assert_eq!(fmt, OutputFormat::Markdown);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Per-label diagnostic lines followed by the full score set.
    #[default]
    Text,
    /// Machine-readable JSON with camelCase keys.
    Json,
    /// Markdown table.
    Markdown,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
