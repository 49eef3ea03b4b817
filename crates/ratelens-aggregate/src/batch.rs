//! Drive the pipeline over a list of identifiers.

use std::io::Write;

use ratelens_core::{BatchConfig, Result, SentimentScorer, SubjectSentiment};
use serde::Serialize;

use crate::pipeline::produce_sentiment;
use crate::subject::SubjectSource;

/// What to do when one identifier fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Abort the batch and return the first error.
    #[default]
    FailFast,
    /// Record the failure and continue with the next identifier.
    KeepGoing,
}

impl From<&BatchConfig> for FailurePolicy {
    fn from(config: &BatchConfig) -> Self {
        if config.fail_fast {
            FailurePolicy::FailFast
        } else {
            FailurePolicy::KeepGoing
        }
    }
}

/// An identifier that could not be scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectFailure {
    /// Identifier as given (after glob expansion).
    pub identifier: String,
    /// Rendered error.
    pub error: String,
}

/// Outcome of a batch run, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Scored subjects.
    pub results: Vec<SubjectSentiment>,
    /// Identifiers skipped under [`FailurePolicy::KeepGoing`].
    pub failures: Vec<SubjectFailure>,
}

impl BatchReport {
    /// Whether every identifier was scored.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Render as a Markdown table.
    ///
    /// # Examples
    ///
    /// ```
    /// use ratelens_aggregate::batch::BatchReport;
    ///
    /// let md = BatchReport::default().to_markdown();
    /// assert!(md.starts_with("# Sentiment Report"));
    /// ```
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Sentiment Report\n\n");

        if !self.results.is_empty() {
            out.push_str("| Subject | neg | neu | pos | compound |\n");
            out.push_str("|---------|-----|-----|-----|----------|\n");
            for r in &self.results {
                out.push_str(&format!(
                    "| {} | {:.3} | {:.3} | {:.3} | {:.4} |\n",
                    r.subject, r.scores.neg, r.scores.neu, r.scores.pos, r.scores.compound,
                ));
            }
            out.push('\n');
        }

        if !self.failures.is_empty() {
            out.push_str("**Failures:**\n\n");
            for f in &self.failures {
                out.push_str(&format!("- `{}`: {}\n", f.identifier, f.error));
            }
            out.push('\n');
        }

        out.push_str(&format!(
            "**Summary:** {} scored, {} failed\n",
            self.results.len(),
            self.failures.len()
        ));
        out
    }
}

fn has_glob_meta(identifier: &str) -> bool {
    identifier.contains(['*', '?', '['])
}

/// Expand glob patterns among `identifiers`, preserving argument order.
///
/// Matches of one pattern are sorted. A pattern that is invalid or matches
/// nothing is kept literally so it fails later as a missing resource.
pub fn expand_identifiers(identifiers: &[String]) -> Vec<String> {
    let mut expanded = Vec::with_capacity(identifiers.len());
    for identifier in identifiers {
        if !has_glob_meta(identifier) {
            expanded.push(identifier.clone());
            continue;
        }
        let mut matches: Vec<String> = match glob::glob(identifier) {
            Ok(paths) => paths
                .filter_map(|entry| entry.ok())
                .map(|path| path.to_string_lossy().into_owned())
                .collect(),
            Err(e) => {
                tracing::debug!(pattern = %identifier, error = %e, "invalid glob pattern");
                Vec::new()
            }
        };
        if matches.is_empty() {
            expanded.push(identifier.clone());
        } else {
            matches.sort();
            expanded.extend(matches);
        }
    }
    expanded
}

/// Score every identifier in order, writing each subject's diagnostics to
/// `out` before starting the next.
///
/// # Errors
///
/// Under [`FailurePolicy::FailFast`] the first error is returned and later
/// identifiers are not touched. Under [`FailurePolicy::KeepGoing`] missing or
/// malformed resources are recorded in [`BatchReport::failures`]; any other
/// error (such as a failed write to `out`) still aborts.
pub fn run_batch(
    identifiers: &[String],
    scorer: &dyn SentimentScorer,
    policy: FailurePolicy,
    out: &mut dyn Write,
) -> Result<BatchReport> {
    let mut report = BatchReport::default();

    for identifier in expand_identifiers(identifiers) {
        let source = SubjectSource::from_identifier(&identifier);
        match produce_sentiment(&source, scorer, out) {
            Ok(result) => report.results.push(result),
            Err(e) if policy == FailurePolicy::KeepGoing && e.is_input_error() => {
                tracing::warn!(identifier = %identifier, error = %e, "skipping subject");
                report.failures.push(SubjectFailure {
                    identifier,
                    error: e.to_string(),
                });
            }
            Err(e) => return Err(e),
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use ratelens_core::{PolarityScores, RatelensError};

    use super::*;

    /// Scores by comment length so subjects are distinguishable.
    struct LengthScorer;

    impl SentimentScorer for LengthScorer {
        fn polarity_scores(&self, text: &str) -> PolarityScores {
            PolarityScores {
                neg: 0.0,
                neu: 1.0,
                pos: 0.0,
                compound: text.len() as f64,
            }
        }
    }

    fn write(dir: &Path, name: &str, content: &str) -> String {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn policy_follows_config() {
        assert_eq!(
            FailurePolicy::from(&BatchConfig::default()),
            FailurePolicy::FailFast
        );
        let config = BatchConfig { fail_fast: false };
        assert_eq!(FailurePolicy::from(&config), FailurePolicy::KeepGoing);
    }

    #[test]
    fn results_keep_argument_order() {
        let dir = tempfile::tempdir().unwrap();
        let b = write(dir.path(), "b.json", r#"[{"rComments": "bb"}]"#);
        let a = write(dir.path(), "a.json", r#"[{"rComments": "a"}]"#);
        let mut out = Vec::new();

        let report =
            run_batch(&[b.clone(), a.clone()], &LengthScorer, FailurePolicy::FailFast, &mut out)
                .unwrap();

        let subjects: Vec<&str> = report.results.iter().map(|r| r.subject.as_str()).collect();
        assert_eq!(subjects, vec![&b[..b.len() - 5], &a[..a.len() - 5]]);
        assert_eq!(report.results[0].scores.compound, 3.0);
        assert_eq!(report.results[1].scores.compound, 2.0);

        let text = String::from_utf8(out).unwrap();
        let json_lines: Vec<&str> = text.lines().filter(|l| l.starts_with('{')).collect();
        assert_eq!(json_lines.len(), 2);
        assert!(json_lines[0].contains("\"compound\":3.0"));
        assert!(report.is_clean());
    }

    #[test]
    fn fail_fast_stops_at_first_error() {
        let dir = tempfile::tempdir().unwrap();
        let good = write(dir.path(), "good.json", r#"[{"rComments": "x"}]"#);
        let missing = dir.path().join("missing.json").to_string_lossy().into_owned();
        let mut out = Vec::new();

        let err = run_batch(
            &[missing, good],
            &LengthScorer,
            FailurePolicy::FailFast,
            &mut out,
        )
        .unwrap_err();

        assert!(matches!(err, RatelensError::ResourceNotFound(_)));
        assert!(out.is_empty(), "later identifiers must not run");
    }

    #[test]
    fn keep_going_records_failures() {
        let dir = tempfile::tempdir().unwrap();
        let good = write(dir.path(), "good.json", r#"[{"rComments": "x"}]"#);
        let broken = write(dir.path(), "broken.json", r#"[{"text": "x"}]"#);
        let missing = dir.path().join("missing.json").to_string_lossy().into_owned();
        let mut out = Vec::new();

        let report = run_batch(
            &[missing.clone(), broken.clone(), good],
            &LengthScorer,
            FailurePolicy::KeepGoing,
            &mut out,
        )
        .unwrap();

        assert_eq!(report.results.len(), 1);
        assert_eq!(report.failures.len(), 2);
        assert_eq!(report.failures[0].identifier, missing);
        assert!(report.failures[0].error.contains("not found"));
        assert_eq!(report.failures[1].identifier, broken);
        assert!(report.failures[1].error.contains("malformed"));
        assert!(!report.is_clean());
    }

    #[test]
    fn glob_patterns_expand_sorted() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "zed.json", "[]");
        write(dir.path(), "amy.json", "[]");
        write(dir.path(), "notes.txt", "");
        let pattern = dir.path().join("*.json").to_string_lossy().into_owned();

        let expanded = expand_identifiers(&[pattern]);

        assert_eq!(expanded.len(), 2);
        assert!(expanded[0].ends_with("amy.json"));
        assert!(expanded[1].ends_with("zed.json"));
    }

    #[test]
    fn unmatched_pattern_stays_literal() {
        let dir = tempfile::tempdir().unwrap();
        let pattern = dir.path().join("*.json").to_string_lossy().into_owned();
        assert_eq!(expand_identifiers(&[pattern.clone()]), vec![pattern]);
        assert_eq!(
            expand_identifiers(&["plain.json".to_string()]),
            vec!["plain.json".to_string()]
        );
    }

    #[test]
    fn markdown_lists_results_and_failures() {
        let report = BatchReport {
            results: vec![SubjectSentiment {
                subject: "ada".into(),
                scores: PolarityScores {
                    neg: 0.041,
                    neu: 0.671,
                    pos: 0.288,
                    compound: 0.9,
                },
            }],
            failures: vec![SubjectFailure {
                identifier: "ghost.json".into(),
                error: "review resource not found: ghost.json".into(),
            }],
        };
        let md = report.to_markdown();
        assert!(md.contains("| ada | 0.041 | 0.671 | 0.288 | 0.9000 |"));
        assert!(md.contains("- `ghost.json`"));
        assert!(md.contains("1 scored, 1 failed"));
    }

    #[test]
    fn report_serializes_camel_case() {
        let json = serde_json::to_value(BatchReport::default()).unwrap();
        assert!(json["results"].as_array().unwrap().is_empty());
        assert!(json["failures"].as_array().unwrap().is_empty());
    }
}
