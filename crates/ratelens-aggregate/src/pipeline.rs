//! Load → aggregate → score → report for a single subject.

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use ratelens_core::{
    PolarityScores, RatelensError, Result, ReviewRecord, SentimentScorer, SubjectSentiment,
};

use crate::subject::SubjectSource;

/// Read the review records stored at `path`.
///
/// The file handle lives only for the duration of deserialization.
///
/// # Errors
///
/// Returns [`RatelensError::ResourceNotFound`] if the file cannot be opened or
/// read, and [`RatelensError::MalformedInput`] if it is not a JSON array of
/// records each carrying a string `rComments`.
pub fn load_reviews(path: &Path) -> Result<Vec<ReviewRecord>> {
    let parsed = {
        let file = File::open(path).map_err(|e| {
            tracing::debug!(path = %path.display(), error = %e, "cannot open review resource");
            RatelensError::ResourceNotFound(path.to_path_buf())
        })?;
        serde_json::from_reader::<_, Vec<ReviewRecord>>(BufReader::new(file))
    };

    parsed.map_err(|e| {
        if e.is_io() {
            RatelensError::ResourceNotFound(path.to_path_buf())
        } else {
            RatelensError::MalformedInput {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        }
    })
}

/// Join every comment, each preceded by a single space, in stored order.
///
/// # Examples
///
/// ```
/// use ratelens_aggregate::pipeline::aggregate_text;
/// use ratelens_core::ReviewRecord;
///
/// let records = vec![
///     ReviewRecord { comments: "good class".into() },
///     ReviewRecord { comments: "bad class".into() },
/// ];
/// assert_eq!(aggregate_text(&records), " good class bad class");
/// assert_eq!(aggregate_text(&[]), "");
/// ```
pub fn aggregate_text(records: &[ReviewRecord]) -> String {
    records.iter().fold(String::new(), |mut text, record| {
        text.push(' ');
        text.push_str(&record.comments);
        text
    })
}

/// Write one `"<label> <value>"` line per non-compound score, then the whole
/// set as a single JSON line.
pub fn write_diagnostics(scores: &PolarityScores, out: &mut dyn Write) -> Result<()> {
    for (label, value) in scores.entries().filter(|(label, _)| !label.is_compound()) {
        writeln!(out, "{label} {value:?}")?;
    }
    writeln!(out, "{}", scores.to_json_line()?)?;
    Ok(())
}

/// Score one subject's reviews.
///
/// Loads the records at `source.locator`, aggregates their comments, calls
/// `scorer` exactly once, writes the diagnostics to `out`, and returns the
/// subject name with its scores. Nothing is written when loading fails.
///
/// # Errors
///
/// Propagates [`load_reviews`] errors unchanged, and [`RatelensError::Io`] if
/// `out` rejects a write.
///
/// # Examples
///
/// ```no_run
/// use ratelens_aggregate::pipeline::produce_sentiment;
/// use ratelens_aggregate::subject::SubjectSource;
/// use ratelens_vader::{Lexicon, VaderAnalyzer};
/// use std::path::Path;
///
/// let lexicon = Lexicon::from_file(Path::new("vader_lexicon.txt")).unwrap();
/// let analyzer = VaderAnalyzer::new(lexicon);
/// let source = SubjectSource::from_identifier("ada.json");
/// let result = produce_sentiment(&source, &analyzer, &mut std::io::stdout()).unwrap();
/// assert_eq!(result.subject, "ada");
/// ```
pub fn produce_sentiment(
    source: &SubjectSource,
    scorer: &dyn SentimentScorer,
    out: &mut dyn Write,
) -> Result<SubjectSentiment> {
    let records = load_reviews(&source.locator)?;
    tracing::debug!(
        subject = %source.subject,
        path = %source.locator.display(),
        records = records.len(),
        "loaded reviews"
    );

    let text = aggregate_text(&records);
    let scores = scorer.polarity_scores(&text);
    tracing::debug!(subject = %source.subject, compound = scores.compound, "scored subject");

    write_diagnostics(&scores, out)?;

    Ok(SubjectSentiment {
        subject: source.subject.clone(),
        scores,
    })
}
