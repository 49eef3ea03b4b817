//! Token valence lexicon in the VADER tab-separated layout.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ratelens_core::RatelensError;

/// File name of the published VADER lexicon.
pub const DEFAULT_FILE_NAME: &str = "vader_lexicon.txt";

/// Mapping from lowercase token to mean valence.
///
/// # Examples
///
/// ```
/// use ratelens_vader::Lexicon;
///
/// let lexicon = Lexicon::parse("good\t1.9\t0.9\nbad\t-2.5\n").unwrap();
/// assert_eq!(lexicon.get("GOOD"), Some(1.9));
/// assert!(lexicon.contains("bad"));
/// assert_eq!(lexicon.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    valences: HashMap<String, f64>,
}

impl Lexicon {
    /// Parse lexicon text.
    ///
    /// Each line is `token<TAB>mean`, optionally followed by more tab-separated
    /// columns (standard deviation, raw ratings) which are ignored. Blank lines
    /// are skipped. There is no comment syntax: emoticons such as `#-)` are
    /// ordinary tokens.
    ///
    /// # Errors
    ///
    /// Returns [`RatelensError::Lexicon`] naming the first line that has no
    /// token or no numeric mean.
    pub fn parse(text: &str) -> Result<Self, RatelensError> {
        let mut valences = HashMap::new();

        for (idx, line) in text.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }

            let mut columns = line.split('\t');
            let token = columns.next().unwrap_or_default().trim();
            if token.is_empty() {
                return Err(RatelensError::Lexicon {
                    line: idx + 1,
                    message: "empty token".into(),
                });
            }
            let mean = columns
                .next()
                .ok_or_else(|| RatelensError::Lexicon {
                    line: idx + 1,
                    message: format!("missing valence for '{token}'"),
                })?
                .trim()
                .parse::<f64>()
                .map_err(|e| RatelensError::Lexicon {
                    line: idx + 1,
                    message: format!("invalid valence for '{token}': {e}"),
                })?;

            valences.insert(token.to_lowercase(), mean);
        }

        Ok(Self { valences })
    }

    /// Read and parse a lexicon file.
    ///
    /// # Errors
    ///
    /// Returns [`RatelensError::Io`] if the file cannot be read, or
    /// [`RatelensError::Lexicon`] if a line is malformed.
    pub fn from_file(path: &Path) -> Result<Self, RatelensError> {
        let text = std::fs::read_to_string(path)?;
        let lexicon = Self::parse(&text)?;
        tracing::debug!(path = %path.display(), entries = lexicon.len(), "loaded lexicon");
        Ok(lexicon)
    }

    /// Places a lexicon is looked for when none is configured, in order: the
    /// working directory, then `sentiment/vader_lexicon/` under each
    /// `NLTK_DATA` entry and under `~/nltk_data`.
    pub fn default_locations() -> Vec<PathBuf> {
        let mut data_dirs: Vec<PathBuf> = std::env::var_os("NLTK_DATA")
            .map(|value| std::env::split_paths(&value).collect())
            .unwrap_or_default();
        if let Some(home) = std::env::var_os("HOME") {
            data_dirs.push(PathBuf::from(home).join("nltk_data"));
        }

        std::iter::once(PathBuf::from(DEFAULT_FILE_NAME))
            .chain(data_dirs.into_iter().map(|dir| {
                dir.join("sentiment")
                    .join("vader_lexicon")
                    .join(DEFAULT_FILE_NAME)
            }))
            .collect()
    }

    /// First of `candidates` that is an existing file.
    ///
    /// # Errors
    ///
    /// Returns [`RatelensError::LexiconNotFound`] listing every candidate when
    /// none exists.
    pub fn locate(candidates: &[PathBuf]) -> Result<PathBuf, RatelensError> {
        if let Some(found) = candidates.iter().find(|path| path.is_file()) {
            tracing::debug!(path = %found.display(), "found lexicon");
            return Ok(found.clone());
        }
        let searched = candidates
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join(", ");
        Err(RatelensError::LexiconNotFound { searched })
    }

    /// Valence for `token`, compared case-insensitively.
    pub fn get(&self, token: &str) -> Option<f64> {
        self.valences.get(&token.to_lowercase()).copied()
    }

    /// Whether `token` has a valence entry.
    pub fn contains(&self, token: &str) -> bool {
        self.valences.contains_key(&token.to_lowercase())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.valences.len()
    }

    /// Whether the lexicon has no entries.
    pub fn is_empty(&self) -> bool {
        self.valences.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extra_columns_are_ignored() {
        let lexicon = Lexicon::parse("great\t3.1\t0.7\t[3, 3, 4, 3]\n").unwrap();
        assert_eq!(lexicon.get("great"), Some(3.1));
    }

    #[test]
    fn blank_lines_skipped() {
        let lexicon = Lexicon::parse("\nfun\t2.3\r\n\n").unwrap();
        assert_eq!(lexicon.len(), 1);
        assert_eq!(lexicon.get("fun"), Some(2.3));
    }

    #[test]
    fn hash_tokens_are_entries() {
        let lexicon = Lexicon::parse("#-)\t-1.4\t0.8\n#)\t1.0\t0.6\n").unwrap();
        assert_eq!(lexicon.len(), 2);
        assert_eq!(lexicon.get("#-)"), Some(-1.4));
    }

    #[test]
    fn missing_valence_reports_line() {
        let err = Lexicon::parse("good\t1.9\nbad\n").unwrap_err();
        match err {
            RatelensError::Lexicon { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("bad"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_numeric_valence_is_rejected() {
        let err = Lexicon::parse("good\tvery\n").unwrap_err();
        assert!(matches!(err, RatelensError::Lexicon { line: 1, .. }));
    }

    #[test]
    fn from_file_reads_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexicon.txt");
        std::fs::write(&path, "calm\t1.3\n").unwrap();

        let lexicon = Lexicon::from_file(&path).unwrap();
        assert_eq!(lexicon.get("Calm"), Some(1.3));
    }

    #[test]
    fn from_file_missing_is_io_error() {
        let err = Lexicon::from_file(Path::new("/nonexistent/lexicon.txt")).unwrap_err();
        assert!(matches!(err, RatelensError::Io(_)));
    }

    #[test]
    fn locate_returns_first_existing_candidate() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent").join(DEFAULT_FILE_NAME);
        let present = dir.path().join(DEFAULT_FILE_NAME);
        std::fs::write(&present, "good\t1.9\n").unwrap();

        let found = Lexicon::locate(&[missing, present.clone()]).unwrap();
        assert_eq!(found, present);
    }

    #[test]
    fn locate_lists_every_candidate_when_none_exist() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("a.txt");
        let second = dir.path().join("b.txt");

        let err = Lexicon::locate(&[first.clone(), second.clone()]).unwrap_err();
        match err {
            RatelensError::LexiconNotFound { searched } => {
                assert!(searched.contains(&first.display().to_string()));
                assert!(searched.contains(&second.display().to_string()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn default_locations_start_in_working_directory() {
        let locations = Lexicon::default_locations();
        assert_eq!(locations[0], PathBuf::from(DEFAULT_FILE_NAME));
        assert!(locations[1..]
            .iter()
            .all(|path| path.ends_with("sentiment/vader_lexicon/vader_lexicon.txt")));
    }
}
