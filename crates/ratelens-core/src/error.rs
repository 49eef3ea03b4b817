use std::path::PathBuf;

/// Errors that can occur across ratelens.
///
/// Library crates use this type directly; the binary converts to
/// `miette::Report` at the boundary.
///
/// # Examples
///
/// ```
/// use ratelens_core::RatelensError;
/// use std::path::PathBuf;
///
/// let err = RatelensError::ResourceNotFound(PathBuf::from("ada.json"));
/// assert!(err.to_string().contains("ada.json"));
/// ```
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum RatelensError {
    /// The review resource is missing or cannot be read.
    #[error("review resource not found: {}", .0.display())]
    #[diagnostic(
        code(ratelens::resource_not_found),
        help("check the identifier; it must name a readable review file")
    )]
    ResourceNotFound(PathBuf),

    /// The resource exists but is not a sequence of review records.
    #[error("malformed review resource {}: {message}", .path.display())]
    #[diagnostic(
        code(ratelens::malformed_input),
        help("expected a JSON array of objects, each with a string \"rComments\" field")
    )]
    MalformedInput {
        /// Resource that failed to deserialize.
        path: PathBuf,
        /// Underlying decoder message.
        message: String,
    },

    /// Filesystem I/O failure outside of review loading.
    #[error("IO error: {0}")]
    #[diagnostic(code(ratelens::io))]
    Io(#[from] std::io::Error),

    /// No lexicon was configured and none was found at the default locations.
    #[error("no sentiment lexicon found (looked in: {searched})")]
    #[diagnostic(
        code(ratelens::lexicon_not_found),
        help(
            "download the VADER vader_lexicon.txt and pass it with --lexicon, \
             set `lexicon` under [sentiment] in .ratelens.toml, \
             or place it in the working directory"
        )
    )]
    LexiconNotFound {
        /// Comma-separated list of the locations that were tried.
        searched: String,
    },

    /// TOML deserialization failure.
    #[error("TOML parse error: {0}")]
    #[diagnostic(code(ratelens::toml))]
    Toml(#[from] toml::de::Error),

    /// JSON serialization failure.
    #[error("serialization error: {0}")]
    #[diagnostic(code(ratelens::serialization))]
    Serialization(#[from] serde_json::Error),

    /// A sentiment lexicon line could not be parsed.
    #[error("lexicon error on line {line}: {message}")]
    #[diagnostic(
        code(ratelens::lexicon),
        help("lexicon lines are `token<TAB>mean[<TAB>...]`")
    )]
    Lexicon {
        /// 1-based line number in the lexicon source.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },
}

impl RatelensError {
    /// Returns `true` for the two per-subject failures: a missing resource or
    /// a malformed one.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            RatelensError::ResourceNotFound(_) | RatelensError::MalformedInput { .. }
        )
    }
}
