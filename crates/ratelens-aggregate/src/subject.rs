use std::path::PathBuf;

/// File suffix of review resources.
pub const FORMAT_SUFFIX: &str = ".json";

/// Characters dropped from identifiers that do not carry [`FORMAT_SUFFIX`].
const FALLBACK_SUFFIX_CHARS: usize = 4;

/// Derive a subject's display name from its identifier.
///
/// A trailing `.json` is removed, dot included, so `ada.json` becomes `ada`.
/// A plain four-character cut would leave `ada.` here; that cut is applied
/// only to identifiers without the `.json` suffix, which lose exactly their
/// last four characters, counted as `char`s. Shorter identifiers become empty.
///
/// # Examples
///
/// ```
/// use ratelens_aggregate::subject::display_name;
///
/// assert_eq!(display_name("ada.json"), "ada");
/// assert_eq!(display_name("mackey.yaml"), "mackey.");
/// assert_eq!(display_name("abc"), "");
/// ```
pub fn display_name(identifier: &str) -> String {
    if let Some(stem) = identifier.strip_suffix(FORMAT_SUFFIX) {
        return stem.to_string();
    }
    let cut = identifier
        .char_indices()
        .rev()
        .nth(FALLBACK_SUFFIX_CHARS - 1)
        .map(|(idx, _)| idx)
        .unwrap_or(0);
    identifier[..cut].to_string()
}

/// Where a subject's reviews live, and what to call the subject.
///
/// The locator and the display name are independent values; use
/// [`SubjectSource::from_identifier`] to derive both from one identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectSource {
    /// Path of the review resource.
    pub locator: PathBuf,
    /// Name reported alongside the scores.
    pub subject: String,
}

impl SubjectSource {
    /// Pair an explicit locator with an explicit display name.
    pub fn new(locator: impl Into<PathBuf>, subject: impl Into<String>) -> Self {
        Self {
            locator: locator.into(),
            subject: subject.into(),
        }
    }

    /// Use `identifier` as the locator and [`display_name`] of it as the subject.
    ///
    /// # Examples
    ///
    /// ```
    /// use ratelens_aggregate::subject::SubjectSource;
    /// use std::path::Path;
    ///
    /// let source = SubjectSource::from_identifier("reviews/ada.json");
    /// assert_eq!(source.locator, Path::new("reviews/ada.json"));
    /// assert_eq!(source.subject, "reviews/ada");
    /// ```
    pub fn from_identifier(identifier: &str) -> Self {
        Self::new(identifier, display_name(identifier))
    }
}
