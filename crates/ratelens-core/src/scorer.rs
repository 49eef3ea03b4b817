use crate::types::PolarityScores;

/// A text-in, scores-out sentiment capability.
///
/// The aggregation pipeline treats implementors as black boxes: it calls
/// [`polarity_scores`](SentimentScorer::polarity_scores) once per subject and
/// reports whatever comes back. Passing the scorer explicitly lets tests
/// substitute a double.
///
/// # Examples
///
/// ```
/// use ratelens_core::{PolarityScores, SentimentScorer};
///
/// struct Neutral;
///
/// impl SentimentScorer for Neutral {
///     fn polarity_scores(&self, _text: &str) -> PolarityScores {
///         PolarityScores { neg: 0.0, neu: 1.0, pos: 0.0, compound: 0.0 }
///     }
/// }
///
/// assert_eq!(Neutral.polarity_scores("anything").neu, 1.0);
/// ```
pub trait SentimentScorer {
    /// Score `text`, returning negative/neutral/positive proportions and a
    /// compound summary.
    fn polarity_scores(&self, text: &str) -> PolarityScores;
}

impl<T: SentimentScorer + ?Sized> SentimentScorer for &T {
    fn polarity_scores(&self, text: &str) -> PolarityScores {
        (**self).polarity_scores(text)
    }
}
