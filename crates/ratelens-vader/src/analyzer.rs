//! Rule-augmented valence scoring over a [`Lexicon`].

use std::collections::HashSet;

use ratelens_core::{PolarityScores, SentimentScorer};

use crate::lexicon::Lexicon;

/// Added to (or subtracted from) a valence by a booster word.
const B_INCR: f64 = 0.293;
/// Added to (or subtracted from) a valence by a dampener word.
const B_DECR: f64 = -0.293;
/// Emphasis for an ALL-CAPS token in mixed-case text.
const C_INCR: f64 = 0.733;
/// Multiplier applied by a negation in the preceding window.
const N_SCALAR: f64 = -0.74;
/// Approximates the max expected valence sum when normalizing.
const NORMALIZE_ALPHA: f64 = 15.0;

const EXCLAIM_WEIGHT: f64 = 0.292;
const MAX_EXCLAIMS: usize = 4;
const QUESTION_WEIGHT: f64 = 0.18;
const QUESTION_CAP: f64 = 0.96;

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "ain't",
    "aren't", "can't", "couldn't", "daren't", "didn't", "doesn't", "dont", "hadnt", "hasnt",
    "havent", "isnt", "mightnt", "mustnt", "neither", "don't", "hadn't", "hasn't", "haven't",
    "isn't", "mightn't", "mustn't", "neednt", "needn't", "never", "none", "nope", "nor", "not",
    "nothing", "nowhere", "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent",
    "oughtn't", "shan't", "shouldn't", "uh-uh", "wasn't", "weren't", "without", "wont",
    "wouldnt", "won't", "wouldn't", "rarely", "seldom", "despite",
];

/// Punctuation runs that are split off a token when the rest is a word.
const PUNCTUATION: &[&str] = &[
    ".", "!", "?", ",", ";", ":", "-", "'", "\"", "!!", "!!!", "??", "???", "?!?", "!?!",
    "?!?!", "!?!?",
];

/// Phrases whose valence replaces that of the scored word they contain.
const SPECIAL_IDIOMS: &[(&str, f64)] = &[
    ("the shit", 3.0),
    ("the bomb", 3.0),
    ("bad ass", 1.5),
    ("yeah right", -2.0),
    ("cut the mustard", 2.0),
    ("kiss of death", -1.5),
    ("hand to mouth", -2.0),
];

fn booster_scalar(word: &str) -> Option<f64> {
    match word {
        "absolutely" | "amazingly" | "awfully" | "completely" | "considerable"
        | "considerably" | "decidedly" | "deeply" | "enormous" | "enormously" | "entirely"
        | "effing" | "especially" | "exceptional" | "exceptionally" | "extreme"
        | "extremely" | "fabulously" | "flipping" | "flippin" | "frackin" | "fracking"
        | "fricking" | "frickin" | "frigging" | "friggin" | "fully" | "fuckin" | "fucking"
        | "fuggin" | "fugging" | "greatly" | "hella" | "highly" | "hugely" | "incredible"
        | "incredibly" | "intensely" | "major" | "majorly" | "more" | "most" | "particularly"
        | "purely" | "quite" | "really" | "remarkably" | "so" | "substantially"
        | "thoroughly" | "total" | "totally" | "tremendous" | "tremendously" | "uber"
        | "unbelievably" | "unusually" | "utter" | "utterly" | "very" => Some(B_INCR),
        "almost" | "barely" | "hardly" | "just enough" | "kind of" | "kinda" | "kindof"
        | "kind-of" | "less" | "little" | "marginal" | "marginally" | "occasional"
        | "occasionally" | "partly" | "scarce" | "scarcely" | "slight" | "slightly"
        | "somewhat" | "sort of" | "sorta" | "sortof" | "sort-of" => {
            Some(B_DECR)
        }
        _ => None,
    }
}

fn is_negated(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.contains("n't")
}

/// At least one uppercase letter and no lowercase ones.
fn is_all_caps(token: &str) -> bool {
    token.chars().any(char::is_uppercase) && !token.chars().any(char::is_lowercase)
}

fn idiom_valence(phrase: &str) -> Option<f64> {
    SPECIAL_IDIOMS
        .iter()
        .find(|(idiom, _)| *idiom == phrase)
        .map(|&(_, valence)| valence)
}

/// Splits one [`PUNCTUATION`] run off the front or back of `token` when what
/// remains is one of `words`. Anything else, emoticons included, is kept whole.
fn strip_punctuation<'t>(token: &'t str, words: &HashSet<&str>) -> &'t str {
    let mut word = token;
    for punct in PUNCTUATION {
        if let Some(stem) = token.strip_suffix(punct) {
            if words.contains(stem) {
                word = stem;
            }
        }
    }
    for punct in PUNCTUATION {
        if let Some(stem) = token.strip_prefix(punct) {
            if words.contains(stem) {
                word = stem;
            }
        }
    }
    word
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + NORMALIZE_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn punctuation_emphasis(text: &str) -> f64 {
    let exclaims = text.matches('!').count().min(MAX_EXCLAIMS);
    let questions = text.matches('?').count();
    let question_amp = match questions {
        0 | 1 => 0.0,
        2 | 3 => questions as f64 * QUESTION_WEIGHT,
        _ => QUESTION_CAP,
    };
    exclaims as f64 * EXCLAIM_WEIGHT + question_amp
}

struct Tokens<'a> {
    raw: Vec<&'a str>,
    lower: Vec<String>,
    cap_diff: bool,
}

impl<'a> Tokens<'a> {
    /// Whitespace tokens longer than one character. `words` holds the
    /// multi-character words of the text with all punctuation removed.
    fn new(text: &'a str) -> Self {
        let bare: String = text.chars().filter(|c| !c.is_ascii_punctuation()).collect();
        let words: HashSet<&str> = bare
            .split_whitespace()
            .filter(|w| w.chars().count() > 1)
            .collect();
        let raw: Vec<&str> = text
            .split_whitespace()
            .filter(|t| t.chars().count() > 1)
            .map(|t| strip_punctuation(t, &words))
            .collect();
        let lower = raw.iter().map(|t| t.to_lowercase()).collect();
        let caps = raw.iter().filter(|t| is_all_caps(t)).count();
        Self {
            cap_diff: caps > 0 && caps < raw.len(),
            raw,
            lower,
        }
    }

    fn len(&self) -> usize {
        self.raw.len()
    }
}

/// VADER-style sentiment analyzer.
///
/// Built once and shared by reference; scoring does not mutate it.
///
/// # Examples
///
/// ```
/// use ratelens_core::SentimentScorer;
/// use ratelens_vader::{Lexicon, VaderAnalyzer};
///
/// let lexicon = Lexicon::parse("good\t1.9\t0.9\n").unwrap();
/// let analyzer = VaderAnalyzer::new(lexicon);
/// let scores = analyzer.polarity_scores("The book was good.");
/// assert_eq!(scores.compound, 0.4404);
/// assert_eq!(scores.pos, 0.492);
/// ```
#[derive(Debug, Clone)]
pub struct VaderAnalyzer {
    lexicon: Lexicon,
}

impl VaderAnalyzer {
    /// Create an analyzer over `lexicon`.
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// The lexicon in use.
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    fn valence(&self, tokens: &Tokens<'_>, i: usize) -> f64 {
        let words = &tokens.lower;
        let Some(base) = self.lexicon.get(&words[i]) else {
            return 0.0;
        };
        let mut valence = base;

        // "no" directly before a scored word only modifies it.
        if words[i] == "no" && i + 1 < words.len() && self.lexicon.contains(&words[i + 1]) {
            valence = 0.0;
        }
        if (i > 0 && words[i - 1] == "no")
            || (i > 1 && words[i - 2] == "no")
            || (i > 2 && words[i - 3] == "no" && matches!(words[i - 1].as_str(), "or" | "nor"))
        {
            valence = base * N_SCALAR;
        }

        if tokens.cap_diff && is_all_caps(tokens.raw[i]) {
            if valence > 0.0 {
                valence += C_INCR;
            } else {
                valence -= C_INCR;
            }
        }

        for start in 0..3 {
            if i > start && !self.lexicon.contains(&words[i - (start + 1)]) {
                let mut scalar = scalar_inc_dec(tokens, i - (start + 1), valence);
                if start == 1 && scalar != 0.0 {
                    scalar *= 0.95;
                }
                if start == 2 && scalar != 0.0 {
                    scalar *= 0.9;
                }
                valence += scalar;
                valence = negation_check(valence, words, start, i);
                if start == 2 {
                    valence = idioms_check(valence, &tokens.raw, i);
                }
            }
        }

        self.least_check(valence, words, i)
    }

    fn least_check(&self, valence: f64, words: &[String], i: usize) -> f64 {
        if i > 1 && !self.lexicon.contains(&words[i - 1]) && words[i - 1] == "least" {
            if words[i - 2] != "at" && words[i - 2] != "very" {
                return valence * N_SCALAR;
            }
        } else if i > 0 && !self.lexicon.contains(&words[i - 1]) && words[i - 1] == "least" {
            return valence * N_SCALAR;
        }
        valence
    }
}

fn scalar_inc_dec(tokens: &Tokens<'_>, j: usize, valence: f64) -> f64 {
    let Some(mut scalar) = booster_scalar(&tokens.lower[j]) else {
        return 0.0;
    };
    if valence < 0.0 {
        scalar = -scalar;
    }
    if tokens.cap_diff && is_all_caps(tokens.raw[j]) {
        if valence > 0.0 {
            scalar += C_INCR;
        } else {
            scalar -= C_INCR;
        }
    }
    scalar
}

fn negation_check(valence: f64, words: &[String], start: usize, i: usize) -> f64 {
    let is_so_or_this = |w: &str| w == "so" || w == "this";
    match start {
        0 => {
            if is_negated(&words[i - 1]) {
                return valence * N_SCALAR;
            }
        }
        1 => {
            if words[i - 2] == "never" && is_so_or_this(words[i - 1].as_str()) {
                return valence * 1.25;
            } else if words[i - 2] == "without" && words[i - 1] == "doubt" {
                return valence;
            } else if is_negated(&words[i - 2]) {
                return valence * N_SCALAR;
            }
        }
        _ => {
            if words[i - 3] == "never"
                && (is_so_or_this(words[i - 2].as_str()) || is_so_or_this(words[i - 1].as_str()))
            {
                return valence * 1.25;
            } else if words[i - 3] == "without" && (words[i - 2] == "doubt" || words[i - 1] == "doubt")
            {
                return valence;
            } else if is_negated(&words[i - 3]) {
                return valence * N_SCALAR;
            }
        }
    }
    valence
}

/// Idioms around the word at `i` override its valence; a preceding
/// "kind of" style bigram dampens it. Only called with `i >= 3`.
fn idioms_check(valence: f64, raw: &[&str], i: usize) -> f64 {
    let phrase = |range: std::ops::Range<usize>| raw[range].join(" ");
    let mut valence = valence;

    let preceding = [
        phrase(i - 1..i + 1),
        phrase(i - 2..i + 1),
        phrase(i - 2..i),
        phrase(i - 3..i),
        phrase(i - 3..i - 1),
    ];
    if let Some(idiom) = preceding.iter().find_map(|p| idiom_valence(p)) {
        valence = idiom;
    }
    if i + 1 < raw.len() {
        if let Some(idiom) = idiom_valence(&phrase(i..i + 2)) {
            valence = idiom;
        }
    }
    if i + 2 < raw.len() {
        if let Some(idiom) = idiom_valence(&phrase(i..i + 3)) {
            valence = idiom;
        }
    }

    if booster_scalar(&phrase(i - 3..i - 1)).is_some()
        || booster_scalar(&phrase(i - 2..i)).is_some()
    {
        valence += B_DECR;
    }
    valence
}

/// Dampens sentiment before the first "but" and amplifies it after.
fn but_check(words: &[String], sentiments: &mut [f64]) {
    let Some(but_idx) = words.iter().position(|w| w == "but") else {
        return;
    };
    for (idx, sentiment) in sentiments.iter_mut().enumerate() {
        if idx < but_idx {
            *sentiment *= 0.5;
        } else if idx > but_idx {
            *sentiment *= 1.5;
        }
    }
}

fn score_valence(sentiments: &[f64], text: &str) -> PolarityScores {
    if sentiments.is_empty() {
        return PolarityScores::default();
    }

    let emphasis = punctuation_emphasis(text);
    let mut sum: f64 = sentiments.iter().sum();
    if sum > 0.0 {
        sum += emphasis;
    } else if sum < 0.0 {
        sum -= emphasis;
    }
    let compound = normalize(sum);

    let mut pos_sum = 0.0;
    let mut neg_sum = 0.0;
    let mut neu_count = 0usize;
    for &s in sentiments {
        if s > 0.0 {
            pos_sum += s + 1.0;
        } else if s < 0.0 {
            neg_sum += s - 1.0;
        } else {
            neu_count += 1;
        }
    }

    if pos_sum > neg_sum.abs() {
        pos_sum += emphasis;
    } else if pos_sum < neg_sum.abs() {
        neg_sum -= emphasis;
    }

    let total = pos_sum + neg_sum.abs() + neu_count as f64;
    PolarityScores {
        neg: round_to((neg_sum / total).abs(), 3),
        neu: round_to((neu_count as f64 / total).abs(), 3),
        pos: round_to((pos_sum / total).abs(), 3),
        compound: round_to(compound, 4),
    }
}

impl SentimentScorer for VaderAnalyzer {
    fn polarity_scores(&self, text: &str) -> PolarityScores {
        let tokens = Tokens::new(text);
        let mut sentiments = Vec::with_capacity(tokens.len());

        for i in 0..tokens.len() {
            let word = tokens.lower[i].as_str();
            let kind_of = word == "kind" && tokens.lower.get(i + 1).is_some_and(|w| w == "of");
            if booster_scalar(word).is_some() || kind_of {
                sentiments.push(0.0);
                continue;
            }
            sentiments.push(self.valence(&tokens, i));
        }

        but_check(&tokens.lower, &mut sentiments);
        tracing::trace!(tokens = tokens.len(), "scored text");
        score_valence(&sentiments, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Means for the reference-sentence words are the published VADER values.
    const TEST_LEXICON: &str = "\
bad\t-2.5
bomb\t-2.2
boring\t-1.3
funny\t1.9
good\t1.9
great\t3.1
handsome\t2.2
helpful\t1.8
horrible\t-2.5
kind\t2.4
lol\t1.8
no\t-1.2
problems\t-1.7
smart\t1.7
sux\t-1.5
uncompelling\t-0.9
:)\t2.0
";

    fn analyzer() -> VaderAnalyzer {
        VaderAnalyzer::new(Lexicon::parse(TEST_LEXICON).unwrap())
    }

    fn assert_scores(text: &str, neg: f64, neu: f64, pos: f64, compound: f64) {
        assert_eq!(
            analyzer().polarity_scores(text),
            PolarityScores {
                neg,
                neu,
                pos,
                compound
            },
            "{text}"
        );
    }

    #[test]
    fn reference_sentences() {
        assert_scores("VADER is smart, handsome, and funny.", 0.0, 0.254, 0.746, 0.8316);
        assert_scores("VADER is smart, handsome, and funny!", 0.0, 0.248, 0.752, 0.8439);
        assert_scores("VADER is very smart, handsome, and funny.", 0.0, 0.299, 0.701, 0.8545);
        assert_scores("VADER is VERY SMART, handsome, and FUNNY.", 0.0, 0.246, 0.754, 0.9227);
        assert_scores("VADER is VERY SMART, handsome, and FUNNY!!!", 0.0, 0.233, 0.767, 0.9342);
        assert_scores(
            "VADER is VERY SMART, uber handsome, and FRIGGIN FUNNY!!!",
            0.0,
            0.294,
            0.706,
            0.9469,
        );
        assert_scores("VADER is not smart, handsome, nor funny.", 0.646, 0.354, 0.0, -0.7424);
        assert_scores("The book was good.", 0.0, 0.508, 0.492, 0.4404);
        assert_scores("At least it isn't a horrible book.", 0.0, 0.637, 0.363, 0.431);
        assert_scores("The book was only kind of good.", 0.0, 0.697, 0.303, 0.3832);
        assert_scores(
            "The plot was good, but the characters are uncompelling and the dialog is not great.",
            0.327,
            0.579,
            0.094,
            -0.7042,
        );
        assert_scores("Today SUX!", 0.779, 0.221, 0.0, -0.5461);
        assert_scores("Today only kinda sux! But I'll get by, lol", 0.127, 0.556, 0.317, 0.5249);
        assert_scores("Not bad at all", 0.0, 0.513, 0.487, 0.431);
    }

    #[test]
    fn empty_text_scores_zero() {
        assert_eq!(analyzer().polarity_scores(""), PolarityScores::default());
        assert_eq!(analyzer().polarity_scores("   "), PolarityScores::default());
    }

    #[test]
    fn unscored_words_are_neutral() {
        assert_scores("the class met on tuesday", 0.0, 1.0, 0.0, 0.0);
    }

    #[test]
    fn single_character_tokens_are_dropped() {
        assert_scores("a good", 0.0, 0.0, 1.0, 0.4404);
    }

    #[test]
    fn negation_flips_polarity() {
        assert_scores("not good", 0.706, 0.294, 0.0, -0.3412);
    }

    #[test]
    fn booster_increases_intensity() {
        assert_scores("very good", 0.0, 0.238, 0.762, 0.4927);
    }

    #[test]
    fn dampener_reduces_intensity() {
        assert_scores("slightly good", 0.0, 0.277, 0.723, 0.3832);
    }

    #[test]
    fn caps_emphasis_in_mixed_case() {
        assert_scores("GOOD class", 0.0, 0.216, 0.784, 0.5622);
    }

    #[test]
    fn all_caps_text_gets_no_emphasis() {
        assert_eq!(
            analyzer().polarity_scores("GOOD CLASS"),
            analyzer().polarity_scores("good class")
        );
    }

    #[test]
    fn exclamations_are_capped_at_four() {
        assert_scores("good!", 0.0, 0.0, 1.0, 0.4926);
        assert_scores("good ! ! ! !", 0.0, 0.0, 1.0, 0.6209);
        assert_scores("good ! ! ! ! ! !", 0.0, 0.0, 1.0, 0.6209);
    }

    #[test]
    fn long_punctuation_runs_stay_attached() {
        assert_scores("good!!!!", 0.0, 1.0, 0.0, 0.0);
    }

    #[test]
    fn question_marks_amplify_from_two() {
        assert_scores("good?", 0.0, 0.0, 1.0, 0.4404);
        assert_scores("good??", 0.0, 0.0, 1.0, 0.504);
    }

    #[test]
    fn but_shifts_weight_to_second_clause() {
        assert_scores("good but bad", 0.617, 0.13, 0.253, -0.5859);
    }

    #[test]
    fn kind_of_is_not_kindness() {
        assert_scores("kind of boring", 0.535, 0.465, 0.0, -0.3182);
    }

    #[test]
    fn no_before_negative_word_reads_positive() {
        assert_scores("no problems", 0.0, 0.307, 0.693, 0.3089);
    }

    #[test]
    fn least_negates_unless_at_least() {
        assert_scores("least helpful", 0.7, 0.3, 0.0, -0.3252);
        assert_scores("at least helpful", 0.0, 0.417, 0.583, 0.4215);
    }

    #[test]
    fn never_so_intensifies() {
        assert_scores("never so good", 0.0, 0.348, 0.652, 0.5777);
    }

    #[test]
    fn without_doubt_is_not_negation() {
        assert_scores("without doubt good", 0.0, 0.408, 0.592, 0.4404);
    }

    #[test]
    fn idiom_overrides_word_valence() {
        assert_scores("the lectures were the bomb", 0.0, 0.5, 0.5, 0.6124);
    }

    #[test]
    fn emoticons_survive_punctuation_stripping() {
        assert_scores("lecture :)", 0.0, 0.25, 0.75, 0.4588);
    }

    #[test]
    fn aggregated_comment_text() {
        assert_scores(" good class bad class", 0.417, 0.238, 0.345, -0.1531);
    }

    #[test]
    fn custom_lexicon_is_used() {
        let lexicon = Lexicon::parse("grading\t-3.0\n").unwrap();
        let analyzer = VaderAnalyzer::new(lexicon);
        assert_eq!(analyzer.lexicon().len(), 1);
        assert!(analyzer.polarity_scores("grading").compound < 0.0);
        assert_eq!(analyzer.polarity_scores("good").compound, 0.0);
    }

    #[test]
    fn scoring_is_deterministic() {
        let text = "Really helpful professor, but the exams were HARD!";
        assert_eq!(
            analyzer().polarity_scores(text),
            analyzer().polarity_scores(text)
        );
    }
}
