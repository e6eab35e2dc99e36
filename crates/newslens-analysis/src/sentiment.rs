//! Lexicon-based compound polarity scorer for general news text.

/// Produces a compound polarity score in `[-1.0, 1.0]`.
pub trait SentimentClassifier: Send + Sync {
    fn polarity(&self, text: &str) -> f64;
}

/// Word weights on a `[-4, 4]` valence scale.
///
/// Keys are lowercase single words.
pub(crate) const LEXICON: &[(&str, f64)] = &[
    // Positive signals
    ("good", 1.9),
    ("great", 3.1),
    ("excellent", 3.2),
    ("positive", 2.3),
    ("success", 2.7),
    ("successful", 2.8),
    ("win", 2.8),
    ("wins", 2.7),
    ("won", 2.7),
    ("victory", 2.9),
    ("growth", 1.6),
    ("growing", 1.5),
    ("gain", 2.0),
    ("gains", 1.9),
    ("rise", 1.2),
    ("surge", 1.5),
    ("record", 1.0),
    ("improve", 1.9),
    ("improved", 2.1),
    ("recovery", 1.7),
    ("boost", 1.7),
    ("strong", 2.3),
    ("safe", 1.9),
    ("hope", 1.9),
    ("celebrate", 2.7),
    ("agreement", 1.5),
    ("peace", 2.5),
    ("breakthrough", 2.4),
    ("benefit", 2.0),
    ("love", 3.2),
    ("best", 3.2),
    ("happy", 2.7),
    // Negative signals
    ("bad", -2.5),
    ("terrible", -3.0),
    ("worst", -3.1),
    ("crisis", -3.1),
    ("war", -2.9),
    ("attack", -2.1),
    ("killed", -3.5),
    ("death", -2.9),
    ("dead", -3.3),
    ("crash", -2.0),
    ("fall", -1.2),
    ("decline", -1.4),
    ("loss", -1.3),
    ("losses", -1.5),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failure", -2.3),
    ("fear", -2.2),
    ("threat", -2.4),
    ("warning", -1.4),
    ("concern", -1.3),
    ("problem", -1.7),
    ("scandal", -2.4),
    ("fraud", -2.8),
    ("lawsuit", -1.6),
    ("ban", -2.6),
    ("banned", -2.0),
    ("illegal", -2.6),
    ("recession", -2.4),
    ("inflation", -1.0),
    ("violence", -3.1),
    ("disaster", -3.1),
    ("protest", -1.0),
    ("weak", -1.9),
];

/// Words that flip the sign of the next scored word within this many tokens.
const NEGATIONS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "without", "cannot",
    "isn't", "wasn't", "aren't", "weren't", "don't", "doesn't", "didn't", "won't", "can't",
];
const NEGATION_WINDOW: usize = 3;
/// Scaling applied to a negated weight.
const NEGATION_SCALAR: f64 = -0.74;
/// Normalization constant for `sum / sqrt(sum^2 + ALPHA)`.
const ALPHA: f64 = 15.0;

/// Sums lexicon weights with simple negation handling, then squashes the
/// sum into `[-1.0, 1.0]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconClassifier;

impl LexiconClassifier {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl SentimentClassifier for LexiconClassifier {
    fn polarity(&self, text: &str) -> f64 {
        compound_score(text)
    }
}

/// Returns `0.0` for empty or unknown text.
#[must_use]
pub fn compound_score(text: &str) -> f64 {
    let mut sum = 0.0_f64;
    let mut since_negation: Option<usize> = None;

    for word in text.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphabetic() && c != '\'')
            .to_lowercase();
        if w.is_empty() {
            continue;
        }

        if NEGATIONS.contains(&w.as_str()) {
            since_negation = Some(0);
            continue;
        }

        if let Some(weight) = lookup(&w) {
            let negated = since_negation.is_some_and(|n| n < NEGATION_WINDOW);
            sum += if negated { weight * NEGATION_SCALAR } else { weight };
            since_negation = None;
        } else if let Some(n) = since_negation.as_mut() {
            *n += 1;
        }
    }

    normalize(sum)
}

fn lookup(word: &str) -> Option<f64> {
    LEXICON
        .iter()
        .find(|&&(lex_word, _)| lex_word == word)
        .map(|&(_, weight)| weight)
}

fn normalize(sum: f64) -> f64 {
    if sum == 0.0 {
        return 0.0;
    }
    (sum / (sum * sum + ALPHA).sqrt()).clamp(-1.0, 1.0)
}
