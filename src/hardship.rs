//! Text Hardship Scoring Module
//!
//! Turns an applicant's personal statement into a bounded hardship score.
//! Two interchangeable modes behind one trait:
//! - `LexiconScorer`: sentiment polarity plus keyword lexicon, scores 1-10
//! - `ModelScorer`: generative-model rubric, scores 0-1, rate limited
//!
//! The composite scorer consumes the min-max normalized value, so either
//! mode can be deployed without touching the scoring formula.

use crate::lexicon::Lexicon;
use anyhow::{anyhow, Context, Result};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::warn;

/// Placeholder the intake form stores when the statement was left blank.
pub const PLACEHOLDER_TEXT: &str = "Not provided";

/// Inclusive output bounds declared by a scorer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreRange {
    pub floor: f64,
    pub ceiling: f64,
}

impl ScoreRange {
    /// Min-max normalization of a raw score onto [0, 1].
    pub fn normalize(&self, raw: f64) -> f64 {
        if self.ceiling <= self.floor {
            return 0.0;
        }
        ((raw - self.floor) / (self.ceiling - self.floor)).clamp(0.0, 1.0)
    }
}

/// Hardship scorer contract. Scores always land inside `range()`; absent or
/// placeholder text maps to the range floor.
pub trait HardshipScorer {
    fn range(&self) -> ScoreRange;

    fn score(&self, text: Option<&str>) -> f64;

    fn score_normalized(&self, text: Option<&str>) -> f64 {
        self.range().normalize(self.score(text))
    }
}

// ============================================
// Translation collaborator
// ============================================

/// Translates a statement into the working language. Network-bound; callers
/// fall back to the untranslated original on failure.
pub trait Translator {
    fn translate(&self, text: &str) -> Result<String>;
}

/// Pass-through for deployments without a translation service.
pub struct NoTranslator;

impl Translator for NoTranslator {
    fn translate(&self, text: &str) -> Result<String> {
        Ok(text.to_string())
    }
}

/// Translation service over HTTP.
pub struct HttpTranslator {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpTranslator {
    pub fn new(endpoint: String) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .context("Failed to build translator client")?;

        Ok(HttpTranslator { client, endpoint })
    }
}

impl Translator for HttpTranslator {
    fn translate(&self, text: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "q": text, "target": "en" }))
            .send()
            .context("Translation request failed")?;

        if !response.status().is_success() {
            return Err(anyhow!("Translation service returned {}", response.status()));
        }

        let body: serde_json::Value = response
            .json()
            .context("Failed to decode translation response")?;

        body.get("text")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| anyhow!("Translation response missing text field"))
    }
}

// ============================================
// Lexicon mode
// ============================================

const LEXICON_FLOOR: f64 = 1.0;
const LEXICON_CEILING: f64 = 10.0;

/// Keyword bonus never exceeds this many points.
const BONUS_CAP: f64 = 5.0;

/// Coarse valence words for polarity. Deliberately small: the keyword
/// lexicon carries most of the hardship signal.
const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "happy", "hope", "hopeful", "love", "excellent", "wonderful", "amazing",
    "blessed", "grateful", "thankful", "joy", "success", "successful", "proud", "best",
    "confident", "excited", "achieve", "passion",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "sad", "poor", "hard", "difficult", "struggle", "struggling", "pain", "lost", "alone",
    "fear", "worry", "worried", "cry", "death", "died", "sick", "illness", "hopeless", "tired",
    "hunger", "debt", "broke", "abuse", "violence", "unsafe", "depressed", "anxious", "orphan",
];

/// Lexicon-based scorer: polarity sets the base, keyword hits add a bounded
/// bonus, short or untranslated content is penalized.
pub struct LexiconScorer<T: Translator> {
    lexicon: Lexicon,
    translator: T,
}

impl<T: Translator> LexiconScorer<T> {
    pub fn new(lexicon: Lexicon, translator: T) -> Self {
        LexiconScorer { lexicon, translator }
    }

    /// One increment per phrase occurrence, across all categories
    /// independently; a phrase listed under two categories counts twice.
    fn keyword_bonus(&self, lowered: &str) -> f64 {
        let mut hits = 0usize;

        for category in &self.lexicon.categories {
            for phrase in &category.phrases {
                let phrase = phrase.to_lowercase();
                if phrase.is_empty() {
                    continue;
                }
                hits += lowered.matches(phrase.as_str()).count();
            }
        }

        (hits as f64).min(BONUS_CAP)
    }
}

impl<T: Translator> HardshipScorer for LexiconScorer<T> {
    fn range(&self) -> ScoreRange {
        ScoreRange {
            floor: LEXICON_FLOOR,
            ceiling: LEXICON_CEILING,
        }
    }

    fn score(&self, text: Option<&str>) -> f64 {
        let statement = match text {
            Some(t) if !t.trim().is_empty() && t.trim() != PLACEHOLDER_TEXT => t.trim(),
            _ => return LEXICON_FLOOR,
        };

        // Non-working-language statements go through translation; keep the
        // original when the service is unavailable.
        let translated = if contains_devanagari(statement) {
            match self.translator.translate(statement) {
                Ok(t) => t,
                Err(e) => {
                    warn!("Translation failed, scoring original text: {:#}", e);
                    statement.to_string()
                }
            }
        } else {
            statement.to_string()
        };

        let lowered = translated.to_lowercase();
        let polarity = text_polarity(&lowered);

        // more negative statements map higher on the 1-10 band
        let base = 5.5 - 4.5 * polarity;

        let mut bonus = self.keyword_bonus(&lowered);
        if contains_devanagari(&translated) {
            bonus -= 1.0;
        }
        if lowered.split_whitespace().count() < 3 && polarity > 0.5 {
            bonus -= 1.0;
        }

        (base + bonus).clamp(LEXICON_FLOOR, LEXICON_CEILING)
    }
}

/// Signed polarity in [-1, 1] from valence word counts.
fn text_polarity(lowered: &str) -> f64 {
    let mut positive = 0i32;
    let mut negative = 0i32;

    for word in lowered.split(|c: char| !c.is_alphanumeric()) {
        if word.is_empty() {
            continue;
        }
        if POSITIVE_WORDS.contains(&word) {
            positive += 1;
        }
        if NEGATIVE_WORDS.contains(&word) {
            negative += 1;
        }
    }

    let total = positive + negative;
    if total == 0 {
        0.0
    } else {
        f64::from(positive - negative) / f64::from(total)
    }
}

fn contains_devanagari(text: &str) -> bool {
    text.chars()
        .any(|c| ('\u{0900}'..='\u{097F}').contains(&c))
}

// ============================================
// Generative-model mode
// ============================================

/// Minimum spacing between generative-model calls.
pub const MIN_CALL_INTERVAL: Duration = Duration::from_millis(1200);

/// Statements are truncated before prompting.
const STATEMENT_LIMIT: usize = 3000;

const NEUTRAL_FALLBACK: f64 = 0.5;

/// Generative text model collaborator for the rubric-based mode.
pub trait GenerativeModel {
    fn generate(&self, prompt: &str) -> Result<String>;
}

/// Generative model endpoint over HTTP: posts the prompt, receives the raw
/// reply text.
pub struct HttpGenerativeModel {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpGenerativeModel {
    pub fn new(endpoint: String) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build model client")?;

        Ok(HttpGenerativeModel { client, endpoint })
    }

    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var("MODEL_URL").context("MODEL_URL is not set")?;
        Self::new(endpoint)
    }
}

impl GenerativeModel for HttpGenerativeModel {
    fn generate(&self, prompt: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "prompt": prompt }))
            .send()
            .context("Model request failed")?;

        if !response.status().is_success() {
            return Err(anyhow!("Model endpoint returned {}", response.status()));
        }

        response.text().context("Failed to read model reply")
    }
}

/// Spacing gate for model calls. The last-call instant is mutex-guarded so
/// the interval holds even when callers parallelize around the scorer.
pub struct RateLimiter {
    last_call: Mutex<Option<Instant>>,
    min_interval: Duration,
}

impl RateLimiter {
    pub fn new(min_interval: Duration) -> Self {
        RateLimiter {
            last_call: Mutex::new(None),
            min_interval,
        }
    }

    /// Gate that never sleeps, for tests.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    /// Block until the minimum interval since the previous call has passed,
    /// then record this call.
    pub fn wait(&self) {
        let mut last = self.last_call.lock().unwrap();

        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                std::thread::sleep(self.min_interval - elapsed);
            }
        }

        *last = Some(Instant::now());
    }
}

/// Rubric-based scorer delegating to a generative model. Replies that fail
/// to parse, and model errors, fall back to the 0.5 midpoint.
pub struct ModelScorer<G: GenerativeModel> {
    model: G,
    limiter: RateLimiter,
}

impl<G: GenerativeModel> ModelScorer<G> {
    pub fn new(model: G) -> Self {
        Self::with_limiter(model, RateLimiter::new(MIN_CALL_INTERVAL))
    }

    pub fn with_limiter(model: G, limiter: RateLimiter) -> Self {
        ModelScorer { model, limiter }
    }

    fn build_prompt(statement: &str) -> String {
        format!(
            "Analyze this student's personal statement for emotional hardship.\n\
             Consider these aspects with weights:\n\
             - Financial struggles (30%)\n\
             - Family difficulties (25%)\n\
             - Health challenges (20%)\n\
             - Educational barriers (15%)\n\
             - Emotional distress (10%)\n\n\
             Scoring guidelines:\n\
             0.0-0.3: minimal hardship\n\
             0.4-0.6: moderate hardship\n\
             0.7-0.9: severe hardship\n\
             1.0: extreme hardship\n\n\
             Respond ONLY with a decimal number between 0 and 1.\n\
             Do not include any other text or explanation.\n\n\
             Text to analyze: \"{}\"",
            statement
        )
    }
}

impl<G: GenerativeModel> HardshipScorer for ModelScorer<G> {
    fn range(&self) -> ScoreRange {
        ScoreRange {
            floor: 0.0,
            ceiling: 1.0,
        }
    }

    fn score(&self, text: Option<&str>) -> f64 {
        let statement = match text {
            Some(t) if !t.trim().is_empty() && t.trim() != PLACEHOLDER_TEXT => t.trim(),
            _ => return 0.0,
        };

        self.limiter.wait();

        let truncated: String = statement.chars().take(STATEMENT_LIMIT).collect();

        match self.model.generate(&Self::build_prompt(&truncated)) {
            Ok(reply) => parse_model_score(&reply).unwrap_or_else(|| {
                warn!("Could not parse hardship score from model reply");
                NEUTRAL_FALLBACK
            }),
            Err(e) => {
                warn!("Hardship model call failed: {:#}", e);
                NEUTRAL_FALLBACK
            }
        }
    }
}

/// Single decimal parsed from a model reply, clamped to [0, 1].
fn parse_model_score(reply: &str) -> Option<f64> {
    reply
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon_scorer() -> LexiconScorer<NoTranslator> {
        LexiconScorer::new(Lexicon::builtin(), NoTranslator)
    }

    struct FailingTranslator;

    impl Translator for FailingTranslator {
        fn translate(&self, _text: &str) -> Result<String> {
            Err(anyhow!("translation service down"))
        }
    }

    struct FixedModel {
        reply: Result<String>,
    }

    impl FixedModel {
        fn ok(reply: &str) -> Self {
            FixedModel {
                reply: Ok(reply.to_string()),
            }
        }

        fn failing() -> Self {
            FixedModel {
                reply: Err(anyhow!("model quota exhausted")),
            }
        }
    }

    impl GenerativeModel for FixedModel {
        fn generate(&self, _prompt: &str) -> Result<String> {
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(anyhow!("{}", e)),
            }
        }
    }

    fn assert_in_lexicon_range(score: f64) {
        assert!(
            (LEXICON_FLOOR..=LEXICON_CEILING).contains(&score),
            "score {} outside declared range",
            score
        );
    }

    #[test]
    fn test_absent_and_placeholder_text_score_floor() {
        let scorer = lexicon_scorer();
        assert_eq!(scorer.score(None), LEXICON_FLOOR);
        assert_eq!(scorer.score(Some("")), LEXICON_FLOOR);
        assert_eq!(scorer.score(Some("   ")), LEXICON_FLOOR);
        assert_eq!(scorer.score(Some("Not provided")), LEXICON_FLOOR);
    }

    #[test]
    fn test_score_stays_in_range_for_arbitrary_input() {
        let scorer = lexicon_scorer();

        assert_in_lexicon_range(scorer.score(Some("a perfectly ordinary statement")));
        assert_in_lexicon_range(scorer.score(Some(&"poverty struggling orphan ".repeat(500))));
        assert_in_lexicon_range(scorer.score(Some("!!!???")));
        assert_in_lexicon_range(scorer.score(Some("great")));
    }

    #[test]
    fn test_negative_statement_scores_higher_than_positive() {
        let scorer = lexicon_scorer();
        let negative = scorer.score(Some(
            "my family is struggling with debt and hunger and I am worried",
        ));
        let positive = scorer.score(Some(
            "I am grateful and happy and excited about my wonderful future",
        ));
        assert!(
            negative > positive,
            "negative {} should outrank positive {}",
            negative,
            positive
        );
    }

    #[test]
    fn test_keyword_bonus_is_capped() {
        let scorer = lexicon_scorer();
        let text = "village casteism depression no internet ".repeat(20).to_lowercase();
        assert_eq!(scorer.keyword_bonus(&text), BONUS_CAP);
        // neutral polarity (base 5.5) plus the capped bonus saturates the band
        assert_eq!(scorer.score(Some(&text)), LEXICON_CEILING);
    }

    #[test]
    fn test_short_strongly_positive_text_is_penalized() {
        let scorer = lexicon_scorer();
        // both texts: polarity 1.0 (base 1.0) and one keyword hit; only the
        // two-word variant takes the short-positive penalty
        let short = scorer.score(Some("happy poverty"));
        let long = scorer.score(Some("happy happy poverty"));
        assert_eq!(short, 1.0);
        assert_eq!(long, 2.0);
    }

    #[test]
    fn test_untranslated_script_penalty_applies_on_failure() {
        let with_fallback = LexiconScorer::new(Lexicon::builtin(), FailingTranslator);
        // translation fails and the original Devanagari text is scored: one
        // keyword hit cancelled by the script penalty, neutral base remains
        let score = with_fallback.score(Some("मेरा परिवार गरीबी में है और पढ़ाई मुश्किल है"));
        assert_eq!(score, 5.5);
    }

    #[test]
    fn test_normalize_maps_range_onto_unit_interval() {
        let range = ScoreRange {
            floor: 1.0,
            ceiling: 10.0,
        };
        assert_eq!(range.normalize(1.0), 0.0);
        assert_eq!(range.normalize(10.0), 1.0);
        assert_eq!(range.normalize(5.5), 0.5);
        assert_eq!(range.normalize(-3.0), 0.0);
        assert_eq!(range.normalize(42.0), 1.0);
    }

    #[test]
    fn test_model_scorer_parses_decimal_reply() {
        let scorer = ModelScorer::with_limiter(FixedModel::ok(" 0.85 \n"), RateLimiter::disabled());
        assert_eq!(scorer.score(Some("statement")), 0.85);
    }

    #[test]
    fn test_model_scorer_clamps_out_of_range_reply() {
        let scorer = ModelScorer::with_limiter(FixedModel::ok("7.5"), RateLimiter::disabled());
        assert_eq!(scorer.score(Some("statement")), 1.0);
    }

    #[test]
    fn test_model_scorer_falls_back_on_garbage_reply() {
        let scorer = ModelScorer::with_limiter(
            FixedModel::ok("the hardship is moderate"),
            RateLimiter::disabled(),
        );
        assert_eq!(scorer.score(Some("statement")), NEUTRAL_FALLBACK);
    }

    #[test]
    fn test_model_scorer_falls_back_on_model_error() {
        let scorer = ModelScorer::with_limiter(FixedModel::failing(), RateLimiter::disabled());
        assert_eq!(scorer.score(Some("statement")), NEUTRAL_FALLBACK);
    }

    #[test]
    fn test_model_scorer_absent_text_is_floor_without_a_call() {
        let scorer = ModelScorer::with_limiter(FixedModel::failing(), RateLimiter::disabled());
        assert_eq!(scorer.score(None), 0.0);
        assert_eq!(scorer.score(Some("Not provided")), 0.0);
    }

    #[test]
    fn test_rate_limiter_enforces_interval() {
        let limiter = RateLimiter::new(Duration::from_millis(50));
        let start = Instant::now();
        limiter.wait();
        limiter.wait();
        assert!(
            start.elapsed() >= Duration::from_millis(50),
            "second call returned before the interval elapsed"
        );
    }

    #[test]
    fn test_disabled_rate_limiter_does_not_sleep() {
        let limiter = RateLimiter::disabled();
        let start = Instant::now();
        for _ in 0..10 {
            limiter.wait();
        }
        assert!(start.elapsed() < Duration::from_millis(50));
    }

    #[test]
    fn test_polarity_bounds() {
        assert_eq!(text_polarity("happy great wonderful"), 1.0);
        assert_eq!(text_polarity("sad hopeless broke"), -1.0);
        assert_eq!(text_polarity("completely neutral words"), 0.0);
        assert_eq!(text_polarity("happy sad"), 0.0);
    }
}
