//! Lexicon-based sentiment scoring over social media posts.
//!
//! The scoring is deliberately simple: count lexicon hits in each
//! post and normalize. The lexicons and topic table are configuration
//! on the analyzer so callers can substitute richer word lists (or an
//! external model's output mapped to the same bounded score) without
//! touching this module. Given a fixed lexicon, every function here is
//! deterministic.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::types::{SentimentDistribution, SocialPost};

/// Score above which a post counts as positive (below the negation,
/// negative).
const POSITIVE_CUTOFF: f64 = 0.2;

/// Distribution reported when there are no posts to aggregate.
///
/// A mild positive lean reflects that silence about a player is more
/// often benign than hostile. Kept from the original behavior; callers
/// that prefer to treat "no posts" as an error should check emptiness
/// before aggregating.
const DEFAULT_DISTRIBUTION: SentimentDistribution = SentimentDistribution {
    positive: 0.5,
    neutral: 0.3,
    negative: 0.2,
};

/// How many topics `extract_topics` reports.
const TOP_TOPICS: usize = 3;

/// Positive/negative word lists used for hit counting.
#[derive(Debug, Clone)]
pub struct Lexicon {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            positive: ["great", "amazing", "fantastic", "awesome"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            negative: ["bad", "terrible", "worst", "horrible"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Keyword-driven sentiment analyzer.
///
/// Construct one per lexicon/topic configuration and pass it to
/// callers explicitly; there is no module-level instance.
#[derive(Debug, Clone)]
pub struct SentimentAnalyzer {
    lexicon: Lexicon,
    topics: FxHashMap<String, Vec<String>>,
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        let mut topics = FxHashMap::default();
        topics.insert(
            "performance".to_string(),
            vec!["stats", "game", "play", "score"]
                .into_iter()
                .map(String::from)
                .collect(),
        );
        topics.insert(
            "injury".to_string(),
            vec!["hurt", "injury", "recovery"]
                .into_iter()
                .map(String::from)
                .collect(),
        );
        topics.insert(
            "team".to_string(),
            vec!["trade", "contract", "team"]
                .into_iter()
                .map(String::from)
                .collect(),
        );
        Self {
            lexicon: Lexicon::default(),
            topics,
        }
    }
}

impl SentimentAnalyzer {
    pub fn new(lexicon: Lexicon, topics: FxHashMap<String, Vec<String>>) -> Self {
        Self { lexicon, topics }
    }

    /// Score a single post in [-1, 1].
    ///
    /// score = (positive hits - negative hits) / (hits + 1). Each
    /// lexicon word counts at most once per post (substring match,
    /// case-insensitive).
    pub fn score_post(&self, text: &str) -> f64 {
        let lowered = text.to_lowercase();
        let positive = self
            .lexicon
            .positive
            .iter()
            .filter(|w| lowered.contains(w.as_str()))
            .count() as f64;
        let negative = self
            .lexicon
            .negative
            .iter()
            .filter(|w| lowered.contains(w.as_str()))
            .count() as f64;

        (positive - negative) / (positive + negative + 1.0)
    }

    /// Classify each post and report the positive/neutral/negative
    /// fractions.
    ///
    /// Empty input returns the documented default distribution
    /// (0.5 / 0.3 / 0.2) rather than failing.
    pub fn aggregate(&self, posts: &[SocialPost]) -> SentimentDistribution {
        if posts.is_empty() {
            debug!("no posts to aggregate, returning default sentiment distribution");
            return DEFAULT_DISTRIBUTION;
        }

        let total = posts.len() as f64;
        let scores: Vec<f64> = posts.iter().map(|p| self.score_post(&p.content)).collect();

        SentimentDistribution {
            positive: scores.iter().filter(|s| **s > POSITIVE_CUTOFF).count() as f64 / total,
            neutral: scores.iter().filter(|s| s.abs() <= POSITIVE_CUTOFF).count() as f64 / total,
            negative: scores.iter().filter(|s| **s < -POSITIVE_CUTOFF).count() as f64 / total,
        }
    }

    /// Mean post score; 0.0 (neutral) when there are no posts.
    pub fn average_score(&self, posts: &[SocialPost]) -> f64 {
        if posts.is_empty() {
            return 0.0;
        }
        posts.iter().map(|p| self.score_post(&p.content)).sum::<f64>() / posts.len() as f64
    }

    /// Top discussion topics by post count, descending.
    ///
    /// A post counts toward a topic when it contains any of that
    /// topic's keywords. Ties break alphabetically so the ordering is
    /// deterministic. At most three topics are returned.
    pub fn extract_topics(&self, posts: &[SocialPost]) -> Vec<String> {
        let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
        for post in posts {
            let lowered = post.content.to_lowercase();
            for (topic, keywords) in &self.topics {
                if keywords.iter().any(|k| lowered.contains(k.as_str())) {
                    *counts.entry(topic.as_str()).or_insert(0) += 1;
                }
            }
        }

        let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
            .into_iter()
            .take(TOP_TOPICS)
            .map(|(topic, _)| topic.to_string())
            .collect()
    }
}
