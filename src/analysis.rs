use std::collections::HashMap;

use tracing::{debug, warn};

use crate::cache::{ResultCache, comments_key, themes_key};
use crate::client::ChatClient;
use crate::error::Result;
use crate::prompts;
use crate::reconcile;

/// Sentiment calls are deterministic; theme extraction allows mild variability.
const SENTIMENT_TEMPERATURE: f32 = 0.0;
const THEME_TEMPERATURE: f32 = 0.3;

/// Labels the model is instructed to use. Anything else is kept verbatim
/// but logged as an anomaly.
const CANONICAL_LABELS: &[&str] = &["Positive", "Neutral", "Negative"];

/// One comment paired with its assessed sentiment label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentimentRecord {
    pub comment: String,
    pub label: String,
}

/// Sequential analysis pipeline over a chat-completion client.
///
/// Results are cached per ordered input list, so re-running the same list
/// issues zero new API calls.
pub struct Analyzer<C> {
    client: C,
    label_cache: ResultCache<Vec<String>>,
    theme_cache: ResultCache<Vec<String>>,
}

impl<C: ChatClient> Analyzer<C> {
    pub fn new(client: C, cache_capacity: usize) -> Self {
        Self {
            client,
            label_cache: ResultCache::new(cache_capacity),
            theme_cache: ResultCache::new(cache_capacity),
        }
    }

    /// Classify each comment in input order, one blocking call per comment.
    pub fn classify(&mut self, comments: &[String]) -> Result<Vec<SentimentRecord>> {
        let key = comments_key(comments);
        if let Some(labels) = self.label_cache.get(key) {
            debug!("label cache hit, skipping classification calls");
            return Ok(pair_records(comments, labels.clone()));
        }

        let mut labels = Vec::with_capacity(comments.len());
        for (index, comment) in comments.iter().enumerate() {
            debug!(index, "classifying comment");
            let reply = self
                .client
                .complete(&prompts::sentiment_messages(comment), SENTIMENT_TEMPERATURE)?;
            let label = reconcile::reconcile_label(&reply);
            if !CANONICAL_LABELS.contains(&label.as_str()) {
                warn!(index, label = %label, "label outside Positive/Neutral/Negative");
            }
            labels.push(label);
        }

        self.label_cache.insert(key, labels.clone());
        Ok(pair_records(comments, labels))
    }

    /// Extract `count` themes with a single call over all comments.
    pub fn extract_themes(&mut self, comments: &[String], count: usize) -> Result<Vec<String>> {
        let key = themes_key(comments, count);
        if let Some(themes) = self.theme_cache.get(key) {
            debug!("theme cache hit, skipping extraction call");
            return Ok(themes.clone());
        }

        let reply = self
            .client
            .complete(&prompts::theme_messages(comments, count), THEME_TEMPERATURE)?;
        let themes = reconcile::reconcile_theme_list(&reply, count)?;

        self.theme_cache.insert(key, themes.clone());
        Ok(themes)
    }
}

fn pair_records(comments: &[String], labels: Vec<String>) -> Vec<SentimentRecord> {
    comments
        .iter()
        .cloned()
        .zip(labels)
        .map(|(comment, label)| SentimentRecord { comment, label })
        .collect()
}

/// Frequency count per distinct label value, ordered by descending count,
/// then label, so output is deterministic.
pub fn distribution(records: &[SentimentRecord]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in records {
        *counts.entry(record.label.as_str()).or_default() += 1;
    }

    let mut dist: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect();
    dist.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    dist
}
