//! Forbidden-word screening for user supplied text.
//!
//! The word list lives behind [`WordSource`] and is cached in [`ForbiddenWords`],
//! which services receive explicitly. Call [`ForbiddenWords::refresh`] after the
//! backing list changes.

use std::collections::BTreeSet;
use std::sync::{PoisonError, RwLock};

use tracing::info;

/// Backing store of the moderation word list.
pub trait WordSource: Send + Sync {
    fn load_words(&self) -> Result<Vec<String>, ModerationError>;
}

/// Fixed list, typically seeded from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticWordSource {
    words: Vec<String>,
}

impl StaticWordSource {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }
}

impl WordSource for StaticWordSource {
    fn load_words(&self) -> Result<Vec<String>, ModerationError> {
        Ok(self.words.clone())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ModerationError {
    #[error("word list unavailable: {0}")]
    Source(String),
    #[error("text contains forbidden word '{0}'")]
    ForbiddenWord(String),
}

pub struct ForbiddenWords {
    source: Box<dyn WordSource>,
    words: RwLock<BTreeSet<String>>,
}

impl ForbiddenWords {
    pub fn load(source: impl WordSource + 'static) -> Result<Self, ModerationError> {
        let cache = Self {
            source: Box::new(source),
            words: RwLock::new(BTreeSet::new()),
        };
        cache.refresh()?;
        Ok(cache)
    }

    /// Cache that never rejects anything.
    pub fn empty() -> Self {
        Self {
            source: Box::new(StaticWordSource::default()),
            words: RwLock::new(BTreeSet::new()),
        }
    }

    /// Reload the list from the source, returning the number of cached words.
    pub fn refresh(&self) -> Result<usize, ModerationError> {
        let loaded: BTreeSet<String> = self
            .source
            .load_words()?
            .into_iter()
            .map(|word| word.trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();
        let count = loaded.len();

        *self.words.write().unwrap_or_else(PoisonError::into_inner) = loaded;
        info!(words = count, "moderation word list refreshed");
        Ok(count)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&word.trim().to_lowercase())
    }

    /// First token of `text` that is on the list.
    pub fn find_in(&self, text: &str) -> Option<String> {
        let words = self.words.read().unwrap_or_else(PoisonError::into_inner);
        if words.is_empty() {
            return None;
        }

        text.split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .map(str::to_lowercase)
            .find(|token| words.contains(token))
    }

    pub fn screen(&self, text: &str) -> Result<(), ModerationError> {
        match self.find_in(text) {
            Some(word) => Err(ModerationError::ForbiddenWord(word)),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for ForbiddenWords {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self
            .words
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("ForbiddenWords")
            .field("words", &count)
            .finish()
    }
}
