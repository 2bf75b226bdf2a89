//! Persisted UI preferences.

use crate::storage::{keys, KeyValueStore};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::warn;

/// Supported UI languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    En,
    /// Portuguese.
    Pt,
}

impl Language {
    /// Wire/storage value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Pt => "pt",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::En),
            "pt" => Ok(Self::Pt),
            other => Err(format!("Unsupported language: {}", other)),
        }
    }
}

/// Best-effort preference storage.
///
/// Preferences are never worth failing over: unreadable or unknown values read as
/// unset, and write failures are logged and dropped.
#[derive(Debug, Clone)]
pub struct Preferences {
    store: Arc<dyn KeyValueStore>,
}

impl Preferences {
    /// Create over an existing store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Stored language, if any.
    pub fn language(&self) -> Option<Language> {
        self.store
            .get(keys::LANGUAGE)
            .ok()
            .flatten()
            .and_then(|value| value.parse().ok())
    }

    /// Store the language choice.
    pub fn set_language(&self, language: Language) {
        if let Err(e) = self.store.set(keys::LANGUAGE, language.to_string()) {
            warn!(%language, error = %e, "Failed to persist language preference");
        }
    }
}
