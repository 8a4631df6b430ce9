use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::config::Config;
use crate::normalize::word_count;

/// One entry of the output dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    pub title: String,
    pub summary: String,
    pub word_count: usize,
}

impl SummaryRecord {
    /// Build a record from an already normalized summary, refusing texts whose
    /// word count falls outside the configured bounds.
    pub fn build(
        title: impl Into<String>,
        summary: impl Into<String>,
        config: &Config,
    ) -> Result<Self, SkipReason> {
        let summary = summary.into();
        let count = word_count(&summary);

        if count < config.min_words || count > config.max_words {
            return Err(SkipReason::WordCount { count });
        }

        Ok(Self {
            title: title.into(),
            summary,
            word_count: count,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    Namespace,
    NonAscii,
}

impl RejectReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RejectReason::Namespace => "namespace",
            RejectReason::NonAscii => "non-ascii",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A listing link that was not accepted as an article title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedTitle {
    pub title: String,
    pub reason: RejectReason,
}

/// Why a sampled title produced no record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoExtract,
    NonLatin,
    WordCount { count: usize },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoExtract => f.write_str("no extract available"),
            SkipReason::NonLatin => f.write_str("too many non-ASCII characters"),
            SkipReason::WordCount { count } => write!(f, "word count {} out of bounds", count),
        }
    }
}

/// Outcome of a complete run
#[derive(Debug)]
pub struct RunSummary {
    /// Titles accepted from the listing page before sampling.
    pub candidates: usize,
    pub sampled: usize,
    pub records: Vec<SummaryRecord>,
    pub skipped: Vec<(String, SkipReason)>,
    pub output_path: PathBuf,
}
