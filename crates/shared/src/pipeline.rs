//! The fetch run: listing page -> shuffled sample -> summaries -> dataset.
//!
//! Titles are processed one at a time with a fixed pause after each, so a
//! run never issues more than two summary requests per sampled title.
//! Per-title problems only drop that title; the listing fetch and the final
//! write are the only fatal steps.

use anyhow::{Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::Config;
use crate::io::save_dataset;
use crate::models::{RunSummary, SkipReason, SummaryRecord};
use crate::normalize::normalize_text;
use crate::titles::extract_titles;
use crate::wikipedia::WikiClient;

/// Shuffle every candidate and keep the first `sample_size`.
pub fn sample_titles<R: Rng + ?Sized>(
    mut titles: Vec<String>,
    sample_size: usize,
    rng: &mut R,
) -> Vec<String> {
    titles.shuffle(rng);
    titles.truncate(sample_size);
    titles
}

/// Turn a fetched extract into a record, or say why it was dropped.
pub fn process_extract(
    display_title: &str,
    extract: Option<&str>,
    config: &Config,
) -> Result<SummaryRecord, SkipReason> {
    let extract = extract
        .filter(|text| !text.is_empty())
        .ok_or(SkipReason::NoExtract)?;

    let normalized = normalize_text(extract, config.max_non_ascii).ok_or(SkipReason::NonLatin)?;

    SummaryRecord::build(display_title, normalized, config)
}

pub struct Pipeline<R> {
    config: Config,
    client: WikiClient,
    rng: R,
}

impl<R: Rng> Pipeline<R> {
    pub fn new(config: Config, rng: R) -> Result<Self> {
        config.validate()?;
        let client = WikiClient::new(&config)?;

        Ok(Self {
            config,
            client,
            rng,
        })
    }

    /// Run everything except the final write.
    pub async fn collect(&mut self) -> Result<RunSummary> {
        let html = self
            .client
            .fetch_listing()
            .await
            .context("Could not load the Featured Articles listing")?;

        let extraction = extract_titles(&html)?;
        extraction.log_report(self.config.rejected_sample_limit);

        let candidates = extraction.titles.len();
        let sample = sample_titles(extraction.titles, self.config.sample_size, &mut self.rng);
        let total = sample.len();

        let mut records = Vec::new();
        let mut skipped = Vec::new();

        for (i, title) in sample.iter().enumerate() {
            tracing::info!("[{}/{}] {}", i + 1, total, title);

            let fetched = self.client.fetch_summary(title).await;
            match process_extract(&fetched.display_title, fetched.extract.as_deref(), &self.config)
            {
                Ok(record) => records.push(record),
                Err(reason) => {
                    tracing::debug!("Skipping {}: {}", fetched.display_title, reason);
                    skipped.push((fetched.display_title, reason));
                }
            }

            tokio::time::sleep(self.config.pacing_delay).await;
        }

        Ok(RunSummary {
            candidates,
            sampled: total,
            records,
            skipped,
            output_path: self.config.output_path.clone(),
        })
    }

    /// Collect a fresh dataset and write it to the configured output path.
    pub async fn run(&mut self) -> Result<RunSummary> {
        let summary = self.collect().await?;

        save_dataset(&summary.records, &summary.output_path)?;

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn titles(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("Title_{}", i)).collect()
    }

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn sample_is_a_bounded_subset() {
        let mut rng = StdRng::seed_from_u64(1);
        let sample = sample_titles(titles(80), 50, &mut rng);

        assert_eq!(sample.len(), 50);
        let mut unique = sample.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 50);
        assert!(sample.iter().all(|t| titles(80).contains(t)));
    }

    #[test]
    fn sample_smaller_pool_keeps_everything() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut sample = sample_titles(titles(3), 50, &mut rng);
        sample.sort();
        assert_eq!(sample, titles(3));
    }

    #[test]
    fn same_seed_gives_same_sample() {
        let a = sample_titles(titles(100), 10, &mut StdRng::seed_from_u64(42));
        let b = sample_titles(titles(100), 10, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn accepted_extract_becomes_record() {
        let config = Config::default();
        let text = "The quick brown fox jumps over the lazy dog while the farmer watches \
                    from the porch and wonders whether the dog will ever wake up before \
                    the sun goes down tonight";
        let record = process_extract("Fox", Some(text), &config).unwrap();

        assert_eq!(record.word_count, 31);
        assert_eq!(record.summary, text);
        assert_eq!(record.title, "Fox");
    }

    #[test]
    fn accents_are_stripped_before_counting() {
        let config = Config::default();
        let text = format!("Café {}", words(34));
        let record = process_extract("Cafe", Some(&text), &config).unwrap();

        assert!(record.summary.starts_with("Cafe word"));
        assert_eq!(record.word_count, 35);
    }

    #[test]
    fn short_long_and_missing_extracts_are_skipped() {
        let config = Config::default();

        assert_eq!(
            process_extract("Short", Some(&words(20)), &config),
            Err(SkipReason::WordCount { count: 20 })
        );
        assert_eq!(
            process_extract("Long", Some(&words(121)), &config),
            Err(SkipReason::WordCount { count: 121 })
        );
        assert_eq!(
            process_extract("Missing", None, &config),
            Err(SkipReason::NoExtract)
        );
        assert_eq!(
            process_extract("Empty", Some(""), &config),
            Err(SkipReason::NoExtract)
        );
    }

    #[test]
    fn non_latin_extract_is_skipped() {
        let config = Config::default();
        let text = format!("{} Ελληνικά", words(40));
        assert_eq!(
            process_extract("Greek", Some(&text), &config),
            Err(SkipReason::NonLatin)
        );
    }
}
