use anyhow::{Context, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::config::Config;
use crate::normalize::{display_title, encode_query_title};

/// Where a summary can be looked up, in the order they are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupStrategy {
    /// `GET {rest}/page/summary/{title}`
    RestSummary,
    /// `GET {api}?action=query&prop=extracts&exintro...`
    ActionQuery,
}

pub const LOOKUP_ORDER: [LookupStrategy; 2] =
    [LookupStrategy::RestSummary, LookupStrategy::ActionQuery];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The endpoint answered; the extract may still be missing.
    Resolved(Option<String>),
    /// Transport error, bad status or unreadable body. Try the next strategy.
    Unavailable,
}

/// Result of a summary lookup. `extract` is `None` when every strategy failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedSummary {
    pub display_title: String,
    pub extract: Option<String>,
}

#[derive(Deserialize)]
struct RestSummary {
    extract: Option<String>,
}

#[derive(Deserialize)]
struct ActionResponse {
    query: Option<ActionQuery>,
}

#[derive(Deserialize)]
struct ActionQuery {
    #[serde(default)]
    pages: HashMap<String, ActionPage>,
}

#[derive(Deserialize)]
struct ActionPage {
    extract: Option<String>,
}

pub struct WikiClient {
    client: Client,
    listing_url: String,
    rest_base_url: String,
    action_api_url: String,
    request_timeout: Duration,
}

impl WikiClient {
    pub fn new(config: &Config) -> Result<Self> {
        // No client-wide timeout: the listing request is allowed to take its time.
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            listing_url: config.listing_url.clone(),
            rest_base_url: config.rest_base_url.trim_end_matches('/').to_string(),
            action_api_url: config.action_api_url.clone(),
            request_timeout: config.request_timeout,
        })
    }

    /// Download the Featured Articles listing page.
    pub async fn fetch_listing(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.listing_url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch listing page {}", self.listing_url))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Listing page {} returned error: {}", self.listing_url, status);
        }

        response
            .text()
            .await
            .context("Failed to read listing page body")
    }

    /// Look up the introductory extract for a raw listing title. Never fails;
    /// every error path ends in an absent extract.
    pub async fn fetch_summary(&self, raw_title: &str) -> FetchedSummary {
        let display_title = display_title(raw_title);
        let encoded = encode_query_title(raw_title);

        for strategy in LOOKUP_ORDER {
            if let LookupOutcome::Resolved(extract) =
                self.lookup(strategy, &encoded, &display_title).await
            {
                return FetchedSummary {
                    display_title,
                    extract,
                };
            }
        }

        FetchedSummary {
            display_title,
            extract: None,
        }
    }

    pub async fn lookup(
        &self,
        strategy: LookupStrategy,
        encoded_title: &str,
        display_title: &str,
    ) -> LookupOutcome {
        match strategy {
            LookupStrategy::RestSummary => {
                let url = format!("{}/page/summary/{}", self.rest_base_url, encoded_title);
                match self.get_json::<RestSummary>(&url, "REST", display_title).await {
                    Some(body) => LookupOutcome::Resolved(body.extract),
                    None => LookupOutcome::Unavailable,
                }
            }
            LookupStrategy::ActionQuery => {
                let url = format!(
                    "{}?action=query&prop=extracts&exintro=true&explaintext=true&format=json&titles={}",
                    self.action_api_url, encoded_title
                );
                let pages = self
                    .get_json::<ActionResponse>(&url, "Fallback", display_title)
                    .await
                    .and_then(|body| body.query)
                    .map(|query| query.pages)
                    .unwrap_or_default();

                // A single title was requested, so there is at most one page.
                match pages.into_values().next() {
                    Some(page) => LookupOutcome::Resolved(page.extract),
                    None => LookupOutcome::Unavailable,
                }
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        label: &str,
        display_title: &str,
    ) -> Option<T> {
        let response = match self
            .client
            .get(url)
            .timeout(self.request_timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("{} network error for {}: {}", label, display_title, e);
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                "{} lookup failed for {} ({})",
                label,
                display_title,
                status.as_u16()
            );
            return None;
        }

        match response.json::<T>().await {
            Ok(body) => Some(body),
            Err(e) => {
                tracing::debug!("{} response for {} was unreadable: {}", label, display_title, e);
                None
            }
        }
    }
}
