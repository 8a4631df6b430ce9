use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use url::Url;

pub const DEFAULT_USER_AGENT: &str = "FeaturedFetcher/1.0 (your_email@example.com)";

/// Everything the pipeline needs to know, passed explicitly into each component.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listing page that links every Featured Article.
    pub listing_url: String,
    /// Base of the REST API; summaries live under `/page/summary/{title}`.
    pub rest_base_url: String,
    /// Action API endpoint used as the summary fallback.
    pub action_api_url: String,
    pub user_agent: String,
    /// How many shuffled titles are looked up per run.
    pub sample_size: usize,
    /// Pause after every processed title, accepted or not.
    pub pacing_delay: Duration,
    /// Applies to summary lookups only; the listing request has none.
    pub request_timeout: Duration,
    pub min_words: usize,
    pub max_words: usize,
    /// Non-ASCII characters tolerated after accent stripping.
    pub max_non_ascii: usize,
    /// Rejected titles echoed in the extraction report.
    pub rejected_sample_limit: usize,
    pub output_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listing_url: "https://en.wikipedia.org/wiki/Wikipedia:Featured_articles".to_string(),
            rest_base_url: "https://en.wikipedia.org/api/rest_v1".to_string(),
            action_api_url: "https://en.wikipedia.org/w/api.php".to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            sample_size: 50,
            pacing_delay: Duration::from_millis(250),
            request_timeout: Duration::from_secs(10),
            min_words: 30,
            max_words: 120,
            max_non_ascii: 5,
            rejected_sample_limit: 40,
            output_path: PathBuf::from("assets/featured_summaries.json"),
        }
    }
}

impl Config {
    /// Defaults, overridden by any `FEATURED_*` variables found in the
    /// environment or a `.env` file.
    pub fn from_env() -> Result<Self> {
        Self::try_load_dotenv();

        let mut config = Self::default();

        if let Some(url) = env_url("FEATURED_LISTING_URL")? {
            config.listing_url = url;
        }
        if let Some(url) = env_url("FEATURED_REST_BASE_URL")? {
            config.rest_base_url = url;
        }
        if let Some(url) = env_url("FEATURED_ACTION_API_URL")? {
            config.action_api_url = url;
        }
        if let Ok(user_agent) = env::var("FEATURED_USER_AGENT") {
            config.user_agent = user_agent;
        }
        if let Some(sample_size) = env_parse("FEATURED_SAMPLE_SIZE")? {
            config.sample_size = sample_size;
        }
        if let Some(millis) = env_parse("FEATURED_PACING_MS")? {
            config.pacing_delay = Duration::from_millis(millis);
        }
        if let Some(secs) = env_parse("FEATURED_TIMEOUT_SECS")? {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Ok(path) = env::var("FEATURED_OUTPUT_PATH") {
            config.output_path = PathBuf::from(path);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_size == 0 {
            anyhow::bail!("Sample size must be at least 1");
        }
        if self.min_words > self.max_words {
            anyhow::bail!(
                "Word count bounds are inverted: min {} > max {}",
                self.min_words,
                self.max_words
            );
        }
        Ok(())
    }

    fn try_load_dotenv() {
        // 1. Current directory
        if dotenvy::dotenv().is_ok() {
            return;
        }

        // 2. ~/.config/featured-fetcher/.env
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("featured-fetcher").join(".env");
            if config_path.exists() && dotenvy::from_path(&config_path).is_ok() {
                return;
            }
        }

        // 3. ~/.env
        if let Some(home_dir) = dirs::home_dir() {
            let home_path = home_dir.join(".env");
            if home_path.exists() {
                let _ = dotenvy::from_path(&home_path);
            }
        }
    }
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        Err(_) => Ok(None),
    }
}

fn env_url(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(raw) => {
            let url = Url::parse(raw.trim())
                .with_context(|| format!("{} is not a valid URL: {:?}", key, raw))?;
            Ok(Some(url.as_str().trim_end_matches('/').to_string()))
        }
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_constants() {
        let config = Config::default();
        assert_eq!(config.sample_size, 50);
        assert_eq!(config.pacing_delay, Duration::from_millis(250));
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert_eq!((config.min_words, config.max_words), (30, 120));
        assert_eq!(config.max_non_ascii, 5);
        assert_eq!(config.rejected_sample_limit, 40);
        assert_eq!(
            config.output_path,
            PathBuf::from("assets/featured_summaries.json")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_inverted_bounds_and_empty_sample() {
        let inverted = Config {
            min_words: 121,
            ..Config::default()
        };
        assert!(inverted.validate().is_err());

        let empty = Config {
            sample_size: 0,
            ..Config::default()
        };
        assert!(empty.validate().is_err());
    }

    #[test]
    fn env_helpers_parse_and_report_bad_values() {
        env::set_var("FEATURED_TEST_NUMBER", " 12 ");
        env::set_var("FEATURED_TEST_BAD_NUMBER", "twelve");
        env::set_var("FEATURED_TEST_URL", "http://localhost:8080/api/");
        env::set_var("FEATURED_TEST_BAD_URL", "not a url");

        assert_eq!(env_parse::<usize>("FEATURED_TEST_NUMBER").unwrap(), Some(12));
        assert!(env_parse::<usize>("FEATURED_TEST_BAD_NUMBER").is_err());
        assert_eq!(env_parse::<usize>("FEATURED_TEST_UNSET").unwrap(), None);
        assert_eq!(
            env_url("FEATURED_TEST_URL").unwrap().as_deref(),
            Some("http://localhost:8080/api")
        );
        assert!(env_url("FEATURED_TEST_BAD_URL").is_err());
    }
}
