// Public modules
pub mod config;
pub mod io;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod titles;
pub mod wikipedia;

// Re-export commonly used types
pub use config::Config;
pub use io::save_dataset;
pub use models::{RejectReason, RejectedTitle, RunSummary, SkipReason, SummaryRecord};
pub use normalize::{display_title, encode_query_title, normalize_text, query_title, word_count};
pub use pipeline::{process_extract, sample_titles, Pipeline};
pub use titles::{classify_title, extract_titles, TitleExtraction};
pub use wikipedia::{FetchedSummary, LookupOutcome, LookupStrategy, WikiClient, LOOKUP_ORDER};
