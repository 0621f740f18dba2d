pub mod config;
pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod form;
pub mod model;
pub mod pipeline;
pub mod presenter;
pub mod states;
pub mod url_builder;

// Exporting types for convenience
pub use config::SiteConfig;
pub use error::SearchError;
pub use extractor::Extractor;
pub use fetcher::{FetchFailure, FetchResult, HttpFetcher, PageFetcher};
pub use form::InputCollector;
pub use model::{JobListing, SearchRequest};
pub use pipeline::{Pipeline, RunOutcome, Stage};
pub use presenter::{BrowserLauncher, StdoutLauncher, SystemBrowser};
pub use url_builder::{build_location, build_query, build_search_url, UrlBuilder};
