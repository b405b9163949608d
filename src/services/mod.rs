mod catalog;
mod content_fetcher;

pub use catalog::Catalog;
pub use content_fetcher::{ContentFetcher, ExtractedContent};
