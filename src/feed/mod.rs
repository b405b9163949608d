mod fetcher;
pub mod tags;

pub use fetcher::NewsFetcher;
