use crate::ai::PostGenerator;
use crate::feed::NewsFetcher;
use crate::services::{Catalog, ContentFetcher};

pub struct AppState {
    pub generator: PostGenerator,
    pub news: NewsFetcher,
    pub content: ContentFetcher,
    pub catalog: Catalog,
}
