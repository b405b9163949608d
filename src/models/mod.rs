mod article;
mod post;
mod request;
mod topic;

pub use article::Article;
pub use post::{format_hashtag, ContentSource, Generated, PostDraft};
pub use request::GenerationRequest;
pub use topic::{Category, CategoryInsights, Engagement, ThumbnailTemplate, Topic};
