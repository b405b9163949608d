use std::time::Duration;

use chrono::Utc;
use reqwest::Client;

use super::tags;
use crate::config::FeedSource;
use crate::error::{AppError, Result};
use crate::models::Article;

pub struct NewsFetcher {
    client: Client,
    feeds: Vec<FeedSource>,
}

impl NewsFetcher {
    pub fn new(feeds: Vec<FeedSource>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .user_agent("post-wizard/1.0")
            .build()?;

        Ok(Self { client, feeds })
    }

    pub async fn fetch_feed(&self, feed: &FeedSource) -> Result<Vec<Article>> {
        let response = self.client.get(&feed.url).send().await?;

        if !response.status().is_success() {
            return Err(AppError::UpstreamStatus {
                status: response.status().as_u16(),
                body: format!("Failed to fetch feed {}", feed.url),
            });
        }

        let markup = response.text().await?;
        Ok(articles_from_markup(&markup, &feed.name))
    }

    /// Headlines from the configured feeds, in order, or the built-in list when none yield any.
    pub async fn latest(&self) -> Vec<Article> {
        let mut articles = Vec::with_capacity(tags::MAX_ITEMS);

        for feed in &self.feeds {
            if articles.len() >= tags::MAX_ITEMS {
                break;
            }
            match self.fetch_feed(feed).await {
                Ok(found) => {
                    tracing::debug!("Fetched {} articles from {}", found.len(), feed.name);
                    articles.extend(found);
                }
                Err(e) => tracing::warn!("Failed to fetch {}: {}", feed.url, e),
            }
        }

        if articles.is_empty() {
            tracing::info!("No articles from feeds, using fallback list");
            return fallback_articles();
        }

        articles.truncate(tags::MAX_ITEMS);
        articles
    }
}

/// Articles from raw feed markup, named after the channel title when it has one.
pub fn articles_from_markup(markup: &str, default_source: &str) -> Vec<Article> {
    let source = tags::channel_title(markup).unwrap_or_else(|| default_source.to_string());
    tags::scan_items(markup, &source).collect()
}

pub fn fallback_articles() -> Vec<Article> {
    let now = Utc::now();
    [
        (
            "AI Revolution in Software Development",
            "How artificial intelligence is transforming the way we write and deploy code, making developers more productive than ever.",
            "TechCrunch",
        ),
        (
            "Machine Learning Breakthrough in Healthcare",
            "New ML algorithms are helping doctors diagnose diseases faster and more accurately than traditional methods.",
            "MIT Technology Review",
        ),
        (
            "Data Science Trends Shaping the Year",
            "From automated ML to ethical AI, discover the key trends that are defining the future of data science.",
            "Harvard Business Review",
        ),
        (
            "The Rise of Large Language Models",
            "How GPT and similar models are revolutionizing natural language processing and changing entire industries.",
            "Nature",
        ),
        (
            "Quantum Computing Meets Machine Learning",
            "Exploring the intersection of quantum computing and AI, and what it means for the future of computation.",
            "IEEE Spectrum",
        ),
        (
            "Ethics in AI: Building Responsible Systems",
            "Best practices for developing AI systems that are fair, transparent, and accountable to society.",
            "AI Ethics Journal",
        ),
        (
            "Deep Learning in Computer Vision",
            "Latest advances in neural networks are pushing the boundaries of what machines can see and understand.",
            "Computer Vision Research",
        ),
        (
            "Data Privacy in the Age of Big Data",
            "Balancing data utility with privacy protection as organizations collect unprecedented amounts of information.",
            "Privacy International",
        ),
        (
            "AutoML: Democratizing Machine Learning",
            "How automated machine learning tools are making AI accessible to non-experts and transforming industries.",
            "Google AI Blog",
        ),
        (
            "The Future of Data Engineering",
            "Modern data pipelines and infrastructure that power today's AI and machine learning applications.",
            "Data Engineering Weekly",
        ),
    ]
    .into_iter()
    .map(|(title, description, source)| Article::new(title, description, "#", now, source))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_list_is_full_and_short_enough() {
        let articles = fallback_articles();
        assert_eq!(articles.len(), tags::MAX_ITEMS);
        assert!(articles
            .iter()
            .all(|a| a.description.chars().count() <= tags::DESCRIPTION_LIMIT));
    }

    #[test]
    fn source_prefers_channel_title() {
        let markup = "<rss><channel><title>Feed Name</title>\
                      <item><title>One</title></item></channel></rss>";
        let articles = articles_from_markup(markup, "Configured");
        assert_eq!(articles[0].source.name, "Feed Name");

        let articles = articles_from_markup("<item><title>One</title></item>", "Configured");
        assert_eq!(articles[0].source.name, "Configured");
    }

    #[tokio::test]
    async fn unreachable_feeds_use_the_fallback_list() {
        let fetcher = NewsFetcher::new(
            vec![FeedSource {
                name: "Nowhere".to_string(),
                url: "http://127.0.0.1:9/feed".to_string(),
            }],
            Duration::from_secs(2),
        )
        .unwrap();

        let articles = fetcher.latest().await;
        assert_eq!(articles, fallback_articles_with_time(&articles));
    }

    fn fallback_articles_with_time(actual: &[Article]) -> Vec<Article> {
        let mut expected = fallback_articles();
        for (e, a) in expected.iter_mut().zip(actual) {
            e.published_at = a.published_at;
        }
        expected
    }
}
