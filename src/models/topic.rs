use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Topic {
    pub name: String,
    pub popularity: u8,
    pub category: String,
    pub trending: bool,
    pub keywords: Vec<String>,
    pub related_topics: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Engagement {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

impl Engagement {
    /// Rough average engagement score used for category insights.
    pub fn score(self) -> u8 {
        match self {
            Engagement::Low => 40,
            Engagement::Medium => 65,
            Engagement::High => 85,
            Engagement::VeryHigh => 95,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub name: String,
    pub description: String,
    pub engagement: Engagement,
    pub icon: String,
    pub examples: Vec<String>,
    pub best_time_to_post: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInsights {
    pub best_time_to_post: Vec<String>,
    pub average_engagement: u8,
    pub recommended_hashtags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub style: String,
}
