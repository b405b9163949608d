use crate::models::{
    format_hashtag, Category, CategoryInsights, Engagement, ThumbnailTemplate, Topic,
};

const MAX_RELATED: usize = 5;

/// Built-in topics, post categories and thumbnail templates.
#[derive(Debug, Clone)]
pub struct Catalog {
    topics: Vec<Topic>,
    categories: Vec<Category>,
    templates: Vec<ThumbnailTemplate>,
}

fn topic(
    name: &str,
    popularity: u8,
    category: &str,
    trending: bool,
    keywords: &[&str],
    related: &[&str],
) -> Topic {
    Topic {
        name: name.to_string(),
        popularity,
        category: category.to_string(),
        trending,
        keywords: keywords.iter().map(|s| s.to_string()).collect(),
        related_topics: related.iter().map(|s| s.to_string()).collect(),
    }
}

fn category(
    name: &str,
    description: &str,
    engagement: Engagement,
    icon: &str,
    examples: &[&str],
    best_times: &[&str],
) -> Category {
    Category {
        name: name.to_string(),
        description: description.to_string(),
        engagement,
        icon: icon.to_string(),
        examples: examples.iter().map(|s| s.to_string()).collect(),
        best_time_to_post: best_times.iter().map(|s| s.to_string()).collect(),
    }
}

fn template(id: &str, name: &str, description: &str, style: &str) -> ThumbnailTemplate {
    ThumbnailTemplate {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        style: style.to_string(),
    }
}

impl Default for Catalog {
    fn default() -> Self {
        let topics = vec![
            topic(
                "AI & Machine Learning",
                95,
                "Technology",
                true,
                &["ai", "ml", "llm", "neural networks"],
                &["Data Analytics", "Tech Innovation"],
            ),
            topic(
                "Remote Work",
                88,
                "Workplace",
                true,
                &["hybrid", "distributed teams", "wfh"],
                &["Productivity", "Mental Health"],
            ),
            topic(
                "Startup Growth",
                82,
                "Business",
                false,
                &["founders", "scaling", "fundraising"],
                &["Leadership", "Industry Insights"],
            ),
            topic(
                "Digital Marketing",
                90,
                "Marketing",
                true,
                &["seo", "content", "social media"],
                &["Personal Branding"],
            ),
            topic(
                "Leadership",
                85,
                "Professional",
                false,
                &["management", "teams", "culture"],
                &["Career Development", "Startup Growth"],
            ),
            topic(
                "Tech Innovation",
                92,
                "Technology",
                true,
                &["emerging tech", "r&d", "product"],
                &["AI & Machine Learning", "Blockchain"],
            ),
            topic(
                "Career Development",
                87,
                "Professional",
                false,
                &["skills", "mentoring", "promotion"],
                &["Leadership", "Personal Branding"],
            ),
            topic(
                "Productivity",
                80,
                "Lifestyle",
                false,
                &["habits", "focus", "time management"],
                &["Remote Work"],
            ),
            topic(
                "Industry Insights",
                75,
                "Business",
                false,
                &["market", "trends", "analysis"],
                &["Startup Growth"],
            ),
            topic(
                "Personal Branding",
                83,
                "Marketing",
                false,
                &["linkedin", "networking", "storytelling"],
                &["Career Development", "Digital Marketing"],
            ),
            topic(
                "Cybersecurity",
                89,
                "Technology",
                true,
                &["security", "privacy", "zero trust"],
                &["Blockchain"],
            ),
            topic(
                "Sustainability",
                78,
                "Environment",
                false,
                &["climate", "esg", "green tech"],
                &[],
            ),
            topic(
                "Data Analytics",
                86,
                "Technology",
                false,
                &["data", "bi", "dashboards", "metrics"],
                &["AI & Machine Learning"],
            ),
            topic(
                "Mental Health",
                84,
                "Wellness",
                false,
                &["burnout", "wellbeing", "balance"],
                &["Remote Work"],
            ),
            topic(
                "Blockchain",
                77,
                "Technology",
                false,
                &["crypto", "web3", "ledger"],
                &["Cybersecurity"],
            ),
        ];

        let categories = vec![
            category(
                "One Slide Wisdom",
                "Share knowledge and teach your audience",
                Engagement::High,
                "📚",
                &["How-to guides", "Industry insights", "Best practices"],
                &["8:00 AM", "12:00 PM", "5:00 PM"],
            ),
            category(
                "Code Snippet of the week",
                "Motivate and inspire your network",
                Engagement::VeryHigh,
                "✨",
                &["Success stories", "Motivational quotes", "Personal growth"],
                &["9:00 AM", "1:00 PM"],
            ),
            category(
                "A week in data",
                "Share latest developments and trends",
                Engagement::Medium,
                "📰",
                &["Breaking news", "Market updates", "Company announcements"],
                &["7:30 AM", "11:00 AM", "4:00 PM"],
            ),
            category(
                "One-Minute Metric",
                "Celebrate successes",
                Engagement::Medium,
                "🏆",
                &["Awards", "Certifications", "Company growth"],
                &["10:00 AM", "3:00 PM"],
            ),
        ];

        let templates = vec![
            template(
                "gradient-modern",
                "Modern Gradient",
                "Clean gradient background with bold typography",
                "bg-gradient-to-br from-blue-600 to-purple-600",
            ),
            template(
                "minimal-dark",
                "Minimal Dark",
                "Dark background with white text for professional look",
                "bg-gray-900",
            ),
            template(
                "bright-accent",
                "Bright Accent",
                "White background with colorful accent elements",
                "bg-white border-l-4 border-blue-500",
            ),
            template(
                "tech-grid",
                "Tech Grid",
                "Grid pattern background for tech-focused content",
                "bg-slate-800",
            ),
        ];

        Self::new(topics, categories, templates)
    }
}

impl Catalog {
    pub fn new(
        topics: Vec<Topic>,
        categories: Vec<Category>,
        templates: Vec<ThumbnailTemplate>,
    ) -> Self {
        Self {
            topics,
            categories,
            templates,
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn templates(&self) -> &[ThumbnailTemplate] {
        &self.templates
    }

    pub fn template(&self, id: &str) -> Option<&ThumbnailTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Trending topics, most popular first.
    pub fn trending_topics(&self) -> Vec<&Topic> {
        let mut trending: Vec<&Topic> = self.topics.iter().filter(|t| t.trending).collect();
        trending.sort_by(|a, b| b.popularity.cmp(&a.popularity));
        trending
    }

    /// Case-insensitive match on name or any keyword, optionally restricted to one category.
    pub fn search_topics(&self, query: &str, category: Option<&str>) -> Vec<&Topic> {
        let query = query.trim().to_lowercase();
        self.topics
            .iter()
            .filter(|t| {
                query.is_empty()
                    || t.name.to_lowercase().contains(&query)
                    || t.keywords.iter().any(|k| k.to_lowercase().contains(&query))
            })
            .filter(|t| {
                category.map_or(true, |c| t.category.eq_ignore_ascii_case(c.trim()))
            })
            .collect()
    }

    /// Explicitly related topics plus those sharing its category.
    pub fn related_topics(&self, name: &str) -> Vec<&Topic> {
        let Some(topic) = self.topics.iter().find(|t| t.name == name) else {
            return Vec::new();
        };
        self.topics
            .iter()
            .filter(|t| t.name != topic.name)
            .filter(|t| topic.related_topics.contains(&t.name) || t.category == topic.category)
            .take(MAX_RELATED)
            .collect()
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn category_insights(&self, name: &str) -> Option<CategoryInsights> {
        let category = self.category(name)?;
        let compact: String = category.name.chars().filter(|c| c.is_alphanumeric()).collect();
        Some(CategoryInsights {
            best_time_to_post: category.best_time_to_post.clone(),
            average_engagement: category.engagement.score(),
            recommended_hashtags: vec![
                format_hashtag(&compact),
                "#LinkedIn".to_string(),
                "#Professional".to_string(),
            ],
        })
    }
}
