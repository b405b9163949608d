//! Templated content used whenever the model path fails. Pure and infallible.

use crate::models::format_hashtag;

pub fn titles(topic: &str) -> Vec<String> {
    vec![
        format!("5 Game-Changing {} Trends You Can't Ignore", topic),
        format!("Why {} is Reshaping the Future of Work", topic),
        format!("The Ultimate Guide to {} Success", topic),
    ]
}

pub fn body(topic: &str) -> String {
    format!(
        "Here's what I've learned about {topic} after years in the industry...\n\n\
         🔥 Key insights that changed my perspective\n\
         💡 Practical tips you can implement today\n\
         🚀 Future trends to watch\n\n\
         What's your experience with {topic}?"
    )
}

pub fn cta() -> String {
    "What's your take on this? Share your thoughts below! 👇".to_string()
}

/// Tag made of the alphanumeric characters of `text`, or `None` if there are none.
fn tag_from(text: &str) -> Option<String> {
    let compact: String = text.chars().filter(|c| c.is_alphanumeric()).collect();
    (!compact.is_empty()).then(|| format_hashtag(&compact))
}

pub fn hashtags(topic: &str, category: Option<&str>) -> Vec<String> {
    let mut tags: Vec<String> = Vec::with_capacity(5);
    tags.extend(tag_from(topic));
    tags.extend(category.and_then(tag_from));
    for generic in ["#LinkedIn", "#CareerGrowth", "#Innovation"] {
        tags.push(generic.to_string());
    }
    tags.dedup();
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn templates_embed_the_topic_verbatim() {
        assert!(body("Data Engineering").contains("Data Engineering"));
        assert!(titles("Data Engineering")
            .iter()
            .all(|t| t.contains("Data Engineering")));
        assert!(!cta().is_empty());
    }

    #[test]
    fn hashtags_cover_topic_and_category() {
        assert_eq!(
            hashtags("AI & Machine Learning", Some("One-Minute Metric")),
            vec![
                "#AIMachineLearning",
                "#OneMinuteMetric",
                "#LinkedIn",
                "#CareerGrowth",
                "#Innovation"
            ]
        );
        assert_eq!(
            hashtags("!!!", None),
            vec!["#LinkedIn", "#CareerGrowth", "#Innovation"]
        );
    }

    #[test]
    fn output_is_deterministic() {
        assert_eq!(body("Leadership"), body("Leadership"));
        assert_eq!(
            hashtags("Leadership", Some("One Slide Wisdom")),
            hashtags("Leadership", Some("One Slide Wisdom"))
        );
    }
}
