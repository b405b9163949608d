use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::ThumbnailTemplate;

/// Where a generated piece of content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    Model,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated<T> {
    pub value: T,
    pub source: ContentSource,
}

impl<T> Generated<T> {
    pub fn model(value: T) -> Self {
        Self {
            value,
            source: ContentSource::Model,
        }
    }

    pub fn fallback(value: T) -> Self {
        Self {
            value,
            source: ContentSource::Fallback,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == ContentSource::Fallback
    }
}

/// Strips all whitespace and makes sure the tag starts with a single `#`.
pub fn format_hashtag(tag: &str) -> String {
    let cleaned: String = tag.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.starts_with('#') {
        cleaned
    } else {
        format!("#{}", cleaned)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PostDraft {
    pub titles: Vec<String>,
    pub selected_title: String,
    pub body: String,
    pub cta: String,
    pub hashtags: Vec<String>,
    pub custom_hashtags: Vec<String>,
    pub thumbnail_style: Option<String>,
}

impl PostDraft {
    pub fn all_hashtags(&self) -> impl Iterator<Item = &String> {
        self.hashtags.iter().chain(self.custom_hashtags.iter())
    }

    /// Returns false when the tag was blank or already present.
    pub fn add_custom_hashtag(&mut self, tag: &str) -> bool {
        if tag.trim().is_empty() {
            return false;
        }
        let formatted = format_hashtag(tag);
        if self.all_hashtags().any(|t| *t == formatted) {
            return false;
        }
        self.custom_hashtags.push(formatted);
        true
    }

    pub fn remove_hashtag(&mut self, tag: &str, custom: bool) {
        let list = if custom {
            &mut self.custom_hashtags
        } else {
            &mut self.hashtags
        };
        list.retain(|t| t != tag);
    }

    pub fn select_title(&mut self, title: impl Into<String>) {
        self.selected_title = title.into();
    }

    pub fn set_thumbnail(
        &mut self,
        template_id: &str,
        templates: &[ThumbnailTemplate],
    ) -> Result<()> {
        if !templates.iter().any(|t| t.id == template_id) {
            return Err(AppError::InvalidInput(format!(
                "Unknown thumbnail template: {}",
                template_id
            )));
        }
        self.thumbnail_style = Some(template_id.to_string());
        Ok(())
    }

    /// The text the user copies: title, body, CTA and hashtags separated by blank lines.
    pub fn final_text(&self) -> String {
        let hashtags = self
            .all_hashtags()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            "{}\n\n{}\n\n{}\n\n{}",
            self.selected_title, self.body, self.cta, hashtags
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> PostDraft {
        PostDraft {
            titles: vec!["Three lessons".to_string()],
            selected_title: "Three lessons".to_string(),
            body: "Body text.".to_string(),
            cta: "Thoughts?".to_string(),
            hashtags: vec!["#Data".to_string(), "#AI".to_string()],
            ..PostDraft::default()
        }
    }

    #[test]
    fn format_hashtag_strips_whitespace_and_prefixes() {
        assert_eq!(format_hashtag("machine learning"), "#machinelearning");
        assert_eq!(format_hashtag(" #Rust "), "#Rust");
    }

    #[test]
    fn custom_hashtags_skip_blank_and_duplicates() {
        let mut post = draft();
        assert!(post.add_custom_hashtag("Careers"));
        assert!(!post.add_custom_hashtag("   "));
        assert!(!post.add_custom_hashtag("AI"));
        assert!(!post.add_custom_hashtag("#Careers"));
        assert_eq!(post.custom_hashtags, vec!["#Careers"]);
    }

    #[test]
    fn remove_hashtag_targets_one_list() {
        let mut post = draft();
        post.add_custom_hashtag("AI2");
        post.remove_hashtag("#AI", false);
        post.remove_hashtag("#AI2", true);
        assert_eq!(post.hashtags, vec!["#Data"]);
        assert!(post.custom_hashtags.is_empty());
    }

    #[test]
    fn final_text_joins_sections() {
        let mut post = draft();
        post.add_custom_hashtag("Careers");
        assert_eq!(
            post.final_text(),
            "Three lessons\n\nBody text.\n\nThoughts?\n\n#Data #AI #Careers"
        );
    }

    #[test]
    fn unknown_thumbnail_is_rejected() {
        let templates = vec![ThumbnailTemplate {
            id: "minimal-dark".to_string(),
            name: "Minimal Dark".to_string(),
            description: String::new(),
            style: "bg-gray-900".to_string(),
        }];
        let mut post = draft();
        assert!(post.set_thumbnail("minimal-dark", &templates).is_ok());
        assert_eq!(post.thumbnail_style.as_deref(), Some("minimal-dark"));
        assert!(matches!(
            post.set_thumbnail("neon", &templates),
            Err(AppError::InvalidInput(_))
        ));
    }
}
