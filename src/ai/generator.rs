use std::sync::Arc;
use std::time::Duration;

use super::validator::{self, Fields, Schema};
use super::{extractor, fallback, prompts, CompletionService};
use crate::error::{AppError, Result};
use crate::models::{ContentSource, Generated, GenerationRequest, PostDraft};

/// Runs one prompt → completion → extract → validate round trip per operation and
/// substitutes templated content when any stage fails.
pub struct PostGenerator {
    completion: Option<Arc<dyn CompletionService>>,
    model: String,
    timeout: Duration,
}

impl PostGenerator {
    pub fn new(
        completion: Option<(Arc<dyn CompletionService>, String)>,
        timeout: Duration,
    ) -> Self {
        let (completion, model) = match completion {
            Some((service, model)) => (Some(service), model),
            None => (None, String::new()),
        };
        Self {
            completion,
            model,
            timeout,
        }
    }

    pub fn provider(&self) -> Option<&str> {
        self.completion.as_ref().map(|s| s.name())
    }

    async fn ask(&self, prompt: String, schema: Schema) -> Result<Fields> {
        let service = self
            .completion
            .as_ref()
            .ok_or(AppError::MissingCredentials)?;

        let raw = tokio::time::timeout(self.timeout, service.complete(&self.model, &prompt))
            .await
            .map_err(|_| AppError::timeout(service.name()))??;
        tracing::debug!("Raw AI response: {}", raw);

        let parsed = extractor::extract_json(&raw)?;
        schema.validate(&parsed)
    }

    fn settle<T>(
        &self,
        what: &str,
        outcome: Result<T>,
        fallback: impl FnOnce() -> T,
    ) -> Generated<T> {
        match outcome {
            Ok(value) => Generated::model(value),
            Err(e) => {
                tracing::warn!("Generating {} failed, using fallback: {}", what, e);
                Generated::fallback(fallback())
            }
        }
    }

    pub async fn titles(&self, request: &GenerationRequest) -> Result<Generated<Vec<String>>> {
        request.validate()?;
        let topic = request.topic.trim();
        let outcome = match self.ask(prompts::titles_prompt(request), validator::TITLES).await {
            Ok(fields) => fields.take_list("titles"),
            Err(e) => Err(e),
        };
        Ok(self.settle("titles", outcome, || fallback::titles(topic)))
    }

    /// Uses `request.title` when present, otherwise the first fallback title.
    pub async fn body(&self, request: &GenerationRequest) -> Result<Generated<String>> {
        request.validate()?;
        let topic = request.topic.trim();
        let title = match request.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => fallback::titles(topic).swap_remove(0),
        };
        let outcome = match self.ask(prompts::body_prompt(request, &title), validator::BODY).await {
            Ok(fields) => fields.take_text("body"),
            Err(e) => Err(e),
        };
        Ok(self.settle("body", outcome, || fallback::body(topic)))
    }

    pub async fn cta(&self, request: &GenerationRequest) -> Result<Generated<String>> {
        request.validate()?;
        let outcome = match self.ask(prompts::cta_prompt(request), validator::CTA).await {
            Ok(fields) => fields.take_text("cta"),
            Err(e) => Err(e),
        };
        Ok(self.settle("cta", outcome, fallback::cta))
    }

    pub async fn hashtags(&self, request: &GenerationRequest) -> Result<Generated<Vec<String>>> {
        request.validate()?;
        let topic = request.topic.trim();
        let outcome = match self.ask(prompts::hashtags_prompt(request), validator::HASHTAGS).await {
            Ok(fields) => fields.take_list("hashtags").map(validator::normalize_hashtags),
            Err(e) => Err(e),
        };
        Ok(self.settle("hashtags", outcome, || {
            fallback::hashtags(topic, request.category())
        }))
    }

    /// The whole post, one step at a time. The body is written for the first title.
    pub async fn draft(&self, request: &GenerationRequest) -> Result<Generated<PostDraft>> {
        request.validate()?;

        let titles = self.titles(request).await?;
        let selected = titles.value.first().cloned().unwrap_or_default();
        let body = self
            .body(&request.clone().with_title(selected.clone()))
            .await?;
        let cta = self.cta(request).await?;
        let hashtags = self.hashtags(request).await?;

        let any_fallback = titles.is_fallback()
            || body.is_fallback()
            || cta.is_fallback()
            || hashtags.is_fallback();

        let post = PostDraft {
            titles: titles.value,
            selected_title: selected,
            body: body.value,
            cta: cta.value,
            hashtags: hashtags.value,
            ..PostDraft::default()
        };

        Ok(Generated {
            value: post,
            source: if any_fallback {
                ContentSource::Fallback
            } else {
                ContentSource::Model
            },
        })
    }
}
