use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::AppState;
use crate::error::{AppError, Result};
use crate::models::{
    format_hashtag, Category, CategoryInsights, ContentSource, GenerationRequest, PostDraft,
    ThumbnailTemplate, Topic,
};
use crate::services::ExtractedContent;

type SharedState = State<Arc<AppState>>;

fn parse_payload<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::InvalidInput(rejection.body_text()))
}

pub async fn generate_titles(
    State(state): SharedState,
    payload: std::result::Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let request = parse_payload(payload)?;
    let titles = state.generator.titles(&request).await?;
    Ok(Json(json!({ "titles": titles.value })))
}

pub async fn generate_body(
    State(state): SharedState,
    payload: std::result::Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let request = parse_payload(payload)?;
    let generated = state.generator.body(&request).await?;
    Ok(Json(json!({ "body": generated.value })))
}

pub async fn generate_cta(
    State(state): SharedState,
    payload: std::result::Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let request = parse_payload(payload)?;
    let cta = state.generator.cta(&request).await?;
    Ok(Json(json!({ "cta": cta.value })))
}

pub async fn generate_hashtags(
    State(state): SharedState,
    payload: std::result::Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<Value>> {
    let request = parse_payload(payload)?;
    let hashtags = state.generator.hashtags(&request).await?;
    Ok(Json(json!({ "hashtags": hashtags.value })))
}

#[derive(Debug, Serialize)]
pub struct DraftResponse {
    #[serde(flatten)]
    pub post: PostDraft,
    pub source: ContentSource,
}

pub async fn generate_post(
    State(state): SharedState,
    payload: std::result::Result<Json<GenerationRequest>, JsonRejection>,
) -> Result<Json<DraftResponse>> {
    let request = parse_payload(payload)?;
    let draft = state.generator.draft(&request).await?;
    Ok(Json(DraftResponse {
        post: draft.value,
        source: draft.source,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposeRequest {
    #[serde(flatten)]
    pub post: PostDraft,
    #[serde(default)]
    pub remove_hashtags: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ComposeResponse {
    pub text: String,
    pub post: PostDraft,
}

pub async fn compose(
    State(state): SharedState,
    payload: std::result::Result<Json<ComposeRequest>, JsonRejection>,
) -> Result<Json<ComposeResponse>> {
    let ComposeRequest {
        post: submitted,
        remove_hashtags,
    } = parse_payload(payload)?;

    let mut post = PostDraft {
        hashtags: submitted.hashtags.iter().map(|t| format_hashtag(t)).collect(),
        custom_hashtags: Vec::new(),
        thumbnail_style: None,
        ..submitted.clone()
    };
    for tag in &submitted.custom_hashtags {
        post.add_custom_hashtag(tag);
    }
    for tag in &remove_hashtags {
        let tag = format_hashtag(tag);
        post.remove_hashtag(&tag, false);
        post.remove_hashtag(&tag, true);
    }

    if post.selected_title.trim().is_empty() {
        let first = post.titles.first().cloned().unwrap_or_default();
        post.select_title(first);
    }
    if let Some(style) = submitted.thumbnail_style.as_deref() {
        post.set_thumbnail(style, state.catalog.templates())?;
    }

    Ok(Json(ComposeResponse {
        text: post.final_text(),
        post,
    }))
}

pub async fn tech_news(State(state): SharedState) -> Json<Value> {
    let articles = state.news.latest().await;
    Json(json!({ "articles": articles }))
}

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    #[serde(default)]
    pub url: String,
}

pub async fn extract_content(
    State(state): SharedState,
    payload: std::result::Result<Json<ExtractRequest>, JsonRejection>,
) -> Result<Json<ExtractedContent>> {
    let request = parse_payload(payload)?;
    let content = state.content.extract(&request.url).await.map_err(|e| {
        tracing::error!("Error extracting content from {}: {}", request.url, e);
        e
    })?;
    Ok(Json(content))
}

#[derive(Debug, Default, Deserialize)]
pub struct TopicQuery {
    pub q: Option<String>,
    pub category: Option<String>,
    pub trending: Option<bool>,
}

pub async fn list_topics(
    State(state): SharedState,
    Query(query): Query<TopicQuery>,
) -> Json<Vec<Topic>> {
    let trending_only = query.trending.unwrap_or(false);
    let topics = if trending_only && query.q.is_none() && query.category.is_none() {
        state.catalog.trending_topics()
    } else {
        let mut found = state
            .catalog
            .search_topics(query.q.as_deref().unwrap_or(""), query.category.as_deref());
        if trending_only {
            found.retain(|t| t.trending);
        }
        found
    };
    Json(topics.into_iter().cloned().collect())
}

pub async fn related_topics(
    State(state): SharedState,
    Path(name): Path<String>,
) -> Json<Vec<Topic>> {
    Json(state.catalog.related_topics(&name).into_iter().cloned().collect())
}

pub async fn list_categories(State(state): SharedState) -> Json<Vec<Category>> {
    Json(state.catalog.categories().to_vec())
}

pub async fn category_insights(
    State(state): SharedState,
    Path(name): Path<String>,
) -> Result<Json<CategoryInsights>> {
    state
        .catalog
        .category_insights(&name)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Unknown category: {}", name)))
}

pub async fn list_templates(State(state): SharedState) -> Json<Vec<ThumbnailTemplate>> {
    Json(state.catalog.templates().to_vec())
}

pub async fn get_template(
    State(state): SharedState,
    Path(id): Path<String>,
) -> Result<Json<ThumbnailTemplate>> {
    state
        .catalog
        .template(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Unknown thumbnail template: {}", id)))
}
