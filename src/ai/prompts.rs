use crate::models::GenerationRequest;

const JSON_ONLY: &str =
    "Do not include any extra text or markdown formatting like ```json.";

fn category_or_general(request: &GenerationRequest) -> &str {
    request.category().unwrap_or("General")
}

pub fn titles_prompt(request: &GenerationRequest) -> String {
    format!(
        r#"Act as a data expert creating a LinkedIn "one-slide wisdom" post.
Generate three highly engaging hooks (titles) for the topic: {topic}.
Each title should be 1-2 lines and:
- be tailored to the category: {category}
- grab attention with a number (e.g. "3 secrets", "5 mistakes")
- address the audience directly using "you"
- frame the topic as a problem to create curiosity
- be specific, simple and unique

Return the response as a valid JSON object with this exact format:
{{
  "titles": ["First title", "Second title", "Third title"]
}}

{json_only}"#,
        topic = request.topic.trim(),
        category = category_or_general(request),
        json_only = JSON_ONLY,
    )
}

pub fn body_prompt(request: &GenerationRequest, title: &str) -> String {
    format!(
        r#"Generate compelling body content for a LinkedIn post with the title "{title}" about "{topic}" in the "{category}" category.

Guidelines:
- Write 2-4 paragraphs of engaging content
- Include relevant insights, tips, or experiences
- Use a professional but conversational tone
- Include emojis sparingly for visual appeal
- Keep it under 1300 characters

Return the response as a valid JSON object with this exact format:
{{
  "body": "Your body content here..."
}}

{json_only}"#,
        title = title,
        topic = request.topic.trim(),
        category = category_or_general(request),
        json_only = JSON_ONLY,
    )
}

pub fn cta_prompt(request: &GenerationRequest) -> String {
    format!(
        r#"Act as a data expert writing a call-to-action (CTA) for a LinkedIn post about "{topic}" in the "{category}" category.
The CTA should:
- be 1-2 lines long
- encourage conversation and community, not promotion
- include an open-ended question (e.g. "What's your biggest takeaway?")
- suggest a non-sales next step (e.g. "follow for more", "tag a colleague")
- end on a positive, inclusive note

Return the response as a valid JSON object with this exact format:
{{
  "cta": "Your CTA here..."
}}

{json_only}"#,
        topic = request.topic.trim(),
        category = category_or_general(request),
        json_only = JSON_ONLY,
    )
}

pub fn hashtags_prompt(request: &GenerationRequest) -> String {
    format!(
        r#"Suggest five LinkedIn hashtags for a post about "{topic}" in the "{category}" category.
Prefer specific tags over generic ones and do not include spaces inside a tag.

Return the response as a valid JSON object with this exact format:
{{
  "hashtags": ["hashtag1", "hashtag2", "hashtag3", "hashtag4", "hashtag5"]
}}

{json_only}"#,
        topic = request.topic.trim(),
        category = category_or_general(request),
        json_only = JSON_ONLY,
    )
}
