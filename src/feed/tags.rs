//! Regex-based scanning of RSS and HTML markup.
//!
//! This is a best-effort heuristic extractor, not a conformant XML/HTML parser: nested tags,
//! unusual CDATA placement and attribute-order variance are not handled. Anything it cannot
//! make sense of produces no output rather than an error, so callers treat "zero articles" as
//! a normal outcome and supply their own fallback.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::{Captures, Regex};

use crate::models::Article;

pub const MAX_ITEMS: usize = 10;
pub const DESCRIPTION_LIMIT: usize = 200;

struct ItemPatterns {
    item: Regex,
    title: Regex,
    description: Regex,
    link: Regex,
    pub_date: Regex,
    channel_title: Regex,
}

struct PagePatterns {
    titles: Vec<Regex>,
    descriptions: Vec<Regex>,
    paragraph: Regex,
}

static ITEM_PATTERNS: OnceLock<Option<ItemPatterns>> = OnceLock::new();
static PAGE_PATTERNS: OnceLock<Option<PagePatterns>> = OnceLock::new();
static CDATA: OnceLock<Option<Regex>> = OnceLock::new();
static MARKUP: OnceLock<Option<Regex>> = OnceLock::new();

fn item_patterns() -> Option<&'static ItemPatterns> {
    ITEM_PATTERNS
        .get_or_init(|| {
            Some(ItemPatterns {
                item: Regex::new(r"(?is)<item(?:\s[^>]*)?>(.*?)</item>").ok()?,
                title: Regex::new(r"(?is)<title[^>]*>(.*?)</title>").ok()?,
                description: Regex::new(r"(?is)<description[^>]*>(.*?)</description>").ok()?,
                link: Regex::new(r"(?is)<link[^>]*>(.*?)</link>").ok()?,
                pub_date: Regex::new(r"(?is)<pubDate[^>]*>(.*?)</pubDate>").ok()?,
                channel_title: Regex::new(r"(?is)<channel[^>]*>.*?<title[^>]*>(.*?)</title>").ok()?,
            })
        })
        .as_ref()
}

fn page_patterns() -> Option<&'static PagePatterns> {
    PAGE_PATTERNS
        .get_or_init(|| {
            let compile = |patterns: &[&str]| -> Option<Vec<Regex>> {
                patterns.iter().map(|p| Regex::new(p).ok()).collect()
            };
            Some(PagePatterns {
                titles: compile(&[
                    r"(?i)<title[^>]*>([^<]+)</title>",
                    r#"(?i)<meta[^>]*property="og:title"[^>]*content="([^"]+)""#,
                    r#"(?i)<meta[^>]*name="twitter:title"[^>]*content="([^"]+)""#,
                    r"(?i)<h1[^>]*>([^<]+)</h1>",
                ])?,
                descriptions: compile(&[
                    r#"(?i)<meta[^>]*name="description"[^>]*content="([^"]+)""#,
                    r#"(?i)<meta[^>]*property="og:description"[^>]*content="([^"]+)""#,
                    r#"(?i)<meta[^>]*name="twitter:description"[^>]*content="([^"]+)""#,
                ])?,
                paragraph: Regex::new(r"(?i)<p[^>]*>([^<]+)</p>").ok()?,
            })
        })
        .as_ref()
}

/// Decodes the handful of entities feeds commonly escape. `&amp;` goes last so that
/// `&amp;lt;` decodes to the literal text `&lt;`.
pub fn decode_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Cuts to `DESCRIPTION_LIMIT` characters plus `...` when longer.
pub fn truncate_description(text: &str) -> String {
    if text.chars().count() > DESCRIPTION_LIMIT {
        let cut: String = text.chars().take(DESCRIPTION_LIMIT).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

/// Unwraps CDATA, drops inner tags, decodes entities and collapses whitespace.
/// Entities are decoded last so escaped `&lt;` text is never mistaken for a tag.
fn clean_text(raw: &str) -> String {
    let unwrapped = match CDATA
        .get_or_init(|| Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").ok())
        .as_ref()
    {
        Some(re) => re.replace_all(raw, "$1").into_owned(),
        None => raw.to_string(),
    };
    let stripped = match MARKUP.get_or_init(|| Regex::new(r"<[^>]*>").ok()).as_ref() {
        Some(re) => re.replace_all(&unwrapped, " ").into_owned(),
        None => unwrapped,
    };
    decode_entities(&stripped)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn capture_text(re: &Regex, haystack: &str) -> Option<String> {
    re.captures(haystack)
        .and_then(|cap: Captures<'_>| cap.get(1))
        .map(|m| clean_text(m.as_str()))
        .filter(|s| !s.is_empty())
}

/// RFC 2822 first since that is what RSS uses, then RFC 3339 for Atom-ish feeds.
pub fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

/// The feed's own `<channel><title>`, if any.
pub fn channel_title(markup: &str) -> Option<String> {
    let patterns = item_patterns()?;
    // only look ahead of the first item so an item title is never mistaken for the channel's
    let head = match patterns.item.find(markup) {
        Some(m) => &markup[..m.start()],
        None => markup,
    };
    capture_text(&patterns.channel_title, head)
}

/// Lazily yields up to `MAX_ITEMS` articles from the `<item>` blocks in `markup`.
///
/// Items with neither a title nor a description are skipped. Missing links become `#`, and
/// missing or unparsable dates become the current time.
pub fn scan_items<'a>(markup: &'a str, source: &'a str) -> impl Iterator<Item = Article> + 'a {
    item_patterns()
        .into_iter()
        .flat_map(move |patterns| {
            patterns
                .item
                .captures_iter(markup)
                .filter_map(move |cap| article_from_item(patterns, cap.get(1)?.as_str(), source))
        })
        .take(MAX_ITEMS)
}

fn article_from_item(patterns: &ItemPatterns, body: &str, source: &str) -> Option<Article> {
    let title = capture_text(&patterns.title, body);
    let description = capture_text(&patterns.description, body);
    if title.is_none() && description.is_none() {
        return None;
    }

    let url = capture_text(&patterns.link, body).unwrap_or_else(|| "#".to_string());
    let published_at = patterns
        .pub_date
        .captures(body)
        .and_then(|cap| cap.get(1))
        .and_then(|m| parse_pub_date(m.as_str()))
        .unwrap_or_else(Utc::now);

    Some(Article::new(
        title.unwrap_or_else(|| "Untitled Article".to_string()),
        description
            .map(|d| truncate_description(&d))
            .unwrap_or_else(|| "No description available.".to_string()),
        url,
        published_at,
        source,
    ))
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageSummary {
    pub title: Option<String>,
    pub description: Option<String>,
}

fn first_match(patterns: &[Regex], html: &str) -> Option<String> {
    patterns.iter().find_map(|re| {
        re.captures(html)
            .and_then(|cap| cap.get(1))
            .map(|m| decode_entities(m.as_str().trim()))
            .filter(|s| !s.is_empty())
    })
}

/// Title and description of a single HTML page, each from the first pattern that matches.
pub fn scan_page(html: &str) -> PageSummary {
    let Some(patterns) = page_patterns() else {
        return PageSummary::default();
    };

    let title = first_match(&patterns.titles, html);
    let description = first_match(&patterns.descriptions, html).or_else(|| {
        first_match(std::slice::from_ref(&patterns.paragraph), html)
            .map(|p| truncate_description(&p))
    });

    PageSummary { title, description }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const FEED: &str = r#"<?xml version="1.0"?>
<rss version="2.0"><channel>
  <title>Data Weekly</title>
  <item>
    <title>Pipelines &amp; you</title>
    <link>https://example.com/pipelines</link>
    <description><![CDATA[<p>Why &quot;batch&quot; still wins.</p>]]></description>
    <pubDate>Tue, 10 Jun 2025 04:00:00 GMT</pubDate>
  </item>
  <item>
    <link>https://example.com/empty</link>
  </item>
  <item>
    <description>Only a description</description>
    <pubDate>not a date</pubDate>
  </item>
</channel></rss>"#;

    #[test]
    fn items_are_extracted_and_cleaned() {
        let articles: Vec<_> = scan_items(FEED, "Data Weekly").collect();
        assert_eq!(articles.len(), 2);

        let first = &articles[0];
        assert_eq!(first.title, "Pipelines & you");
        assert_eq!(first.description, "Why \"batch\" still wins.");
        assert_eq!(first.url, "https://example.com/pipelines");
        assert_eq!(
            first.published_at,
            Utc.with_ymd_and_hms(2025, 6, 10, 4, 0, 0).unwrap()
        );
        assert_eq!(first.source.name, "Data Weekly");

        let second = &articles[1];
        assert_eq!(second.title, "Untitled Article");
        assert_eq!(second.url, "#");
    }

    #[test]
    fn bad_dates_fall_back_to_now() {
        let before = Utc::now();
        let articles: Vec<_> = scan_items(FEED, "x").collect();
        assert!(articles[1].published_at >= before);
    }

    #[test]
    fn output_is_capped() {
        let feed: String = (0..25)
            .map(|i| format!("<item><title>Story {}</title></item>", i))
            .collect();
        let articles: Vec<_> = scan_items(&feed, "x").collect();
        assert_eq!(articles.len(), MAX_ITEMS);
        assert_eq!(articles[9].title, "Story 9");
    }

    #[test]
    fn long_descriptions_are_truncated() {
        let long = "a".repeat(250);
        let feed = format!("<item><description>{}</description></item>", long);
        let article = scan_items(&feed, "x").next().unwrap();
        assert_eq!(article.description.chars().count(), DESCRIPTION_LIMIT + 3);
        assert!(article.description.ends_with("..."));

        assert_eq!(truncate_description("short"), "short");
    }

    #[test]
    fn malformed_markup_yields_nothing() {
        for markup in ["", "<item><title>never closed", "not markup at all", "</item><item>"] {
            assert_eq!(scan_items(markup, "x").count(), 0, "markup: {:?}", markup);
        }
    }

    #[test]
    fn channel_title_ignores_item_titles() {
        assert_eq!(channel_title(FEED).as_deref(), Some("Data Weekly"));
        assert_eq!(
            channel_title("<rss><channel><item><title>Item</title></item></channel></rss>"),
            None
        );
    }

    #[test]
    fn page_prefers_earlier_patterns() {
        let html = r#"<html><head>
            <title>Page &amp; Title</title>
            <meta property="og:title" content="OG title">
            <meta property="og:description" content="OG description">
            </head><body><p>First paragraph.</p></body></html>"#;
        let page = scan_page(html);
        assert_eq!(page.title.as_deref(), Some("Page & Title"));
        assert_eq!(page.description.as_deref(), Some("OG description"));
    }

    #[test]
    fn page_falls_back_to_meta_and_paragraph() {
        let html = r#"<meta name="twitter:title" content="Tweet title"><p>Lead paragraph.</p>"#;
        let page = scan_page(html);
        assert_eq!(page.title.as_deref(), Some("Tweet title"));
        assert_eq!(page.description.as_deref(), Some("Lead paragraph."));

        assert_eq!(scan_page("<div></div>"), PageSummary::default());
    }

    #[test]
    fn escaped_angle_brackets_are_kept_as_text() {
        let feed = "<item><title>Why 3 &lt; 5 and 7 &gt; 2 matters</title></item>";
        let article = scan_items(feed, "x").next().unwrap();
        assert_eq!(article.title, "Why 3 < 5 and 7 > 2 matters");
    }

    #[test]
    fn entities_decode_once() {
        assert_eq!(decode_entities("&lt;b&gt; &amp;lt;"), "<b> &lt;");
    }
}
