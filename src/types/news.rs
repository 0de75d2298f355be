//! News payload types as served by the backend

use serde::{Deserialize, Serialize};

/// Category returned when the backend cannot supply one.
pub const DEFAULT_CATEGORY: &str = "general";

/// Categories shown when the category list cannot be fetched.
pub const DEFAULT_CATEGORIES: &[&str] = &["gifts", "crypto", "tech", "community", "gaming"];

/// A single news article.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_html: Option<String>,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub publish_date: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub media: Vec<MediaItem>,
    /// Estimated reading time in minutes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reading_time: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Media attachment of a news item (photo, video, document).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

/// One page of news items.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub data: Vec<NewsItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
}

impl NewsResponse {
    /// Placeholder page shown when no endpoint could serve the request.
    ///
    /// Holds exactly one synthetic "service unavailable" item and reports a
    /// single result on a single page, so callers always get a renderable
    /// shape.
    pub fn unavailable() -> Self {
        Self {
            status: None,
            data: vec![NewsItem {
                id: 1,
                title: "📰 News temporarily unavailable".to_string(),
                content: "We are working on restoring the service. Please try again later."
                    .to_string(),
                content_html: Some(
                    "<p>We are working on restoring the service. Please try again later.</p>"
                        .to_string(),
                ),
                link: "#".to_string(),
                publish_date: jiff::Timestamp::now().to_string(),
                category: DEFAULT_CATEGORY.to_string(),
                media: Vec::new(),
                reading_time: None,
                views_count: None,
                author: None,
            }],
            message: None,
            total: Some(1),
            page: Some(1),
            limit: None,
            pages: Some(1),
        }
    }
}

/// Category list envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoriesResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<String>>,
}

/// The built-in category set, used when the backend has none to offer.
pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_has_single_item_on_single_page() {
        let response = NewsResponse::unavailable();
        assert_eq!(response.data.len(), 1);
        assert_eq!(response.total, Some(1));
        assert_eq!(response.page, Some(1));
        assert_eq!(response.pages, Some(1));
        assert_eq!(response.data[0].category, "general");
        assert!(response.data[0].media.is_empty());
    }

    #[test]
    fn unavailable_publish_date_is_rfc3339() {
        let response = NewsResponse::unavailable();
        let parsed: jiff::Timestamp = response.data[0].publish_date.parse().unwrap();
        assert!(parsed <= jiff::Timestamp::now());
    }

    #[test]
    fn item_deserializes_with_missing_optionals() {
        let json = r#"{"id": 7, "title": "Gift drop", "media": [{"type": "photo", "url": "https://x/y.jpg"}]}"#;
        let item: NewsItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, 7);
        assert_eq!(item.category, "general");
        assert_eq!(item.media[0].kind.as_deref(), Some("photo"));
        assert!(item.content_html.is_none());
    }

    #[test]
    fn response_ignores_unknown_fields() {
        let json = r#"{"status": "ok", "data": [], "total": 0, "extra": true}"#;
        let response: NewsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.status.as_deref(), Some("ok"));
        assert_eq!(response.total, Some(0));
        assert!(response.pages.is_none());
    }

    #[test]
    fn default_categories_match_builtin_set() {
        assert_eq!(
            default_categories(),
            vec!["gifts", "crypto", "tech", "community", "gaming"]
        );
    }
}
