use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Response from the YouTube oEmbed endpoint
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct YoutubeEmbed {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_url: Option<String>,
    #[serde(rename = "type", default)]
    pub embed_type: Option<String>,
    #[serde(default)]
    pub height: Option<u32>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(default)]
    pub provider_url: Option<String>,
    #[serde(default)]
    pub thumbnail_height: Option<u32>,
    #[serde(default)]
    pub thumbnail_width: Option<u32>,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
}

/// A single `<meta>` element, keyed by its `property` or `name` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaTag {
    pub key: String,
    pub content: String,
}

/// What the parser extracted from an HTML page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HtmlDocument {
    /// URL the page was requested from, used to resolve relative links.
    pub page_url: String,
    pub title: Option<String>,
    pub meta: Vec<MetaTag>,
}

impl HtmlDocument {
    /// First non-empty content for `key`, compared case-insensitively.
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.meta
            .iter()
            .find(|m| m.key.eq_ignore_ascii_case(key) && !m.content.is_empty())
            .map(|m| m.content.as_str())
    }
}

/// Configuration for the network session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Maximum idle time while waiting for response data.
    pub request_timeout: Duration,
    /// Maximum time for the whole transfer.
    pub resource_timeout: Duration,
    pub user_agent: String,
    pub oembed_endpoint: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            resource_timeout: Duration::from_secs(60),
            user_agent: concat!("og-fetch/", env!("CARGO_PKG_VERSION")).to_string(),
            oembed_endpoint: "https://www.youtube.com/oembed".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_youtube_embed_deserialize() {
        let json = r#"{
            "title": "Never Gonna Give You Up",
            "author_name": "Rick Astley",
            "type": "video",
            "height": 113,
            "width": 200,
            "version": "1.0",
            "provider_name": "YouTube",
            "thumbnail_url": "https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg"
        }"#;
        let embed: YoutubeEmbed = serde_json::from_str(json).unwrap();
        assert_eq!(embed.embed_type.as_deref(), Some("video"));
        assert_eq!(embed.width, Some(200));
        assert_eq!(embed.provider_name.as_deref(), Some("YouTube"));
        assert!(embed.html.is_none());
    }

    #[test]
    fn test_meta_lookup_skips_empty() {
        let doc = HtmlDocument {
            page_url: "https://example.com/".to_string(),
            title: None,
            meta: vec![
                MetaTag {
                    key: "og:title".to_string(),
                    content: String::new(),
                },
                MetaTag {
                    key: "OG:TITLE".to_string(),
                    content: "Hello".to_string(),
                },
            ],
        };
        assert_eq!(doc.meta("og:title"), Some("Hello"));
        assert_eq!(doc.meta("og:image"), None);
    }

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.resource_timeout, Duration::from_secs(60));
    }
}
