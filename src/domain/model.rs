use serde::Serialize;

use super::error::Error;
use crate::api::models::{HtmlDocument, YoutubeEmbed};
use crate::utils::resolve_url;

/// The variant-specific response a fetch was decoded from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    Html(HtmlDocument),
    Youtube(YoutubeEmbed),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenGraphData {
    /// The URL string the caller asked for, unchanged.
    pub source_url: String,
    pub url: Option<String>,
    pub page_title: Option<String>,
    pub page_description: Option<String>,
    pub page_type: Option<String>,
    pub site_name: Option<String>,
    pub image_url: Option<String>,
    pub payload: Payload,
}

impl OpenGraphData {
    pub fn from_html(html: HtmlDocument, source_url: impl Into<String>) -> Self {
        let text = |key: &str| html.meta(key).map(str::to_string);

        let page_title = text("og:title")
            .or_else(|| text("twitter:title"))
            .or_else(|| html.title.clone());
        let page_description = text("og:description")
            .or_else(|| text("twitter:description"))
            .or_else(|| text("description"));
        let image_url = html
            .meta("og:image")
            .or_else(|| html.meta("og:image:url"))
            .or_else(|| html.meta("twitter:image"))
            .and_then(|link| resolve_url(&html.page_url, link));
        let url = text("og:url");
        let page_type = text("og:type");
        let site_name = text("og:site_name");

        Self {
            source_url: source_url.into(),
            url,
            page_title,
            page_description,
            page_type,
            site_name,
            image_url,
            payload: Payload::Html(html),
        }
    }

    pub fn from_youtube(youtube: YoutubeEmbed, source_url: impl Into<String>) -> Self {
        let source_url = source_url.into();
        Self {
            url: Some(source_url.clone()),
            source_url,
            page_title: youtube.title.clone(),
            page_description: youtube.author_name.clone(),
            page_type: youtube.embed_type.clone(),
            site_name: youtube.provider_name.clone(),
            image_url: youtube.thumbnail_url.clone(),
            payload: Payload::Youtube(youtube),
        }
    }
}

/// Outcome of one fetch. `is_expired` reports whether the task had been
/// expired when its transfer completed.
#[derive(Debug)]
pub enum FetchResult {
    Success { data: OpenGraphData, is_expired: bool },
    Failure { error: Error, is_expired: bool },
}

impl FetchResult {
    pub fn is_expired(&self) -> bool {
        match self {
            FetchResult::Success { is_expired, .. } | FetchResult::Failure { is_expired, .. } => {
                *is_expired
            }
        }
    }

    pub fn data(&self) -> Option<&OpenGraphData> {
        match self {
            FetchResult::Success { data, .. } => Some(data),
            FetchResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&Error> {
        match self {
            FetchResult::Failure { error, .. } => Some(error),
            FetchResult::Success { .. } => None,
        }
    }

    /// Split into the `(data, error)` pair; exactly one side is `Some`.
    pub fn into_parts(self) -> (Option<OpenGraphData>, Option<Error>) {
        match self {
            FetchResult::Success { data, .. } => (Some(data), None),
            FetchResult::Failure { error, .. } => (None, Some(error)),
        }
    }
}
