//! Turns raw HTML into an [`HtmlDocument`].
//!
//! The session never calls a parser directly; the HTML request variant owns
//! one and invokes it from its decode step.

use std::collections::HashMap;

use regex::Regex;

use crate::api::models::{HtmlDocument, MetaTag};
use crate::domain::DecodeError;

pub trait Parser: Send + Sync {
    fn parse(&self, html: &str, page_url: &str) -> Result<HtmlDocument, DecodeError>;
}

/// Pattern-based scraper for `<meta>` and `<title>` elements.
#[derive(Debug, Clone)]
pub struct MetaTagParser {
    meta_re: Regex,
    attr_re: Regex,
    title_re: Regex,
}

impl MetaTagParser {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            meta_re: Regex::new(r"(?is)<meta\b([^>]*)>")?,
            attr_re: Regex::new(
                r#"(?s)([A-Za-z_:.-]+)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>/]+))"#,
            )?,
            title_re: Regex::new(r"(?is)<title\b[^>]*>(.*?)</title>")?,
        })
    }

    fn attributes(&self, raw: &str) -> HashMap<String, String> {
        self.attr_re
            .captures_iter(raw)
            .filter_map(|caps| {
                let name = caps.get(1)?.as_str().to_ascii_lowercase();
                let value = caps.get(2).or(caps.get(3)).or(caps.get(4))?.as_str();
                Some((name, unescape(value)))
            })
            .collect()
    }
}

impl Parser for MetaTagParser {
    fn parse(&self, html: &str, page_url: &str) -> Result<HtmlDocument, DecodeError> {
        if !html.contains('<') {
            return Err(DecodeError::MarkupDecodeFailed);
        }

        let meta = self
            .meta_re
            .captures_iter(html)
            .filter_map(|caps| {
                let mut attrs = self.attributes(caps.get(1)?.as_str());
                let content = attrs.remove("content")?;
                let key = attrs
                    .remove("property")
                    .or_else(|| attrs.remove("name"))
                    .or_else(|| attrs.remove("itemprop"))?;
                Some(MetaTag {
                    key,
                    content: content.trim().to_string(),
                })
            })
            .collect();

        let title = self
            .title_re
            .captures(html)
            .map(|caps| unescape(caps[1].trim()))
            .filter(|t| !t.is_empty());

        Ok(HtmlDocument {
            page_url: page_url.to_string(),
            title,
            meta,
        })
    }
}

fn unescape(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    s.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}
