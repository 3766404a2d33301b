use regex::Regex;
use url::Url;

/// `youtube.com` and its subdomains, plus the `youtu.be` short-link host.
pub fn is_youtube_host(url: &Url) -> bool {
    match url.host_str() {
        Some(host) => {
            let host = host.to_ascii_lowercase();
            host == "youtube.com" || host.ends_with(".youtube.com") || host == "youtu.be"
        }
        None => false,
    }
}

/// Extract the video id from a YouTube watch, shorts, embed, live or short link.
pub fn extract_video_id(url: &Url) -> Option<String> {
    let valid = Regex::new(r"^[A-Za-z0-9_-]+$").ok()?;
    let host = url.host_str()?.to_ascii_lowercase();

    let candidate = if host == "youtu.be" {
        url.path_segments()?.next().map(str::to_string)
    } else {
        let from_query = url
            .query_pairs()
            .find(|(k, _)| k == "v")
            .map(|(_, v)| v.into_owned());
        from_query.or_else(|| {
            let mut segments = url.path_segments()?;
            match segments.next()? {
                "shorts" | "embed" | "live" | "v" => segments.next().map(str::to_string),
                _ => None,
            }
        })
    };

    candidate.filter(|id| valid.is_match(id))
}

/// Resolve a possibly relative link against the page it was found on.
pub fn resolve_url(base: &str, link: &str) -> Option<String> {
    match Url::parse(link) {
        Ok(url) => Some(url.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            Url::parse(base).ok()?.join(link).ok().map(|u| u.to_string())
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_youtube_hosts() {
        assert!(is_youtube_host(&url("https://www.youtube.com/watch?v=abc123")));
        assert!(is_youtube_host(&url("https://m.youtube.com/watch?v=abc123")));
        assert!(is_youtube_host(&url("https://youtu.be/abc123")));
        assert!(!is_youtube_host(&url("https://example.com/article")));
        assert!(!is_youtube_host(&url("https://notyoutube.com/watch?v=abc123")));
    }

    #[test]
    fn test_extract_video_id() {
        assert_eq!(
            extract_video_id(&url("https://www.youtube.com/watch?v=abc123")).as_deref(),
            Some("abc123")
        );
        assert_eq!(
            extract_video_id(&url("https://www.youtube.com/watch?list=x&v=dQw4w9WgXcQ&t=1")).as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extract_video_id(&url("https://youtu.be/dQw4w9WgXcQ?t=42")).as_deref(),
            Some("dQw4w9WgXcQ")
        );
        assert_eq!(
            extract_video_id(&url("https://www.youtube.com/shorts/abc_-1")).as_deref(),
            Some("abc_-1")
        );
    }

    #[test]
    fn test_extract_video_id_missing() {
        assert!(extract_video_id(&url("https://www.youtube.com/")).is_none());
        assert!(extract_video_id(&url("https://www.youtube.com/feed/trending")).is_none());
        assert!(extract_video_id(&url("https://www.youtube.com/watch?v=")).is_none());
        assert!(extract_video_id(&url("https://www.youtube.com/watch?v=a%20b")).is_none());
    }

    #[test]
    fn test_resolve_url() {
        assert_eq!(
            resolve_url("https://example.com/posts/1", "/img/a.png").as_deref(),
            Some("https://example.com/img/a.png")
        );
        assert_eq!(
            resolve_url("https://example.com/", "https://cdn.example.com/b.jpg").as_deref(),
            Some("https://cdn.example.com/b.jpg")
        );
        assert_eq!(
            resolve_url("https://example.com/", "//cdn.example.com/c.jpg").as_deref(),
            Some("https://cdn.example.com/c.jpg")
        );
    }
}
