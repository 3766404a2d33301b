use std::sync::Arc;

use tokio::sync::oneshot;
use url::Url;

use crate::{
    api::{HtmlRequest, Session, SessionConfig, Task, YoutubeEmbedRequest},
    domain::{Error, FetchResult, OpenGraphData, Result},
    parser::{MetaTagParser, Parser},
    utils::is_youtube_host,
};

/// Which request path a URL takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlKind {
    Html,
    Youtube,
}

impl UrlKind {
    pub fn classify(url: &Url) -> Self {
        if is_youtube_host(url) {
            UrlKind::Youtube
        } else {
            UrlKind::Html
        }
    }
}

/// Entry point: classifies a URL, builds the matching request and reports a
/// single [`FetchResult`] per fetch.
#[derive(Clone)]
pub struct OpenGraphDataDownloader {
    session: Session,
    parser: Arc<dyn Parser>,
    oembed_endpoint: String,
}

impl OpenGraphDataDownloader {
    /// Transfers are spawned on the Tokio runtime current at this call;
    /// without one this fails with [`Error::NoRuntime`].
    pub fn new(config: SessionConfig) -> Result<Self> {
        let parser = Arc::new(MetaTagParser::new()?);
        Self::with_parser(config, parser)
    }

    pub fn with_parser(config: SessionConfig, parser: Arc<dyn Parser>) -> Result<Self> {
        let session = Session::new(&config)?;
        Ok(Self {
            session,
            parser,
            oembed_endpoint: config.oembed_endpoint,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Start fetching `url_string` and return its task right away.
    ///
    /// Unparseable URLs and YouTube links without a video id are rejected
    /// before anything is sent: `completion` runs on the calling thread with
    /// `is_expired == false` and the returned task is never registered.
    pub fn fetch<C>(&self, url_string: &str, completion: C) -> Task
    where
        C: FnOnce(FetchResult) + Send + 'static,
    {
        let task = Task::new();

        let url = match Url::parse(url_string) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!(url = url_string, error = %e, "rejecting unparseable URL");
                completion(FetchResult::Failure {
                    error: Error::InvalidUrl(url_string.to_string()),
                    is_expired: false,
                });
                return task;
            }
        };

        let source_url = url_string.to_string();
        match UrlKind::classify(&url) {
            UrlKind::Youtube => {
                let Some(request) = YoutubeEmbedRequest::new(&url, &self.oembed_endpoint) else {
                    tracing::debug!(url = url_string, "no video id in YouTube URL");
                    completion(FetchResult::Failure {
                        error: Error::UnsupportedRequestConstruction(source_url),
                        is_expired: false,
                    });
                    return task;
                };
                self.session.send(request, task, move |result, is_expired| {
                    completion(into_fetch_result(
                        result.map(|embed| OpenGraphData::from_youtube(embed, source_url)),
                        is_expired,
                    ))
                })
            }
            UrlKind::Html => {
                let request = HtmlRequest::new(url, Arc::clone(&self.parser));
                self.session.send(request, task, move |result, is_expired| {
                    completion(into_fetch_result(
                        result.map(|html| OpenGraphData::from_html(html, source_url)),
                        is_expired,
                    ))
                })
            }
        }
    }

    /// Like [`fetch`](Self::fetch), delivering the result through a channel.
    pub fn fetch_channel(&self, url_string: &str) -> (Task, oneshot::Receiver<FetchResult>) {
        let (tx, rx) = oneshot::channel();
        let task = self.fetch(url_string, move |result| {
            // receiver may have been dropped by a caller that lost interest
            let _ = tx.send(result);
        });
        (task, rx)
    }
}

fn into_fetch_result(result: Result<OpenGraphData>, is_expired: bool) -> FetchResult {
    match result {
        Ok(data) => FetchResult::Success { data, is_expired },
        Err(error) => FetchResult::Failure { error, is_expired },
    }
}
