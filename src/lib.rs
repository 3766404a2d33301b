//! Fetch Open Graph metadata (or YouTube oEmbed info) for a URL.
//!
//! [`OpenGraphDataDownloader::fetch`] returns a [`Task`] immediately and
//! reports one [`FetchResult`] later. Expiring a task marks its result as
//! stale without necessarily stopping the transfer:
//!
//! ```no_run
//! # async fn run() -> og_fetch::Result<()> {
//! use og_fetch::{OpenGraphDataDownloader, SessionConfig};
//!
//! let downloader = OpenGraphDataDownloader::new(SessionConfig::default())?;
//! let (task, result) = downloader.fetch_channel("https://example.com/article");
//! task.expire(true);
//! if let Ok(result) = result.await {
//!     println!("expired: {}", result.is_expired());
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod application;
pub mod domain;
pub mod parser;
pub mod utils;

pub use api::{OgRequest, Session, SessionConfig, Task, WireRequest};
pub use application::{OpenGraphDataDownloader, UrlKind};
pub use domain::{DecodeError, Error, FetchResult, OpenGraphData, Payload, Result, TransportError};
pub use parser::{MetaTagParser, Parser};
