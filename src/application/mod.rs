pub mod downloader;

pub use downloader::{OpenGraphDataDownloader, UrlKind};
