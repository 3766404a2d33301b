pub mod html;
pub mod models;
pub mod request;
pub mod session;
pub mod task;
pub mod youtube;

pub use html::HtmlRequest;
pub use models::{HtmlDocument, MetaTag, SessionConfig, YoutubeEmbed};
pub use request::{OgRequest, WireRequest};
pub use session::Session;
pub use task::{Task, TransferHandle};
pub use youtube::YoutubeEmbedRequest;
