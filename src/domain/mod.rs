pub mod error;
pub mod model;

pub use error::{DecodeError, Error, Result, TransportError};
pub use model::{FetchResult, OpenGraphData, Payload};
