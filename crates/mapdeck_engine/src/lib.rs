//! Mapdeck engine: backend IO and effect execution.
mod backend;
mod decode;
mod engine;
mod types;

pub use backend::{Backend, BackendSettings, JobSink, ReqwestBackend};
pub use decode::{DecodeError, StreamDecoder};
pub use engine::{EngineEvents, EngineHandle};
pub use reqwest::Url;
pub use types::{EngineCommand, EngineEvent};
