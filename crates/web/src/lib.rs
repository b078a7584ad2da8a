pub mod app;
pub mod codec;
pub mod config;
pub mod error;
pub mod features;
pub mod middleware;
pub mod openapi;

pub use app::{AppState, router};
pub use config::Config;
pub use error::{WebError, WebResult};
