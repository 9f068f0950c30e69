pub mod backend;
pub mod client;
pub mod config;
pub mod dto;

pub use backend::SaathiBackend;
pub use client::BackendClient;
pub use config::BackendConfig;
pub use dto::{HealthReport, HealthServices, NewsArticle};
