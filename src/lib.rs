pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use app::{build_router, AppState};
pub use config::{CliConfig, ServiceConfig};
pub use core::gemini::GeminiClient;
pub use core::score::calculate_livability_score;
pub use utils::error::{ApiError, Result};
