pub mod gemini;
pub mod score;

pub use crate::domain::model::{LivabilityQuery, LivabilityResult, ScoreLabel};
pub use crate::domain::ports::ExplanationProvider;
pub use crate::utils::error::Result;
