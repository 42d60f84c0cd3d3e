//! Application use cases. Orchestrate domain logic via ports.

pub mod mock_generator;
pub mod model_generator;
pub mod prompts;

pub use mock_generator::MockLessonGenerator;
pub use model_generator::{ModelLessonGenerator, TokenBudgets};

use crate::ports::{LessonGenerator, TextModelPort};
use std::sync::Arc;
use tracing::{info, warn};

/// Pick the generation strategy.
///
/// A configured model means live generation; no model (no credential) means the
/// mock generator. Failed live calls never switch strategies.
pub fn select_lesson_generator(
    model: Option<Arc<dyn TextModelPort>>,
    budgets: TokenBudgets,
) -> Arc<dyn LessonGenerator> {
    match model {
        Some(model) => {
            info!(provider = model.provider(), "lesson generation enabled with live model");
            Arc::new(ModelLessonGenerator::new(model, budgets))
        }
        None => {
            warn!("no model credential configured, using mock lesson generator");
            Arc::new(MockLessonGenerator::new())
        }
    }
}
