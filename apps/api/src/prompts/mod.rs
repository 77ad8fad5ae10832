// Prompt management: template storage, active-prompt resolution and placeholder substitution.
// Resolution order is environment override → stored active record → built-in default.

pub mod builtin;
pub mod handlers;
pub mod models;
pub mod resolver;
pub mod store;
pub mod substitute;

use thiserror::Error;

pub use resolver::{PromptResolver, RuntimeMode};
pub use store::FileTemplateStore;
pub use substitute::substitute;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("prompt writes are disabled in production; use CUSTOM_PROMPT instead")]
    WriteDisabled,

    #[error("invalid prompt id '{0}'")]
    InvalidId(String),

    #[error("prompt storage I/O failed: {0}")]
    Storage(#[from] std::io::Error),

    #[error("prompt record could not be (de)serialized: {0}")]
    Serialize(#[from] serde_json::Error),
}
