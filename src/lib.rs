pub mod cli;
pub mod config;
pub mod generator;
pub mod llm;
pub mod search;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use generator::context::GeneratorContext;
pub use generator::error::ReportError;
pub use generator::state::ReportRunState;
pub use generator::workflow::{ReportWorkflow, launch};
pub use llm::LanguageModel;
pub use search::{SearchError, SearchProvider, SearchRequest};
