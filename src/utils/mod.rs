pub mod prompt;
pub mod sources;
pub mod threads;
pub mod token_estimator;
