pub mod compose;
pub mod context;
pub mod error;
pub mod outlet;
pub mod planner;
pub mod research;
pub mod state;
pub mod workflow;

#[cfg(test)]
pub(crate) mod mock;
