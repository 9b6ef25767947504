pub mod evaluator;
pub mod schedule;
