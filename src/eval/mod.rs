//! Arithmetic Evaluation Module
//!
//! Safe evaluation of untrusted arithmetic expressions: a character
//! whitelist enforced before anything else, a recursive descent parser with
//! explicit length and nesting bounds, and a fixed-capacity memo table so
//! each distinct expression is computed at most once while it stays resident.

mod memo;
mod parser;

pub use memo::MemoEvaluator;
pub use parser::{evaluate, is_arithmetic, MAX_EXPRESSION_LENGTH, MAX_NESTING_DEPTH};
