pub mod ast;
pub mod error;
pub mod lexer;

use ast::Evaluator;
use log::debug;
use rayon::prelude::*;

pub use error::{EvalError, Expected, LexError, Location, SyntaxError};

/// Evaluates an arithmetic expression such as `"(2 + 3) * 4"`.
///
/// Runs the lexer, parser and evaluator in order and stops at the first error.
pub fn evaluate(expression: &str) -> Result<f64, EvalError> {
    Evaluator::default().evaluate_expression(expression)
}

/// Evaluates independent expressions in parallel. Results keep the input order.
pub fn evaluate_batch(expressions: &[&str]) -> Vec<Result<f64, EvalError>> {
    debug!("Evaluating batch of {} expressions", expressions.len());
    expressions
        .par_iter()
        .map(|expression| evaluate(expression))
        .collect()
}
