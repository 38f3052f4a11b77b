use crate::ast::{ASTNode, Parser, DEFAULT_MAX_DEPTH};
use crate::error::EvalError;
use log::{debug, trace};

/// Runs the full pipeline. Holds configuration only, never results.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator {
    max_depth: usize,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl Evaluator {
    /// Creates an `Evaluator` that rejects input nested deeper than `max_depth`.
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Parse an expression string into an AST.
    pub fn parse_expression(&self, expression: &str) -> Result<ASTNode, EvalError> {
        Parser::parse_expression_with_max_depth(expression, self.max_depth)
    }

    /// Evaluates a given expression string.
    ///
    /// # Returns
    ///
    /// * `Ok(f64)` if every stage succeeds.
    /// * `Err(EvalError)` from the first stage that fails.
    pub fn evaluate_expression(&self, expression: &str) -> Result<f64, EvalError> {
        let ast = self.parse_expression(expression)?;
        let result = self.evaluate(&ast)?;
        debug!("Evaluated {} = {}", expression, result);
        Ok(result)
    }

    /// Evaluates an `ASTNode` bottom-up.
    pub fn evaluate(&self, ast: &ASTNode) -> Result<f64, EvalError> {
        match ast {
            ASTNode::Number(n) => Ok(*n),
            ASTNode::BinaryOperation {
                left,
                operator,
                right,
            } => {
                let left_value = self.evaluate(left)?;
                let right_value = self.evaluate(right)?;
                let result = operator.apply(left_value, right_value)?;
                trace!("{} {} {} => {}", left_value, operator, right_value, result);
                Ok(result)
            }
            ASTNode::Negate(operand) => Ok(-self.evaluate(operand)?),
        }
    }
}
