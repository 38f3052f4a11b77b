use crate::error::EvalError;
use crate::lexer::TokenKind;
use std::fmt;

mod evaluator;
mod parser;

pub use evaluator::Evaluator;
pub use parser::{parse, Parser, DEFAULT_MAX_DEPTH};

#[derive(Debug, Clone, PartialEq)]
pub enum ASTNode {
    Number(f64),
    BinaryOperation {
        left: Box<ASTNode>,
        operator: Operator,
        right: Box<ASTNode>,
    },
    Negate(Box<ASTNode>),
}

impl ASTNode {
    pub fn binary(left: ASTNode, operator: Operator, right: ASTNode) -> Self {
        ASTNode::BinaryOperation {
            left: Box::new(left),
            operator,
            right: Box::new(right),
        }
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        match self {
            ASTNode::Number(_) => 1,
            ASTNode::BinaryOperation { left, right, .. } => 1 + left.depth().max(right.depth()),
            ASTNode::Negate(operand) => 1 + operand.depth(),
        }
    }
}

/// Fully parenthesized rendering, so the tree shape is visible in logs.
impl fmt::Display for ASTNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ASTNode::Number(value) => write!(f, "{}", value),
            ASTNode::BinaryOperation {
                left,
                operator,
                right,
            } => write!(f, "({} {} {})", left, operator, right),
            ASTNode::Negate(operand) => write!(f, "(-{})", operand),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn apply(&self, left: f64, right: f64) -> Result<f64, EvalError> {
        match self {
            Operator::Add => Ok(left + right),
            Operator::Subtract => Ok(left - right),
            Operator::Multiply => Ok(left * right),
            Operator::Divide => {
                if right == 0.0 {
                    Err(EvalError::DivisionByZero)
                } else {
                    Ok(left / right)
                }
            }
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl TryFrom<TokenKind> for Operator {
    type Error = TokenKind;

    fn try_from(kind: TokenKind) -> Result<Self, Self::Error> {
        match kind {
            TokenKind::Plus => Ok(Operator::Add),
            TokenKind::Minus => Ok(Operator::Subtract),
            TokenKind::Multiply => Ok(Operator::Multiply),
            TokenKind::Divide => Ok(Operator::Divide),
            other => Err(other),
        }
    }
}
