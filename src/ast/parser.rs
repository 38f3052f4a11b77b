use crate::ast::{ASTNode, Operator};
use crate::error::{EvalError, Expected, SyntaxError};
use crate::lexer::{tokenize, Token, TokenKind};
use log::{debug, trace};

/// Default limit on both parenthesis/negation nesting and expression tree height.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// A subtree and the number of levels on its longest path.
struct Parsed {
    node: ASTNode,
    height: usize,
}

/// Recursive-descent parser over a token slice.
///
/// ```text
/// expression := term ( ('+' | '-') term )*
/// term       := factor ( ('*' | '/') factor )*
/// factor     := NUMBER | '(' expression ')' | '-' factor
/// ```
///
/// Operators of equal precedence fold to the left as they are consumed.
/// `max_depth` caps the parenthesis/negation nesting and the height of the
/// resulting tree, so `1+1+...+1` with more terms than the limit is rejected.
pub struct Parser<'a> {
    tokens: &'a [Token],
    position: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self::with_max_depth(tokens, DEFAULT_MAX_DEPTH)
    }

    pub fn with_max_depth(tokens: &'a [Token], max_depth: usize) -> Self {
        Self {
            tokens,
            position: 0,
            depth: 0,
            max_depth,
        }
    }

    /// Tokenizes and parses `input` with the default depth limit.
    pub fn parse_expression(input: &str) -> Result<ASTNode, EvalError> {
        Parser::parse_expression_with_max_depth(input, DEFAULT_MAX_DEPTH)
    }

    pub fn parse_expression_with_max_depth(
        input: &str,
        max_depth: usize,
    ) -> Result<ASTNode, EvalError> {
        debug!("Parsing expression: {}", input);
        let tokens = tokenize(input)?;
        let ast = Parser::with_max_depth(&tokens, max_depth).parse()?;
        debug!("Parse result: {}", ast);
        Ok(ast)
    }

    /// Parses the whole token slice; anything after the expression is an error.
    pub fn parse(mut self) -> Result<ASTNode, SyntaxError> {
        let parsed = self.expression()?;
        if !self.current().is_end() {
            return Err(self.error(Expected::EndOfInput));
        }
        Ok(parsed.node)
    }

    fn expression(&mut self) -> Result<Parsed, SyntaxError> {
        let mut parsed = self.term()?;
        while let Some((operator, at)) = self.eat_operator(&[Operator::Add, Operator::Subtract]) {
            let right = self.term()?;
            parsed = self.fold(parsed, operator, right, at)?;
        }
        Ok(parsed)
    }

    fn term(&mut self) -> Result<Parsed, SyntaxError> {
        let mut parsed = self.factor()?;
        while let Some((operator, at)) = self.eat_operator(&[Operator::Multiply, Operator::Divide])
        {
            let right = self.factor()?;
            parsed = self.fold(parsed, operator, right, at)?;
        }
        Ok(parsed)
    }

    fn factor(&mut self) -> Result<Parsed, SyntaxError> {
        let token = self.current();
        trace!("Building factor from {}", token);
        match token.kind {
            TokenKind::Number(value) => {
                self.advance();
                Ok(Parsed {
                    node: ASTNode::Number(value),
                    height: 1,
                })
            }
            TokenKind::LeftParen => self.nested(|parser| {
                parser.advance();
                let inner = parser.expression()?;
                parser.expect(TokenKind::RightParen, Expected::ClosingParen)?;
                Ok(inner)
            }),
            TokenKind::Minus => self.nested(|parser| {
                parser.advance();
                let operand = parser.factor()?;
                let height = parser.check_height(operand.height + 1, token)?;
                Ok(Parsed {
                    node: ASTNode::Negate(Box::new(operand.node)),
                    height,
                })
            }),
            _ => Err(self.error(Expected::Operand)),
        }
    }

    /// Joins two operands under `operator`, the token at `at`.
    fn fold(
        &self,
        left: Parsed,
        operator: Operator,
        right: Parsed,
        at: Token,
    ) -> Result<Parsed, SyntaxError> {
        let height = self.check_height(1 + left.height.max(right.height), at)?;
        Ok(Parsed {
            node: ASTNode::binary(left.node, operator, right.node),
            height,
        })
    }

    /// Every later walk over the tree recurses once per level, so long operator
    /// chains are bounded here just like parentheses.
    fn check_height(&self, height: usize, at: Token) -> Result<usize, SyntaxError> {
        if height > self.max_depth {
            return Err(SyntaxError {
                position: at.position,
                expected: Expected::NestingAtMost(self.max_depth),
                found: at.kind,
            });
        }
        Ok(height)
    }

    /// Runs `parse` one nesting level deeper, refusing to go past `max_depth`.
    fn nested<F>(&mut self, parse: F) -> Result<Parsed, SyntaxError>
    where
        F: FnOnce(&mut Self) -> Result<Parsed, SyntaxError>,
    {
        if self.depth >= self.max_depth {
            return Err(self.error(Expected::NestingAtMost(self.max_depth)));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    fn eat_operator(&mut self, allowed: &[Operator]) -> Option<(Operator, Token)> {
        let token = self.current();
        let operator = Operator::try_from(token.kind).ok()?;
        if allowed.contains(&operator) {
            self.advance();
            Some((operator, token))
        } else {
            None
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: Expected) -> Result<Token, SyntaxError> {
        let token = self.current();
        if token.kind != kind {
            return Err(self.error(expected));
        }
        self.advance();
        Ok(token)
    }

    /// The token under the cursor. A slice missing its end marker reads as ending.
    fn current(&self) -> Token {
        self.tokens.get(self.position).copied().unwrap_or_else(|| {
            let end = self.tokens.last().map_or(0, |token| token.position + 1);
            Token::new(TokenKind::EndOfInput, end)
        })
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() && !self.current().is_end() {
            self.position += 1;
        }
    }

    fn error(&self, expected: Expected) -> SyntaxError {
        let token = self.current();
        SyntaxError {
            position: token.position,
            expected,
            found: token.kind,
        }
    }
}

/// Parses a token sequence produced by [`tokenize`].
pub fn parse(tokens: &[Token]) -> Result<ASTNode, SyntaxError> {
    Parser::new(tokens).parse()
}
