use crate::numerical::integration_errors::IntegrationError;
use crate::symbolic::lexer::{Operator, Token, tokenize};
use crate::symbolic::symbolic_engine::Expr;
use log::debug;
//                  grammar, lowest precedence first
//        expr    :=  term   (('+' | '-') term)*
//        term    :=  unary  (('*' | '/') unary)*
//        unary   :=  ('-' | '+') unary  |  power
//        power   :=  primary ('^' unary)?          right associative: 2^3^2 = 2^9
//        primary :=  number | '(' expr ')' | ident '(' expr ')' | ident
//
//  so  -x^2 = -(x^2)   and   2^-1 = 0.5
pub const VARIABLE: &str = "x";
/// deepest nesting of parentheses, function calls, signs and exponents the parser descends
pub const MAX_NESTING_DEPTH: usize = 256;
/// tallest expression tree the parser builds; evaluation recurses once per level
pub const MAX_TREE_HEIGHT: usize = 512;

/// expression under construction together with its height
struct Node {
    expr: Expr,
    height: usize,
}

impl Node {
    fn leaf(expr: Expr) -> Self {
        Node { expr, height: 1 }
    }
}

struct TokenStream<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl<'a> TokenStream<'a> {
    fn new(source: &'a str, tokens: Vec<Token>) -> Self {
        TokenStream {
            source,
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn eat_op(&mut self, op: Operator) -> bool {
        if self.peek() == Some(&Token::Op(op)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn error(&self, reason: impl Into<String>) -> IntegrationError {
        IntegrationError::invalid_expression(self.source, reason)
    }

    fn too_deep(&self) -> IntegrationError {
        self.error("expression nested too deeply")
    }

    fn expect_rparen(&mut self) -> Result<(), IntegrationError> {
        match self.next() {
            Some(Token::RParen) => Ok(()),
            Some(token) => Err(self.error(format!("expected ')', found '{}'", token))),
            None => Err(self.error("unmatched '('")),
        }
    }

    /// runs `parse` one nesting level deeper
    fn nested(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<Node, IntegrationError>,
    ) -> Result<Node, IntegrationError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.too_deep());
        }
        self.depth += 1;
        let node = parse(self);
        self.depth -= 1;
        node
    }

    fn checked_height(&self, height: usize) -> Result<usize, IntegrationError> {
        if height > MAX_TREE_HEIGHT {
            Err(self.too_deep())
        } else {
            Ok(height)
        }
    }

    fn unary(
        &self,
        operand: Node,
        build: impl FnOnce(Expr) -> Expr,
    ) -> Result<Node, IntegrationError> {
        let height = self.checked_height(operand.height + 1)?;
        Ok(Node {
            expr: build(operand.expr),
            height,
        })
    }

    fn binary(
        &self,
        lhs: Node,
        rhs: Node,
        build: impl FnOnce(Expr, Expr) -> Expr,
    ) -> Result<Node, IntegrationError> {
        let height = self.checked_height(lhs.height.max(rhs.height) + 1)?;
        Ok(Node {
            expr: build(lhs.expr, rhs.expr),
            height,
        })
    }

    fn parse_expr(&mut self) -> Result<Node, IntegrationError> {
        let mut lhs = self.parse_term()?;
        loop {
            if self.eat_op(Operator::Plus) {
                let rhs = self.parse_term()?;
                lhs = self.binary(lhs, rhs, |l, r| l + r)?;
            } else if self.eat_op(Operator::Minus) {
                let rhs = self.parse_term()?;
                lhs = self.binary(lhs, rhs, |l, r| l - r)?;
            } else {
                return Ok(lhs);
            }
        }
    }

    fn parse_term(&mut self) -> Result<Node, IntegrationError> {
        let mut lhs = self.parse_unary()?;
        loop {
            if self.eat_op(Operator::Star) {
                let rhs = self.parse_unary()?;
                lhs = self.binary(lhs, rhs, |l, r| l * r)?;
            } else if self.eat_op(Operator::Slash) {
                let rhs = self.parse_unary()?;
                lhs = self.binary(lhs, rhs, |l, r| l / r)?;
            } else {
                return Ok(lhs);
            }
        }
    }

    fn parse_unary(&mut self) -> Result<Node, IntegrationError> {
        if self.eat_op(Operator::Minus) {
            let operand = self.nested(Self::parse_unary)?;
            return match operand.expr {
                Expr::Const(val) => Ok(Node::leaf(Expr::Const(-val))),
                _ => self.unary(operand, |e| -e),
            };
        }
        if self.eat_op(Operator::Plus) {
            return self.nested(Self::parse_unary);
        }
        self.parse_power()
    }

    fn parse_power(&mut self) -> Result<Node, IntegrationError> {
        let base = self.parse_primary()?;
        if self.eat_op(Operator::Caret) {
            let exponent = self.nested(Self::parse_unary)?;
            return self.binary(base, exponent, Expr::pow);
        }
        Ok(base)
    }

    fn parse_primary(&mut self) -> Result<Node, IntegrationError> {
        match self.next() {
            Some(Token::Number(val)) => Ok(Node::leaf(Expr::Const(val))),
            Some(Token::LParen) => {
                let inner = self.nested(Self::parse_expr)?;
                self.expect_rparen()?;
                Ok(inner)
            }
            Some(Token::Ident(name)) => self.parse_identifier(name),
            Some(token) => Err(self.error(format!("unexpected '{}'", token))),
            None => Err(self.error("unexpected end of expression")),
        }
    }

    fn parse_identifier(&mut self, name: String) -> Result<Node, IntegrationError> {
        if self.peek() == Some(&Token::LParen) {
            self.pos += 1;
            let arg = self.nested(Self::parse_expr)?;
            self.expect_rparen()?;
            let height = self.checked_height(arg.height + 1)?;
            let expr = Expr::function(&name, arg.expr)
                .ok_or_else(|| self.error(format!("unknown function '{}'", name)))?;
            return Ok(Node { expr, height });
        }
        if name == VARIABLE {
            return Ok(Node::leaf(Expr::Var(name)));
        }
        if let Some(constant) = Expr::named_constant(&name) {
            return Ok(Node::leaf(constant));
        }
        if Expr::function(&name, Expr::Const(0.0)).is_some() {
            return Err(self.error(format!("function '{}' must be followed by '('", name)));
        }
        Err(self.error(format!("unknown identifier '{}'", name)))
    }
}

pub fn parse_expression_func(input: &str) -> Result<Expr, IntegrationError> {
    let tokens = tokenize(input)?;
    debug!("tokens of '{}': {:?}", input, tokens);
    if tokens.is_empty() {
        return Err(IntegrationError::invalid_expression(input, "empty expression"));
    }
    let mut stream = TokenStream::new(input, tokens);
    let node = stream.parse_expr()?;
    if let Some(token) = stream.peek() {
        return Err(stream.error(format!("unexpected '{}' after complete expression", token)));
    }
    Ok(node.expr)
}

impl Expr {
    /// Parses a function of `x`. Supported: numbers, `x`, `+ - * / ^` (or `**`), parentheses,
    /// unary minus, `sin cos tan sqrt exp log ln abs`, constants `pi`/`π` and `e`.
    pub fn parse_expression(input: &str) -> Result<Expr, IntegrationError> {
        let expr = parse_expression_func(input)?;
        debug!("parsed '{}' into {}", input, expr);
        Ok(expr)
    }
}
