//! Expression rules: the precedence ladder.
//!
//! Levels from loosest to tightest, matching the language's operator
//! table:
//!
//! ```text
//! expression  = ternary
//! ternary     = or ('?' expression ':' expression)?      right-assoc
//! or          = xor ('or' xor)*
//! xor         = and ('xor' and)*
//! and         = equality ('and' equality)*
//! equality    = comparison (('==' | '!=') comparison)*
//! comparison  = addition (('<' | '<=' | '>' | '>=' | 'in') addition)*
//! addition    = multiply (('+' | '-') multiply)*
//! multiply    = unary (('*' | '/' | '%') unary)*
//! unary       = ('not' | '-') unary | postfix             right-assoc
//! postfix     = primary (args | subscript | dot)*
//! ```
//!
//! `a or b ? x : y` therefore parses as `(a or b) ? x : y`, and a dotted
//! access `a.b` lowers to the subscript `a["b"]`.

use din_ir::{BinaryOp, Expr, Literal, MapItem, TokenKind, UnaryOp};

use crate::{ParseResult, Parser};

/// Table row mapping a token to its binary operator.
type OpRow = (TokenKind, BinaryOp);

const OR_OPS: &[OpRow] = &[(TokenKind::Or, BinaryOp::Or)];
const XOR_OPS: &[OpRow] = &[(TokenKind::Xor, BinaryOp::Xor)];
const AND_OPS: &[OpRow] = &[(TokenKind::And, BinaryOp::And)];
const EQUALITY_OPS: &[OpRow] = &[
    (TokenKind::Equal, BinaryOp::Eq),
    (TokenKind::NotEqual, BinaryOp::NotEq),
];
const COMPARISON_OPS: &[OpRow] = &[
    (TokenKind::Lt, BinaryOp::Lt),
    (TokenKind::LtEq, BinaryOp::LtEq),
    (TokenKind::Gt, BinaryOp::Gt),
    (TokenKind::GtEq, BinaryOp::GtEq),
    (TokenKind::In, BinaryOp::In),
];
const ADDITION_OPS: &[OpRow] = &[
    (TokenKind::Plus, BinaryOp::Add),
    (TokenKind::Minus, BinaryOp::Sub),
];
const MULTIPLY_OPS: &[OpRow] = &[
    (TokenKind::Times, BinaryOp::Mul),
    (TokenKind::Divide, BinaryOp::Div),
    (TokenKind::Modulo, BinaryOp::Mod),
];

impl Parser<'_> {
    /// `expression = ternary`
    pub(crate) fn expression(&mut self) -> ParseResult<Expr> {
        self.ternary()
    }

    /// `ternary = or ('?' expression ':' expression)?`
    ///
    /// Right-associative through the recursion into `expression` for both
    /// branches.
    fn ternary(&mut self) -> ParseResult<Expr> {
        let expr = self.binary_level(0)?;
        if self.tok != TokenKind::Question {
            return Ok(expr);
        }
        let pos = self.pos;
        self.next()?;
        let then_expr = self.expression()?;
        if self.tok != TokenKind::Colon {
            return Err(self.error("expected : in ternary expression"));
        }
        self.next()?;
        let else_expr = self.expression()?;
        Ok(Expr::Ternary {
            pos,
            condition: Box::new(expr),
            then_expr: Box::new(then_expr),
            else_expr: Box::new(else_expr),
        })
    }

    /// Left-associative binary levels, loosest first.
    ///
    /// `level` indexes into the ladder; the last level drops into the
    /// unary rule.
    fn binary_level(&mut self, level: usize) -> ParseResult<Expr> {
        const LADDER: &[&[OpRow]] = &[
            OR_OPS,
            XOR_OPS,
            AND_OPS,
            EQUALITY_OPS,
            COMPARISON_OPS,
            ADDITION_OPS,
            MULTIPLY_OPS,
        ];

        let Some(ops) = LADDER.get(level) else {
            return self.unary();
        };

        let mut expr = self.binary_level(level + 1)?;
        'outer: loop {
            for &(tok, op) in *ops {
                if self.tok == tok {
                    let pos = self.pos;
                    self.next()?;
                    let right = self.binary_level(level + 1)?;
                    expr = Expr::Binary {
                        pos,
                        left: Box::new(expr),
                        op,
                        right: Box::new(right),
                    };
                    continue 'outer;
                }
            }
            break;
        }
        Ok(expr)
    }

    /// `unary = ('not' | '-') unary | postfix`
    fn unary(&mut self) -> ParseResult<Expr> {
        let op = match self.tok {
            TokenKind::Not => UnaryOp::Not,
            TokenKind::Minus => UnaryOp::Neg,
            _ => return self.postfix(),
        };
        let pos = self.pos;
        self.next()?;
        let operand = self.unary()?;
        Ok(Expr::Unary {
            pos,
            op,
            operand: Box::new(operand),
        })
    }

    /// `postfix = primary (args | subscript | dot)*`
    fn postfix(&mut self) -> ParseResult<Expr> {
        let mut expr = self.primary()?;
        loop {
            match self.tok {
                TokenKind::LParen => {
                    let pos = self.pos;
                    self.next()?;
                    let (args, spread_last) = self.call_args()?;
                    expr = Expr::Call {
                        pos,
                        callee: Box::new(expr),
                        args,
                        spread_last,
                    };
                }
                TokenKind::LBracket => {
                    let pos = self.pos;
                    self.next()?;
                    let index = self.expression()?;
                    self.expect(TokenKind::RBracket)?;
                    expr = Expr::Subscript {
                        pos,
                        container: Box::new(expr),
                        index: Box::new(index),
                    };
                }
                TokenKind::Dot => {
                    let pos = self.pos;
                    self.next()?;
                    let name_pos = self.pos;
                    let name = self.take_text();
                    self.expect(TokenKind::Name)?;
                    expr = Expr::Subscript {
                        pos,
                        container: Box::new(expr),
                        index: Box::new(Expr::Literal {
                            pos: name_pos,
                            value: Literal::Str(name),
                        }),
                    };
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    /// `args = ')' | expression (',' expression)* '...'? ','? ')'`
    ///
    /// `...` marks the final argument as a spread and may only appear
    /// last. Does not consume the opening parenthesis; consumes the
    /// closing one.
    fn call_args(&mut self) -> ParseResult<(Vec<Expr>, bool)> {
        let mut args = Vec::new();
        let mut got_comma = true;
        let mut got_ellipsis = false;
        while self.tok != TokenKind::RParen && self.tok != TokenKind::Eof && !got_ellipsis {
            if !got_comma {
                return Err(self.error("expected , between arguments"));
            }
            args.push(self.expression()?);
            if self.tok == TokenKind::Ellipsis {
                got_ellipsis = true;
                self.next()?;
            }
            if self.tok == TokenKind::Comma {
                got_comma = true;
                self.next()?;
            } else {
                got_comma = false;
            }
        }
        if self.tok != TokenKind::RParen && got_ellipsis {
            return Err(self.error("can only have ... after last argument"));
        }
        self.expect(TokenKind::RParen)?;
        Ok((args, got_ellipsis))
    }

    /// `primary = NAME | INT | FLOAT | STR | TRUE | FALSE | NULL | list
    ///          | map | FUN params block | '(' expression ')'`
    fn primary(&mut self) -> ParseResult<Expr> {
        match self.tok {
            TokenKind::Name => {
                let pos = self.pos;
                let name = self.take_text();
                self.next()?;
                Ok(Expr::Variable { pos, name })
            }
            TokenKind::Int => {
                let pos = self.pos;
                let text = self.take_text();
                self.next()?;
                let n: i64 = text
                    .parse()
                    .map_err(|_| self.error(format!("integer literal {text} out of range")))?;
                Ok(Expr::Literal {
                    pos,
                    value: Literal::Int(n),
                })
            }
            TokenKind::Float => {
                let pos = self.pos;
                let text = self.take_text();
                self.next()?;
                let n: f64 = text
                    .parse()
                    .map_err(|_| self.error(format!("invalid float literal {text}")))?;
                Ok(Expr::Literal {
                    pos,
                    value: Literal::Float(n),
                })
            }
            TokenKind::Str => {
                let pos = self.pos;
                let value = self.take_text();
                self.next()?;
                Ok(Expr::Literal {
                    pos,
                    value: Literal::Str(value),
                })
            }
            TokenKind::True => {
                let pos = self.pos;
                self.next()?;
                Ok(Expr::Literal {
                    pos,
                    value: Literal::Bool(true),
                })
            }
            TokenKind::False => {
                let pos = self.pos;
                self.next()?;
                Ok(Expr::Literal {
                    pos,
                    value: Literal::Bool(false),
                })
            }
            TokenKind::Null => {
                let pos = self.pos;
                self.next()?;
                Ok(Expr::Literal {
                    pos,
                    value: Literal::Null,
                })
            }
            TokenKind::LBracket => self.list_literal(),
            TokenKind::LBrace => self.map_literal(),
            TokenKind::Fun => {
                let pos = self.pos;
                self.next()?;
                let (params, variadic) = self.params()?;
                let body = self.block()?;
                Ok(Expr::Function {
                    pos,
                    params,
                    variadic,
                    body,
                })
            }
            TokenKind::LParen => {
                self.next()?;
                let expr = self.expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(expr)
            }
            _ => Err(self.error(format!("expected expression, not {}", self.tok))),
        }
    }

    /// `list = '[' ']' | '[' expression (',' expression)* ','? ']'`
    fn list_literal(&mut self) -> ParseResult<Expr> {
        let pos = self.pos;
        self.expect(TokenKind::LBracket)?;
        let mut items = Vec::new();
        let mut got_comma = true;
        while self.tok != TokenKind::RBracket && self.tok != TokenKind::Eof {
            if !got_comma {
                return Err(self.error("expected , between list elements"));
            }
            items.push(self.expression()?);
            if self.tok == TokenKind::Comma {
                got_comma = true;
                self.next()?;
            } else {
                got_comma = false;
            }
        }
        self.expect(TokenKind::RBracket)?;
        Ok(Expr::List { pos, items })
    }

    /// `map = '{' '}' | '{' key ':' expression (',' key ':' expression)* ','? '}'`
    fn map_literal(&mut self) -> ParseResult<Expr> {
        let pos = self.pos;
        self.expect(TokenKind::LBrace)?;
        let mut items = Vec::new();
        let mut got_comma = true;
        while self.tok != TokenKind::RBrace && self.tok != TokenKind::Eof {
            if !got_comma {
                return Err(self.error("expected , between object items"));
            }
            let key = self.map_key()?;
            self.expect(TokenKind::Colon)?;
            let value = self.expression()?;
            items.push(MapItem { key, value });
            if self.tok == TokenKind::Comma {
                got_comma = true;
                self.next()?;
            } else {
                got_comma = false;
            }
        }
        self.expect(TokenKind::RBrace)?;
        Ok(Expr::Map { pos, items })
    }

    /// A map key: a bare identifier lowers to a string literal of its
    /// lexeme; anything else is a general expression that must evaluate
    /// to a string at run time.
    fn map_key(&mut self) -> ParseResult<Expr> {
        if self.tok == TokenKind::Name {
            let pos = self.pos;
            let name = self.take_text();
            self.next()?;
            return Ok(Expr::Literal {
                pos,
                value: Literal::Str(name),
            });
        }
        self.expression()
    }
}
