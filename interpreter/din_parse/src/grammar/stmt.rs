//! Statement and block rules.

use din_ir::{BinaryOp, Block, Expr, Program, Stmt, TokenKind};

use crate::{ParseResult, Parser};

impl Parser<'_> {
    /// `program = statement*`
    pub(crate) fn program(&mut self) -> ParseResult<Program> {
        let statements = self.statements(TokenKind::Eof)?;
        Ok(Program::new(statements))
    }

    /// Statements up to (not consuming) the `end` token kind or EOF.
    fn statements(&mut self, end: TokenKind) -> ParseResult<Block> {
        let mut statements = Block::new();
        while self.tok != end && self.tok != TokenKind::Eof {
            statements.push(self.statement()?);
        }
        Ok(statements)
    }

    /// `statement = if | while | for | return | break | continue | import
    ///            | fun | try | assignment-or-expression`
    fn statement(&mut self) -> ParseResult<Stmt> {
        match self.tok {
            TokenKind::If => self.if_stmt(),
            TokenKind::While => self.while_stmt(),
            TokenKind::For => self.for_stmt(),
            TokenKind::Return => self.return_stmt(),
            TokenKind::Break => self.break_stmt(),
            TokenKind::Continue => self.continue_stmt(),
            TokenKind::Import => self.import_stmt(),
            TokenKind::Fun => self.fun_stmt(),
            TokenKind::Try => self.try_catch_stmt(),
            _ => self.assign_or_expression_stmt(),
        }
    }

    /// An expression statement, a plain assignment, or a compound
    /// assignment (desugared to `target = target op value`).
    ///
    /// The left side of any assignment must be a variable or subscript;
    /// dotted access already lowered to a subscript in the expression
    /// grammar.
    fn assign_or_expression_stmt(&mut self) -> ParseResult<Stmt> {
        let stmt_pos = self.pos;
        let expr = self.expression()?;

        let compound = match self.tok {
            TokenKind::PlusAssign => Some(BinaryOp::Add),
            TokenKind::MinusAssign => Some(BinaryOp::Sub),
            TokenKind::TimesAssign => Some(BinaryOp::Mul),
            TokenKind::DivideAssign => Some(BinaryOp::Div),
            TokenKind::ModuloAssign => Some(BinaryOp::Mod),
            _ => None,
        };

        if self.tok == TokenKind::Assign || compound.is_some() {
            let pos = self.pos;
            if !expr.is_assign_target() {
                return Err(
                    self.error("expected name, subscript, or dot expression on left side of =")
                );
            }
            self.next()?;
            let rhs = self.expression()?;
            let value = match compound {
                Some(op) => Expr::Binary {
                    pos,
                    left: Box::new(expr.clone()),
                    op,
                    right: Box::new(rhs),
                },
                None => rhs,
            };
            return Ok(Stmt::Assign {
                pos,
                target: expr,
                value,
            });
        }

        Ok(Stmt::Expression {
            pos: stmt_pos,
            expr,
        })
    }

    /// `block = '{' statement* '}' | ':' statement* <delim>`
    ///
    /// In the `:` form the statements run to `end` (consumed here), or to
    /// an `else`/`catch` that belongs to the enclosing construct (left for
    /// the caller).
    pub(crate) fn block(&mut self) -> ParseResult<Block> {
        match self.tok {
            TokenKind::LBrace => {
                self.next()?;
                let body = self.statements(TokenKind::RBrace)?;
                self.expect(TokenKind::RBrace)?;
                Ok(body)
            }
            TokenKind::Colon => {
                self.next()?;
                let mut statements = Block::new();
                while !self.matches(&[
                    TokenKind::End,
                    TokenKind::Else,
                    TokenKind::Catch,
                    TokenKind::Eof,
                ]) {
                    statements.push(self.statement()?);
                }
                if self.tok == TokenKind::End {
                    self.next()?;
                }
                Ok(statements)
            }
            _ => Err(self.error(format!("expected {{ or :, not {}", self.tok))),
        }
    }

    /// `if = IF '(' expression ')' THEN block [ELSE (block | if)]`
    ///
    /// An `else if` nests the inner `if` inside the else block, so one
    /// `end` closes the whole chain.
    fn if_stmt(&mut self) -> ParseResult<Stmt> {
        let pos = self.pos;
        self.expect(TokenKind::If)?;
        self.expect(TokenKind::LParen)?;
        let condition = self.expression()?;
        self.expect(TokenKind::RParen)?;
        self.expect(TokenKind::Then)?;

        let body = self.block()?;

        let mut else_body = Block::new();
        if self.tok == TokenKind::Else {
            self.next()?;
            match self.tok {
                TokenKind::LBrace | TokenKind::Colon => {
                    else_body = self.block()?;
                }
                TokenKind::If => {
                    else_body.push(self.if_stmt()?);
                }
                _ => {
                    return Err(
                        self.error(format!("expected {{ or : or if after else, not {}", self.tok))
                    );
                }
            }
        }

        Ok(Stmt::If {
            pos,
            condition,
            body,
            else_body,
        })
    }

    /// `while = WHILE '(' expression ')' block`
    fn while_stmt(&mut self) -> ParseResult<Stmt> {
        let pos = self.pos;
        self.expect(TokenKind::While)?;
        self.expect(TokenKind::LParen)?;
        let condition = self.expression()?;
        self.expect(TokenKind::RParen)?;
        let body = self.block()?;
        Ok(Stmt::While {
            pos,
            condition,
            body,
        })
    }

    /// `for = FOR '(' NAME IN expression ')' block`
    fn for_stmt(&mut self) -> ParseResult<Stmt> {
        let pos = self.pos;
        self.expect(TokenKind::For)?;
        self.expect(TokenKind::LParen)?;
        let name = self.take_text();
        self.expect(TokenKind::Name)?;
        self.expect(TokenKind::In)?;
        let iterable = self.expression()?;
        self.expect(TokenKind::RParen)?;
        let body = self.block()?;
        Ok(Stmt::For {
            pos,
            name,
            iterable,
            body,
        })
    }

    /// `try-catch = TRY block CATCH '(' NAME ')' block`
    ///
    /// The try block's `:`-form delimiter is `catch`; the catch block's is
    /// `end`.
    fn try_catch_stmt(&mut self) -> ParseResult<Stmt> {
        let pos = self.pos;
        self.expect(TokenKind::Try)?;

        let try_block = match self.tok {
            TokenKind::LBrace => {
                self.next()?;
                let body = self.statements(TokenKind::RBrace)?;
                self.expect(TokenKind::RBrace)?;
                body
            }
            TokenKind::Colon => {
                self.next()?;
                self.statements(TokenKind::Catch)?
            }
            _ => return Err(self.error(format!("expected {{ or :, not {}", self.tok))),
        };

        self.expect(TokenKind::Catch)?;
        self.expect(TokenKind::LParen)?;
        let err_name = self.take_text();
        self.expect(TokenKind::Name)?;
        self.expect(TokenKind::RParen)?;
        let catch_block = self.block()?;

        Ok(Stmt::TryCatch {
            pos,
            try_block,
            err_name,
            catch_block,
        })
    }

    /// `return = RETURN expression`
    fn return_stmt(&mut self) -> ParseResult<Stmt> {
        let pos = self.pos;
        self.expect(TokenKind::Return)?;
        let value = self.expression()?;
        Ok(Stmt::Return { pos, value })
    }

    /// `break = BREAK`
    fn break_stmt(&mut self) -> ParseResult<Stmt> {
        let pos = self.pos;
        self.expect(TokenKind::Break)?;
        Ok(Stmt::Break { pos })
    }

    /// `continue = CONTINUE`
    fn continue_stmt(&mut self) -> ParseResult<Stmt> {
        let pos = self.pos;
        self.expect(TokenKind::Continue)?;
        Ok(Stmt::Continue { pos })
    }

    /// `import = IMPORT STR`
    fn import_stmt(&mut self) -> ParseResult<Stmt> {
        let pos = self.pos;
        self.expect(TokenKind::Import)?;
        if self.tok != TokenKind::Str {
            return Err(self.error(format!(
                "expected string filename after import, got {}",
                self.tok
            )));
        }
        let filename = self.take_text();
        self.next()?;
        Ok(Stmt::Import { pos, filename })
    }

    /// `fun = FUN NAME params block | FUN params block`
    ///
    /// The nameless form is an anonymous function expression wrapped in an
    /// expression statement.
    fn fun_stmt(&mut self) -> ParseResult<Stmt> {
        let pos = self.pos;
        self.expect(TokenKind::Fun)?;
        if self.tok == TokenKind::Name {
            let name = self.take_text();
            self.next()?;
            let (params, variadic) = self.params()?;
            let body = self.block()?;
            Ok(Stmt::FunctionDef {
                pos,
                name,
                params,
                variadic,
                body,
            })
        } else {
            let (params, variadic) = self.params()?;
            let body = self.block()?;
            Ok(Stmt::Expression {
                pos,
                expr: Expr::Function {
                    pos,
                    params,
                    variadic,
                    body,
                },
            })
        }
    }

    /// `params = '(' ')' | '(' NAME (',' NAME)* '...'? ','? ')'`
    ///
    /// `...` marks the function variadic and may only follow the last
    /// parameter. Duplicate names are rejected here.
    pub(crate) fn params(&mut self) -> ParseResult<(Vec<String>, bool)> {
        self.expect(TokenKind::LParen)?;
        let mut params: Vec<String> = Vec::new();
        let mut got_comma = true;
        let mut got_ellipsis = false;
        while self.tok != TokenKind::RParen && self.tok != TokenKind::Eof && !got_ellipsis {
            if !got_comma {
                return Err(self.error("expected , between parameters"));
            }
            let param = self.take_text();
            self.expect(TokenKind::Name)?;
            if params.contains(&param) {
                return Err(self.error(format!("duplicate parameter name \"{param}\"")));
            }
            params.push(param);
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
            return Err(self.error("can only have ... after last parameter"));
        }
        self.expect(TokenKind::RParen)?;
        Ok((params, got_ellipsis))
    }
}
