// Copyright (C) 2025 SyncMyOrders Sp. z o.o.
// SPDX-License-Identifier: AGPL-3.0-or-later
//! Recursive-descent parser for skeleton templates.
//!
//! The grammar covers the subset the shipped templates are written in:
//! package and import declarations, one annotated type declaration, fields
//! with optional initializers, methods with annotated parameters, and
//! statement bodies made of locals, call chains, guard conditionals, and
//! returns. Identifiers admit `$`, so placeholder tokens such as `$Clazz$`
//! and `$TaskInput$` survive parsing as ordinary names.

use super::nodes::{
    Annotation, CallExpr, CompilationUnit, Expr, Field, Member, Method, Param, Stmt, TypeDecl,
    TypeRef,
};

/// A failure to parse template source, with position context.
#[derive(Debug, Clone, thiserror::Error)]
#[error("parse error at {line}:{column}: {message}")]
pub struct ParseError {
    /// 1-based source line.
    pub line: usize,
    /// 1-based source column.
    pub column: usize,
    /// What the parser expected or found.
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Str(String),
    Int(i64),
    Long(i64),
    At,
    Dot,
    Comma,
    Semi,
    Assign,
    EqEq,
    LParen,
    RParen,
    LBrace,
    RBrace,
    Lt,
    Gt,
}

#[derive(Debug, Clone, Copy)]
struct Pos {
    line: usize,
    column: usize,
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '$'
}

fn is_ident_part(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

fn lex(source: &str) -> Result<Vec<(Token, Pos)>, ParseError> {
    let mut tokens = Vec::new();
    let mut chars = source.char_indices().peekable();
    let mut line = 1usize;
    let mut column = 1usize;

    macro_rules! error {
        ($pos:expr, $($arg:tt)*) => {
            return Err(ParseError { line: $pos.line, column: $pos.column, message: format!($($arg)*) })
        };
    }

    while let Some(&(idx, c)) = chars.peek() {
        let pos = Pos { line, column };
        match c {
            '\n' => {
                chars.next();
                line += 1;
                column = 1;
            }
            c if c.is_whitespace() => {
                chars.next();
                column += 1;
            }
            '/' => {
                // line or block comment, otherwise unsupported
                chars.next();
                column += 1;
                match chars.peek() {
                    Some(&(_, '/')) => {
                        for (_, c) in chars.by_ref() {
                            if c == '\n' {
                                line += 1;
                                column = 1;
                                break;
                            }
                        }
                    }
                    Some(&(_, '*')) => {
                        chars.next();
                        column += 1;
                        let mut prev = '\0';
                        let mut closed = false;
                        for (_, c) in chars.by_ref() {
                            if c == '\n' {
                                line += 1;
                                column = 1;
                            } else {
                                column += 1;
                            }
                            if prev == '*' && c == '/' {
                                closed = true;
                                break;
                            }
                            prev = c;
                        }
                        if !closed {
                            error!(pos, "unterminated block comment");
                        }
                    }
                    _ => error!(pos, "unexpected character '/'"),
                }
            }
            '"' => {
                chars.next();
                column += 1;
                let mut value = String::new();
                let mut closed = false;
                while let Some((_, c)) = chars.next() {
                    column += 1;
                    match c {
                        '"' => {
                            closed = true;
                            break;
                        }
                        '\\' => match chars.next() {
                            Some((_, 'n')) => value.push('\n'),
                            Some((_, 't')) => value.push('\t'),
                            Some((_, 'r')) => value.push('\r'),
                            Some((_, '"')) => value.push('"'),
                            Some((_, '\\')) => value.push('\\'),
                            other => {
                                error!(pos, "unsupported escape '{:?}' in string literal", other)
                            }
                        },
                        '\n' => error!(pos, "unterminated string literal"),
                        c => value.push(c),
                    }
                }
                if !closed {
                    error!(pos, "unterminated string literal");
                }
                tokens.push((Token::Str(value), pos));
            }
            c if c.is_ascii_digit() => {
                let start = idx;
                let mut end = idx;
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_ascii_digit() {
                        end = i + c.len_utf8();
                        chars.next();
                        column += 1;
                    } else {
                        break;
                    }
                }
                let text = &source[start..end];
                let value: i64 = match text.parse() {
                    Ok(v) => v,
                    Err(_) => error!(pos, "integer literal '{}' out of range", text),
                };
                if let Some(&(_, 'L')) = chars.peek() {
                    chars.next();
                    column += 1;
                    tokens.push((Token::Long(value), pos));
                } else {
                    tokens.push((Token::Int(value), pos));
                }
            }
            c if is_ident_start(c) => {
                let start = idx;
                let mut end = idx;
                while let Some(&(i, c)) = chars.peek() {
                    if is_ident_part(c) {
                        end = i + c.len_utf8();
                        chars.next();
                        column += 1;
                    } else {
                        break;
                    }
                }
                tokens.push((Token::Ident(source[start..end].to_string()), pos));
            }
            '=' => {
                chars.next();
                column += 1;
                if let Some(&(_, '=')) = chars.peek() {
                    chars.next();
                    column += 1;
                    tokens.push((Token::EqEq, pos));
                } else {
                    tokens.push((Token::Assign, pos));
                }
            }
            _ => {
                chars.next();
                column += 1;
                let token = match c {
                    '@' => Token::At,
                    '.' => Token::Dot,
                    ',' => Token::Comma,
                    ';' => Token::Semi,
                    '(' => Token::LParen,
                    ')' => Token::RParen,
                    '{' => Token::LBrace,
                    '}' => Token::RBrace,
                    '<' => Token::Lt,
                    '>' => Token::Gt,
                    c => error!(pos, "unexpected character '{}'", c),
                };
                tokens.push((token, pos));
            }
        }
    }

    Ok(tokens)
}

const MODIFIERS: &[&str] = &["public", "protected", "private", "static", "final", "abstract"];

struct Parser {
    tokens: Vec<(Token, Pos)>,
    pos: usize,
}

impl Parser {
    fn error(&self, message: impl Into<String>) -> ParseError {
        let pos = self
            .tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|(_, p)| *p)
            .unwrap_or(Pos { line: 1, column: 1 });
        ParseError {
            line: pos.line,
            column: pos.column,
            message: message.into(),
        }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset).map(|(t, _)| t)
    }

    fn eat(&mut self, expected: &Token) -> Result<(), ParseError> {
        match self.peek() {
            Some(t) if t == expected => {
                self.pos += 1;
                Ok(())
            }
            Some(t) => Err(self.error(format!("expected {:?}, found {:?}", expected, t))),
            None => Err(self.error(format!("expected {:?}, found end of input", expected))),
        }
    }

    fn eat_ident(&mut self) -> Result<String, ParseError> {
        match self.peek() {
            Some(Token::Ident(name)) => {
                let name = name.clone();
                self.pos += 1;
                Ok(name)
            }
            Some(t) => Err(self.error(format!("expected identifier, found {:?}", t))),
            None => Err(self.error("expected identifier, found end of input")),
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> Result<(), ParseError> {
        match self.peek() {
            Some(Token::Ident(name)) if name == keyword => {
                self.pos += 1;
                Ok(())
            }
            _ => Err(self.error(format!("expected '{}'", keyword))),
        }
    }

    fn at_keyword(&self, keyword: &str) -> bool {
        matches!(self.peek(), Some(Token::Ident(name)) if name == keyword)
    }

    /// Dotted identifier sequence: `a.b.c`.
    fn qualified_name(&mut self) -> Result<String, ParseError> {
        let mut name = self.eat_ident()?;
        while self.peek() == Some(&Token::Dot) {
            // only consume the dot when an identifier follows
            match self.peek_at(1) {
                Some(Token::Ident(_)) => {
                    self.pos += 1;
                    name.push('.');
                    name.push_str(&self.eat_ident()?);
                }
                _ => break,
            }
        }
        Ok(name)
    }

    fn unit(&mut self) -> Result<CompilationUnit, ParseError> {
        let mut package = None;
        let mut imports = Vec::new();

        if self.at_keyword("package") {
            self.eat_keyword("package")?;
            package = Some(self.qualified_name()?);
            self.eat(&Token::Semi)?;
        }
        while self.at_keyword("import") {
            self.eat_keyword("import")?;
            imports.push(self.qualified_name()?);
            self.eat(&Token::Semi)?;
        }

        let type_decl = if self.peek().is_some() {
            Some(self.type_decl()?)
        } else {
            None
        };

        Ok(CompilationUnit {
            package,
            imports,
            type_decl,
        })
    }

    fn annotations(&mut self) -> Result<Vec<Annotation>, ParseError> {
        let mut annotations = Vec::new();
        while self.peek() == Some(&Token::At) {
            self.eat(&Token::At)?;
            let name = self.qualified_name()?;
            let value = if self.peek() == Some(&Token::LParen) {
                self.eat(&Token::LParen)?;
                let value = self.expr()?;
                self.eat(&Token::RParen)?;
                Some(value)
            } else {
                None
            };
            annotations.push(Annotation { name, value });
        }
        Ok(annotations)
    }

    fn modifiers(&mut self) -> Vec<String> {
        let mut modifiers = Vec::new();
        while let Some(Token::Ident(name)) = self.peek() {
            if MODIFIERS.contains(&name.as_str()) {
                modifiers.push(name.clone());
                self.pos += 1;
            } else {
                break;
            }
        }
        modifiers
    }

    fn type_decl(&mut self) -> Result<TypeDecl, ParseError> {
        let annotations = self.annotations()?;
        let modifiers = self.modifiers();
        self.eat_keyword("class")?;
        let name = self.eat_ident()?;
        self.eat(&Token::LBrace)?;

        let mut members = Vec::new();
        while self.peek() != Some(&Token::RBrace) {
            if self.peek().is_none() {
                return Err(self.error("unterminated class body"));
            }
            members.push(self.member()?);
        }
        self.eat(&Token::RBrace)?;

        Ok(TypeDecl {
            annotations,
            modifiers,
            name,
            members,
        })
    }

    fn member(&mut self) -> Result<Member, ParseError> {
        let annotations = self.annotations()?;
        let modifiers = self.modifiers();
        let ty = self.type_ref()?;
        let name = self.eat_ident()?;

        if self.peek() == Some(&Token::LParen) {
            let params = self.params()?;
            self.eat(&Token::LBrace)?;
            let mut body = Vec::new();
            while self.peek() != Some(&Token::RBrace) {
                if self.peek().is_none() {
                    return Err(self.error("unterminated method body"));
                }
                body.push(self.stmt()?);
            }
            self.eat(&Token::RBrace)?;
            Ok(Member::Method(Method {
                annotations,
                modifiers,
                return_ty: ty,
                name,
                params,
                body,
            }))
        } else {
            let init = if self.peek() == Some(&Token::Assign) {
                self.eat(&Token::Assign)?;
                Some(self.expr()?)
            } else {
                None
            };
            self.eat(&Token::Semi)?;
            Ok(Member::Field(Field {
                annotations,
                modifiers,
                ty,
                name,
                init,
            }))
        }
    }

    fn params(&mut self) -> Result<Vec<Param>, ParseError> {
        self.eat(&Token::LParen)?;
        let mut params = Vec::new();
        if self.peek() != Some(&Token::RParen) {
            loop {
                let annotations = self.annotations()?;
                let ty = self.type_ref()?;
                let name = self.eat_ident()?;
                params.push(Param {
                    annotations,
                    ty,
                    name,
                });
                if self.peek() == Some(&Token::Comma) {
                    self.eat(&Token::Comma)?;
                } else {
                    break;
                }
            }
        }
        self.eat(&Token::RParen)?;
        Ok(params)
    }

    fn type_ref(&mut self) -> Result<TypeRef, ParseError> {
        let name = self.qualified_name()?;
        let mut type_args = Vec::new();
        if self.peek() == Some(&Token::Lt) {
            self.eat(&Token::Lt)?;
            loop {
                type_args.push(self.type_ref()?);
                match self.peek() {
                    Some(Token::Comma) => {
                        self.eat(&Token::Comma)?;
                    }
                    Some(Token::Gt) => break,
                    _ => return Err(self.error("expected ',' or '>' in type arguments")),
                }
            }
            self.eat(&Token::Gt)?;
        }
        Ok(TypeRef { name, type_args })
    }

    fn stmt(&mut self) -> Result<Stmt, ParseError> {
        if self.at_keyword("return") {
            self.eat_keyword("return")?;
            if self.peek() == Some(&Token::Semi) {
                self.eat(&Token::Semi)?;
                return Ok(Stmt::Return(None));
            }
            let expr = self.expr()?;
            self.eat(&Token::Semi)?;
            return Ok(Stmt::Return(Some(expr)));
        }

        if self.at_keyword("if") {
            self.eat_keyword("if")?;
            self.eat(&Token::LParen)?;
            let cond = self.expr()?;
            self.eat(&Token::RParen)?;
            self.eat(&Token::LBrace)?;
            let mut then = Vec::new();
            while self.peek() != Some(&Token::RBrace) {
                if self.peek().is_none() {
                    return Err(self.error("unterminated if body"));
                }
                then.push(self.stmt()?);
            }
            self.eat(&Token::RBrace)?;
            return Ok(Stmt::If { cond, then });
        }

        // speculative local declaration: Type name [= init] ;
        let checkpoint = self.pos;
        if let Ok(ty) = self.type_ref() {
            if let Some(Token::Ident(_)) = self.peek() {
                let name = self.eat_ident()?;
                let init = if self.peek() == Some(&Token::Assign) {
                    self.eat(&Token::Assign)?;
                    Some(self.expr()?)
                } else {
                    None
                };
                self.eat(&Token::Semi)?;
                return Ok(Stmt::Local { ty, name, init });
            }
        }
        self.pos = checkpoint;

        let expr = self.expr()?;
        self.eat(&Token::Semi)?;
        Ok(Stmt::Expr(expr))
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.unary()?;
        if self.peek() == Some(&Token::EqEq) {
            self.eat(&Token::EqEq)?;
            let rhs = self.unary()?;
            return Ok(Expr::Eq(Box::new(lhs), Box::new(rhs)));
        }
        Ok(lhs)
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.primary()?;
        // chained calls: expr.method(args)
        while self.peek() == Some(&Token::Dot) {
            match self.peek_at(1) {
                Some(Token::Ident(_)) if self.peek_at(2) == Some(&Token::LParen) => {
                    self.eat(&Token::Dot)?;
                    let name = self.eat_ident()?;
                    let args = self.call_args()?;
                    expr = Expr::Call(CallExpr::chained(expr, name, args));
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        match self.peek() {
            Some(Token::Str(value)) => {
                let value = value.clone();
                self.pos += 1;
                Ok(Expr::Str(value))
            }
            Some(Token::Int(value)) => {
                let value = *value;
                self.pos += 1;
                match i32::try_from(value) {
                    Ok(v) => Ok(Expr::Int(v)),
                    Err(_) => Ok(Expr::Long(value)),
                }
            }
            Some(Token::Long(value)) => {
                let value = *value;
                self.pos += 1;
                Ok(Expr::Long(value))
            }
            Some(Token::Ident(name)) if name == "null" => {
                self.pos += 1;
                Ok(Expr::Null)
            }
            Some(Token::Ident(name)) if name == "true" => {
                self.pos += 1;
                Ok(Expr::Bool(true))
            }
            Some(Token::Ident(name)) if name == "false" => {
                self.pos += 1;
                Ok(Expr::Bool(false))
            }
            Some(Token::Ident(name)) if name == "new" => {
                self.pos += 1;
                let ty = self.type_ref()?;
                self.eat(&Token::LParen)?;
                self.eat(&Token::RParen)?;
                Ok(Expr::New(ty))
            }
            Some(Token::Ident(_)) => self.name_or_call(),
            Some(t) => Err(self.error(format!("unexpected token {:?} in expression", t))),
            None => Err(self.error("unexpected end of input in expression")),
        }
    }

    /// A dotted name where the final segment may be invoked:
    /// `a.b` parses to a name, `a.b.c(x)` to a call on receiver `a.b`,
    /// and `f(x)` to an unqualified call.
    fn name_or_call(&mut self) -> Result<Expr, ParseError> {
        let mut segments = vec![self.eat_ident()?];
        loop {
            if self.peek() == Some(&Token::Dot) {
                if let Some(Token::Ident(_)) = self.peek_at(1) {
                    // stop before a segment that begins a chained call;
                    // `unary` handles the call itself
                    if self.peek_at(2) == Some(&Token::LParen) {
                        break;
                    }
                    self.pos += 1;
                    segments.push(self.eat_ident()?);
                    continue;
                }
            }
            break;
        }

        if self.peek() == Some(&Token::LParen) {
            // only reachable for a single-segment unqualified call
            let name = segments.pop().unwrap_or_default();
            let args = self.call_args()?;
            if segments.is_empty() {
                return Ok(Expr::Call(CallExpr::function(name, args)));
            }
            return Ok(Expr::Call(CallExpr::chained(
                Expr::Name(segments.join(".")),
                name,
                args,
            )));
        }

        Ok(Expr::Name(segments.join(".")))
    }

    fn call_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.eat(&Token::LParen)?;
        let mut args = Vec::new();
        if self.peek() != Some(&Token::RParen) {
            loop {
                args.push(self.expr()?);
                if self.peek() == Some(&Token::Comma) {
                    self.eat(&Token::Comma)?;
                } else {
                    break;
                }
            }
        }
        self.eat(&Token::RParen)?;
        Ok(args)
    }
}

/// Parse template source into a compilation unit.
pub fn parse(source: &str) -> Result<CompilationUnit, ParseError> {
    let tokens = lex(source)?;
    let mut parser = Parser { tokens, pos: 0 };
    let unit = parser.unit()?;
    if parser.pos != parser.tokens.len() {
        return Err(parser.error("trailing input after type declaration"));
    }
    Ok(unit)
}
