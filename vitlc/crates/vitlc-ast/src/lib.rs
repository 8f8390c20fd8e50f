//! vitlc-ast - Syntax tree seam for the vitlc pipeline.
//!
//! The driver only depends on the contracts here: `parse` produces an
//! owned [`Ast`] (holding no references into the source buffer), and
//! [`ast_dump`] writes a human-readable rendition whose exact shape is not
//! a stable interface. The current parser is a shallow outline pass over
//! the token stream: it records the module header and top-level items so
//! dumps and IR have real content, and leaves expression grammar to a later
//! phase behind the same signatures.

use thiserror::Error;
use vitlc_lex::{Keyword, Lexer, TokenKind};
use vitlc_util::{fsx, IoError, Pos, SourceBuffer};

/// A parsed module outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ast {
    /// Name from the `module` header, if present.
    pub module_name: Option<String>,
    /// Top-level items in source order.
    pub items: Vec<Item>,
}

impl Ast {
    /// One-line summary for trace output.
    pub fn summary(&self) -> String {
        format!(
            "module {} with {} top-level item(s)",
            self.module_name.as_deref().unwrap_or("<anonymous>"),
            self.items.len()
        )
    }
}

/// A top-level item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub kind: ItemKind,
    /// Item name; import paths keep their `::` separators.
    pub name: String,
    /// Position of the introducing keyword.
    pub line: u32,
    pub column: u32,
}

/// Top-level item categories the outline pass distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
    Import,
    Fn,
    Const,
    Let,
    Type,
}

impl ItemKind {
    fn label(self) -> &'static str {
        match self {
            ItemKind::Import => "import",
            ItemKind::Fn => "fn",
            ItemKind::Const => "const",
            ItemKind::Let => "let",
            ItemKind::Type => "type",
        }
    }
}

/// A syntax error with its position.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{line}:{column}: {message}")]
pub struct ParseError {
    pub line: u32,
    pub column: u32,
    pub message: String,
}

impl ParseError {
    fn at(pos: Pos, message: impl Into<String>) -> Self {
        Self {
            line: pos.line,
            column: pos.column,
            message: message.into(),
        }
    }
}

/// Parses a source buffer into a module outline.
///
/// The driver lexes the buffer before calling this, so an `Error` token
/// here means the caller skipped that phase; it is reported as a parse
/// error rather than ignored.
pub fn parse(source: &SourceBuffer) -> Result<Ast, ParseError> {
    let mut lexer = Lexer::new(source);
    let mut ast = Ast {
        module_name: None,
        items: Vec::new(),
    };
    let mut depth = 0u32;

    loop {
        let token = lexer.next_token();
        match &token.kind {
            TokenKind::Eof => break,
            TokenKind::Error(message) => {
                return Err(ParseError::at(token.pos, message.clone()));
            }
            TokenKind::LBrace => depth += 1,
            TokenKind::RBrace => depth = depth.saturating_sub(1),
            _ if depth > 0 => {}
            TokenKind::Keyword(Keyword::Module) => {
                let name = expect_path(&mut lexer, "module name")?;
                // Only the first header names the module.
                if ast.module_name.is_none() {
                    ast.module_name = Some(name);
                }
            }
            TokenKind::Keyword(Keyword::Import) | TokenKind::Keyword(Keyword::Use) => {
                let name = expect_path(&mut lexer, "import path")?;
                ast.items.push(item(ItemKind::Import, name, token.pos));
            }
            TokenKind::Keyword(Keyword::Fn) => {
                let name = expect_ident(&mut lexer, "function name")?;
                ast.items.push(item(ItemKind::Fn, name, token.pos));
            }
            TokenKind::Keyword(Keyword::Const) => {
                let name = expect_ident(&mut lexer, "constant name")?;
                ast.items.push(item(ItemKind::Const, name, token.pos));
            }
            TokenKind::Keyword(Keyword::Let) => {
                let name = expect_binding(&mut lexer)?;
                ast.items.push(item(ItemKind::Let, name, token.pos));
            }
            TokenKind::Keyword(Keyword::Type) => {
                let name = expect_ident(&mut lexer, "type name")?;
                ast.items.push(item(ItemKind::Type, name, token.pos));
            }
            _ => {}
        }
    }
    Ok(ast)
}

fn item(kind: ItemKind, name: String, pos: Pos) -> Item {
    Item {
        kind,
        name,
        line: pos.line,
        column: pos.column,
    }
}

fn expect_ident(lexer: &mut Lexer<'_>, what: &str) -> Result<String, ParseError> {
    let token = lexer.next_token();
    match token.kind {
        TokenKind::Ident(name) => Ok(name.to_string()),
        _ => Err(ParseError::at(token.pos, format!("expected {what}"))),
    }
}

/// `a` or `a::b::c`.
fn expect_path(lexer: &mut Lexer<'_>, what: &str) -> Result<String, ParseError> {
    let mut path = expect_ident(lexer, what)?;
    while matches!(lexer.peek().kind, TokenKind::ColonColon) {
        lexer.next_token();
        path.push_str("::");
        path.push_str(&expect_ident(lexer, what)?);
    }
    Ok(path)
}

/// `let` and `let mut` both bind a name.
fn expect_binding(lexer: &mut Lexer<'_>) -> Result<String, ParseError> {
    if matches!(lexer.peek().kind, TokenKind::Keyword(Keyword::Mut)) {
        lexer.next_token();
    }
    expect_ident(lexer, "binding name")
}

/// Writes a textual dump of the AST.
///
/// Human-readable; consumers must tolerate whitespace differences.
pub fn ast_dump(ast: &Ast, path: &str) -> Result<(), IoError> {
    let mut out = String::new();
    out.push_str("module ");
    out.push_str(ast.module_name.as_deref().unwrap_or("<anonymous>"));
    out.push('\n');
    for item in &ast.items {
        out.push_str(&format!(
            "  {} {} @{}:{}\n",
            item.kind.label(),
            item.name,
            item.line,
            item.column
        ));
    }
    fsx::write_all(path, out.as_bytes())
}
