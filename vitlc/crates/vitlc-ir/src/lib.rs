//! vitlc-ir - Lowering and emission seam for the vitlc pipeline.
//!
//! `lower` turns an [`Ast`] outline into a flat [`Ir`]; the emitters write
//! the two output serializations. The text form is deterministic for a
//! given AST and line-oriented so it diffs cleanly; the object form only
//! guarantees its 7-byte magic prefix, with the remaining layout reserved
//! for the backend that plugs in behind these signatures.

use thiserror::Error;
use vitlc_ast::{Ast, ItemKind};
use vitlc_util::{fsx, IoError};

/// Magic prefix of the binary object form: `VLBIN\0\x01`.
pub const OBJECT_MAGIC: &[u8; 7] = b"VLBIN\x00\x01";

/// Lowered module representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ir {
    /// Module name carried through from the AST.
    pub module: String,
    /// Lowered definitions in source order.
    pub defs: Vec<IrDef>,
}

/// One lowered definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IrDef {
    pub kind: IrDefKind,
    pub name: String,
}

/// Definition categories in the IR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IrDefKind {
    Import,
    Func,
    Const,
    Global,
    Type,
}

impl IrDefKind {
    fn mnemonic(self) -> &'static str {
        match self {
            IrDefKind::Import => "import",
            IrDefKind::Func => "func",
            IrDefKind::Const => "const",
            IrDefKind::Global => "global",
            IrDefKind::Type => "type",
        }
    }
}

/// Semantic errors found while lowering.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SemanticError {
    #[error("duplicate definition of '{name}'")]
    Duplicate { name: String },
}

/// Lowers an AST outline to IR.
///
/// Top-level definitions (everything except imports) must have unique
/// names.
pub fn lower(ast: &Ast) -> Result<Ir, SemanticError> {
    let mut defs = Vec::with_capacity(ast.items.len());
    let mut seen = std::collections::HashSet::new();

    for item in &ast.items {
        let kind = match item.kind {
            ItemKind::Import => IrDefKind::Import,
            ItemKind::Fn => IrDefKind::Func,
            ItemKind::Const => IrDefKind::Const,
            ItemKind::Let => IrDefKind::Global,
            ItemKind::Type => IrDefKind::Type,
        };
        if kind != IrDefKind::Import && !seen.insert(item.name.clone()) {
            return Err(SemanticError::Duplicate {
                name: item.name.clone(),
            });
        }
        defs.push(IrDef {
            kind,
            name: item.name.clone(),
        });
    }

    Ok(Ir {
        module: ast
            .module_name
            .clone()
            .unwrap_or_else(|| "<anonymous>".to_string()),
        defs,
    })
}

/// Renders the line-oriented text form. The first line is always `; IR`.
pub fn to_text(ir: &Ir) -> String {
    let mut out = String::from("; IR\n");
    out.push_str(&format!("; module {}\n", ir.module));
    out.push_str(&format!("; defs {}\n", ir.defs.len()));
    for def in &ir.defs {
        match def.kind {
            IrDefKind::Func => {
                out.push_str(&format!("func @{} {{\n  ret\n}}\n", def.name));
            }
            kind => {
                out.push_str(&format!("{} @{}\n", kind.mnemonic(), def.name));
            }
        }
    }
    out
}

/// Renders the binary object form: magic, a little-endian definition
/// count, then the text form as payload.
pub fn to_object(ir: &Ir) -> Vec<u8> {
    let text = to_text(ir);
    let mut out = Vec::with_capacity(OBJECT_MAGIC.len() + 4 + text.len());
    out.extend_from_slice(OBJECT_MAGIC);
    out.extend_from_slice(&(ir.defs.len() as u32).to_le_bytes());
    out.extend_from_slice(text.as_bytes());
    out
}

/// Writes the text form to `path` (or stdout for `-`).
pub fn emit_text(ir: &Ir, path: &str) -> Result<(), IoError> {
    fsx::write_all(path, to_text(ir).as_bytes())
}

/// Writes the object form to `path` (or stdout for `-`).
pub fn emit_object(ir: &Ir, path: &str) -> Result<(), IoError> {
    fsx::write_all(path, &to_object(ir))
}
