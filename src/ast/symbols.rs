//! The symbol table built alongside the AST.
//!
//! Keyed by declared name; one entry per name for the whole program.
//! Entries record the kind and position of the first binding occurrence
//! and are never re-created. The only in-place mutation is the kind
//! upgrade of a plain lvalue to `indirect_lvalue`/`vector_lvalue` when
//! the name is later seen used as `*x` or `x[i]`.
//!
//! A `BTreeMap` keeps iteration and JSON key order deterministic.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::Meta;

pub type SymbolTable = BTreeMap<String, SymbolEntry>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    FunctionDefinition,
    VectorDefinition,
    Label,
    Lvalue,
    IndirectLvalue,
    VectorLvalue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymbolEntry {
    #[serde(rename = "type")]
    pub kind: SymbolKind,
    pub line: usize,
    pub start_pos: usize,
    pub column: usize,
    pub end_pos: usize,
    pub end_column: usize,
    /// Declared element count, present only for vector definitions
    /// with an explicit size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
}

impl SymbolEntry {
    pub fn new(kind: SymbolKind, meta: Meta) -> Self {
        SymbolEntry {
            kind,
            line: meta.line,
            start_pos: meta.start_pos,
            column: meta.column,
            end_pos: meta.end_pos,
            end_column: meta.end_column,
            size: None,
        }
    }
}
