/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure and the
/// parse-tree-to-AST transform
///
/// Submodules:
/// - ast: Core AST node definitions
/// - symbols: Symbol table types
/// - transformer: The parse-tree visitor that builds AST and symbol
///   table in one pass
pub mod ast;
pub mod symbols;
pub mod transformer;
