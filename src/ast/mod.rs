/// AST (Abstract Syntax Tree) module
/// Contains the declaration tree produced by the parser
///
/// Submodules:
/// - ast: The document root and the value union
/// - declarations: Function calls and target declarations
/// - values: Unresolved variable references
pub mod ast;
pub mod declarations;
pub mod values;
