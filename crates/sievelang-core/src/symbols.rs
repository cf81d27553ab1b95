//! Symbol analyzer: enumerate the dotted symbol paths an AST references.
//!
//! This is a read-only walk kept separate from evaluation; nothing in
//! [`crate::eval`] depends on it, but it's a useful building block for a
//! caller that wants to validate a record shape against a filter before
//! running it (e.g. a config linter), or to report which fields a filter
//! touches.

use indexmap::IndexSet;

use crate::ast::Ast;

/// Every distinct dotted symbol path referenced anywhere in `ast`, in the
/// order each was first encountered (left to right, depth first).
pub fn analyze(ast: &Ast) -> IndexSet<String> {
    let mut found = IndexSet::new();
    walk(ast, &mut found);
    found
}

fn walk(ast: &Ast, found: &mut IndexSet<String>) {
    match ast {
        Ast::Symbol(path, _) => {
            found.insert(path.join("."));
        }
        Ast::Value(_, _) | Ast::List(_, _) => {}
        Ast::Not(child, _) => walk(child, found),
        Ast::Binary(_, left, right, _) => {
            walk(left, found);
            walk(right, found);
        }
    }
}
