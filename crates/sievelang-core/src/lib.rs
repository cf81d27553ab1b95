//! Tokenizer, parser, and evaluator for the sieve filter language.
//!
//! A filter source text goes through three stages: [`lexer::tokenize`]
//! produces a flat token stream; [`group`], [`paren`], and [`precedence`]
//! progressively reshape that stream into a tree; [`ast::build`] reduces the
//! tree into a single [`ast::Ast`]. [`compile_filter`] and [`compile_sieve`]
//! run the whole pipeline. [`eval::Evaluator`] then walks an `Ast` against a
//! [`record::Record`] to produce a boolean, and [`Sieve`] OR-composes a
//! vector of compiled predicates with first-match short-circuiting.
//!
//! ```
//! use sievelang_core::{compile_filter, matches};
//! use serde_json::json;
//!
//! let ast = compile_filter(r#"location.country == "US""#).unwrap();
//! let record = json!({"location": {"country": "US"}});
//! assert!(matches(&ast, &record).unwrap());
//! ```

pub mod ast;
pub mod compile;
pub mod diagnostics;
pub mod error;
pub mod eval;
pub mod group;
pub mod lexer;
pub mod paren;
pub mod pos;
pub mod precedence;
pub mod record;
pub mod regexcache;
pub mod sieve;
pub mod symbols;

pub use ast::Ast;
pub use compile::{compile_filter, compile_sieve};
pub use error::{EvalError, Side, UserError};
pub use eval::Evaluator;
pub use pos::Pos;
pub use record::Record;
pub use sieve::Sieve;

/// Evaluate a single compiled filter against `record`.
///
/// A free function rather than a method on `Ast` (to mirror §6's
/// `match(filter_ast, record)`; `match` itself is a reserved word in Rust)
/// and rather than a method requiring a caller-held `Evaluator` (so a
/// one-off evaluation doesn't need one): it builds a throwaway
/// `Evaluator` internally. A caller evaluating the same filter repeatedly,
/// or wanting regex compilation reuse across many records, should build an
/// `Evaluator` once and call [`Evaluator::eval`] directly instead.
pub fn matches(ast: &Ast, record: &Record) -> Result<bool, EvalError> {
    Evaluator::new().eval(ast, record)
}
