//! Top-level entry points: source text to a compiled filter or sieve.

use crate::ast::{build, Ast};
use crate::error::UserError;
use crate::group::{divide, listify};
use crate::lexer::tokenize;
use crate::paren::parenthesize;
use crate::precedence::{fold_comparisons, fold_not};
use crate::pos::Pos;
use crate::sieve::Sieve;

/// Compile a single filter expression. A stray `;` inside `text` is a hard
/// error (`SemicolonInExpression`): this entry point does not split on it
/// the way [`compile_sieve`] does.
pub fn compile_filter(text: &str) -> Result<Ast, UserError> {
    let tokens = tokenize(text)?;
    if tokens.is_empty() {
        return Err(UserError::NullExpression(Pos::start()));
    }
    build_from_tokens(tokens)
}

/// Compile a sieve: `;`-separated filter expressions, evaluated as an
/// ordered disjunction by [`Sieve::matches`]/[`Sieve::match_trace`].
pub fn compile_sieve(text: &str) -> Result<Sieve, UserError> {
    let tokens = tokenize(text)?;
    let groups = divide(tokens);
    let predicates = groups
        .into_iter()
        .map(build_from_tokens)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Sieve::new(predicates))
}

fn build_from_tokens(tokens: Vec<crate::lexer::Token>) -> Result<Ast, UserError> {
    let grouped = listify(tokens)?;
    let tree = parenthesize(grouped)?;
    let tree = fold_comparisons(tree)?;
    let tree = fold_not(tree)?;
    build(tree)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compile_filter_rejects_blank_input() {
        assert!(matches!(compile_filter("   # just a comment\n"), Err(UserError::NullExpression(_))));
    }

    #[test]
    fn compile_filter_rejects_stray_semicolon() {
        assert!(matches!(
            compile_filter("a == 1; b == 2"),
            Err(UserError::SemicolonInExpression(_))
        ));
    }

    #[test]
    fn compile_sieve_splits_on_semicolons() {
        let sieve = compile_sieve(
            r#"name =~ /^John/; name =~ /^Bob/; location.country in ["US","UK"];"#,
        )
        .unwrap();
        assert_eq!(sieve.len(), 3);
    }

    #[test]
    fn whitespace_and_comments_are_insignificant() {
        let a = compile_filter(r#"name=="John Doe""#).unwrap();
        let b = compile_filter(" name == \"John Doe\" # trailing\n").unwrap();
        assert_eq!(a, b);
    }
}
