//! Two-pass precedence folder.
//!
//! Pass 1 folds binary comparison operators (`==`, `!=`, `=~`, `in`,
//! `not in`) left to right into `[left, op, right]` triples, represented as
//! a nested [`Elem::Group`]. `and`/`or` are deliberately left unfolded here;
//! they bind looser and are resolved later during AST construction, which
//! walks what's left as a flat and/or chain.
//!
//! Pass 2 folds unary `not` with its right operand into a `[not, operand]`
//! pair, again as a nested `Group`.
//!
//! Both passes recurse into nested groups first (so a fully-parenthesized
//! sub-expression is folded before its enclosing expression), then make a
//! single left-to-right streaming pass that builds an output stack —
//! avoiding the index-based "find position, splice three elements, insert
//! one" pattern of repeatedly mutating one list in place.

use crate::error::{Side, UserError};
use crate::lexer::TokenKind;
use crate::paren::Elem;

fn is_comparison_op(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Equal | TokenKind::NotEqual | TokenKind::Match | TokenKind::In | TokenKind::NotIn
    )
}

pub fn fold_comparisons(elems: Vec<Elem>) -> Result<Vec<Elem>, UserError> {
    let recursed: Vec<Elem> = elems
        .into_iter()
        .map(|e| match e {
            Elem::Group(inner) => Ok(Elem::Group(fold_comparisons(inner)?)),
            other => Ok(other),
        })
        .collect::<Result<_, UserError>>()?;

    let mut output: Vec<Elem> = Vec::new();
    let mut iter = recursed.into_iter().peekable();
    while let Some(elem) = iter.next() {
        if let Elem::Tok(tok) = &elem {
            if is_comparison_op(&tok.kind) {
                let op_tok = tok.clone();
                let left = output.pop().ok_or(UserError::MissingOperand {
                    pos: op_tok.pos,
                    side: Side::Left,
                })?;
                let right = iter.next().ok_or(UserError::MissingOperand {
                    pos: op_tok.pos,
                    side: Side::Right,
                })?;
                output.push(Elem::Group(vec![left, Elem::Tok(op_tok), right]));
                continue;
            }
        }
        output.push(elem);
    }
    Ok(output)
}

pub fn fold_not(elems: Vec<Elem>) -> Result<Vec<Elem>, UserError> {
    let recursed: Vec<Elem> = elems
        .into_iter()
        .map(|e| match e {
            Elem::Group(inner) => Ok(Elem::Group(fold_not(inner)?)),
            other => Ok(other),
        })
        .collect::<Result<_, UserError>>()?;

    let mut output: Vec<Elem> = Vec::new();
    let mut iter = recursed.into_iter().peekable();
    while let Some(elem) = iter.next() {
        if let Elem::Tok(tok) = &elem {
            if tok.kind == TokenKind::Not {
                let op_tok = tok.clone();
                let right = iter.next().ok_or(UserError::MissingOperand {
                    pos: op_tok.pos,
                    side: Side::Right,
                })?;
                output.push(Elem::Group(vec![Elem::Tok(op_tok), right]));
                continue;
            }
        }
        output.push(elem);
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::paren::parenthesize;

    fn fold(src: &str) -> Vec<Elem> {
        let tokens = tokenize(src).unwrap();
        let tree = parenthesize(tokens).unwrap();
        let tree = fold_comparisons(tree).unwrap();
        fold_not(tree).unwrap()
    }

    #[test]
    fn folds_a_single_comparison() {
        let tree = fold("a == 1");
        assert_eq!(tree.len(), 1);
        assert!(matches!(&tree[0], Elem::Group(g) if g.len() == 3));
    }

    #[test]
    fn leaves_and_or_unfolded() {
        let tree = fold("a == 1 and b == 2");
        // two folded comparisons either side of a bare `and` token: 3 elements
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn folds_not_around_its_operand() {
        let tree = fold("not a == 1");
        assert_eq!(tree.len(), 1);
        assert!(matches!(&tree[0], Elem::Group(g) if g.len() == 2));
    }

    #[test]
    fn missing_left_operand_is_an_error() {
        let tokens = tokenize("== 1").unwrap();
        let tree = parenthesize(tokens).unwrap();
        assert!(matches!(
            fold_comparisons(tree),
            Err(UserError::MissingOperand { side: Side::Left, .. })
        ));
    }
}
