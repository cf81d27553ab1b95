//! Parenthesizer: turn a flat token stream into a nested tree of groups.
//!
//! A `Group` stands for one of: the whole top-level expression, a
//! parenthesized sub-expression, or (after precedence folding, see
//! [`crate::precedence`]) an operator application. The parenthesizer only
//! produces the first two; the folding passes produce the third kind on
//! top of this same type.

use crate::error::UserError;
use crate::lexer::Token;

#[derive(Debug, Clone)]
pub enum Elem {
    Tok(Token),
    Group(Vec<Elem>),
}

/// Turn a flat token stream into nested groups by matching parens.
/// `List` tokens are left as opaque leaves (lists don't nest further).
pub fn parenthesize(tokens: Vec<Token>) -> Result<Vec<Elem>, UserError> {
    let mut iter = tokens.into_iter().peekable();
    let elems = parenthesize_until_close(&mut iter, None)?;
    Ok(elems)
}

fn parenthesize_until_close(
    iter: &mut std::iter::Peekable<std::vec::IntoIter<Token>>,
    open_pos: Option<crate::pos::Pos>,
) -> Result<Vec<Elem>, UserError> {
    use crate::lexer::TokenKind::*;

    let mut elems = Vec::new();
    loop {
        match iter.peek() {
            None => {
                if let Some(pos) = open_pos {
                    return Err(UserError::UnclosedParen(pos));
                }
                return Ok(elems);
            }
            Some(tok) if tok.kind == CloseParen => {
                if open_pos.is_none() {
                    let tok = iter.next().unwrap();
                    return Err(UserError::ExcessCloseParen(tok.pos));
                }
                iter.next();
                return Ok(elems);
            }
            Some(tok) if tok.kind == OpenParen => {
                let open = iter.next().unwrap();
                let inner = parenthesize_until_close(iter, Some(open.pos))?;
                if inner.is_empty() {
                    return Err(UserError::EmptyGroup(open.pos));
                }
                elems.push(Elem::Group(inner));
            }
            Some(_) => {
                elems.push(Elem::Tok(iter.next().unwrap()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    fn count_leaves(elems: &[Elem]) -> usize {
        elems
            .iter()
            .map(|e| match e {
                Elem::Tok(_) => 1,
                Elem::Group(g) => count_leaves(g),
            })
            .sum()
    }

    #[test]
    fn nests_parens() {
        let tokens = tokenize("(a == 1)").unwrap();
        let tree = parenthesize(tokens).unwrap();
        assert_eq!(tree.len(), 1);
        assert!(matches!(tree[0], Elem::Group(_)));
        assert_eq!(count_leaves(&tree), 3);
    }

    #[test]
    fn unclosed_paren_is_an_error() {
        let tokens = tokenize("(a == 1").unwrap();
        assert!(matches!(parenthesize(tokens), Err(UserError::UnclosedParen(_))));
    }

    #[test]
    fn excess_close_paren_is_an_error() {
        let tokens = tokenize("a == 1)").unwrap();
        assert!(matches!(parenthesize(tokens), Err(UserError::ExcessCloseParen(_))));
    }

    #[test]
    fn empty_group_is_an_error() {
        let tokens = tokenize("()").unwrap();
        assert!(matches!(parenthesize(tokens), Err(UserError::EmptyGroup(_))));
    }
}
