//! Token grouping: split a sieve's token stream on `;`, and fold each
//! `[...]` run into a single homogeneous [`TokenKind::List`] token.

use crate::error::UserError;
use crate::lexer::{ListValue, Token, TokenKind};

/// Split a token stream on `Semicolon`, discarding empty runs (a leading,
/// trailing, or doubled `;` never produces an empty expression).
pub fn divide(tokens: Vec<Token>) -> Vec<Vec<Token>> {
    let mut groups = Vec::new();
    let mut current = Vec::new();
    for tok in tokens {
        if tok.kind == TokenKind::Semicolon {
            if !current.is_empty() {
                groups.push(std::mem::take(&mut current));
            }
        } else {
            current.push(tok);
        }
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

/// Fold every `[...]` run in `tokens` into a single `TokenKind::List` token,
/// validating that members are homogeneous Int or Str scalars. Not called
/// recursively on itself: list literals never nest.
pub fn listify(tokens: Vec<Token>) -> Result<Vec<Token>, UserError> {
    let mut out = Vec::new();
    let mut iter = tokens.into_iter().peekable();

    while let Some(tok) = iter.next() {
        if tok.kind != TokenKind::OpenBracket {
            out.push(tok);
            continue;
        }
        let open_pos = tok.pos;
        let mut values: Vec<ListValue> = Vec::new();
        let mut kind_is_int: Option<bool> = None;
        let mut closed = false;

        while let Some(member) = iter.next() {
            match member.kind {
                TokenKind::CloseBracket => {
                    closed = true;
                    break;
                }
                TokenKind::Comma => continue,
                TokenKind::Int(n) => {
                    match kind_is_int {
                        None => kind_is_int = Some(true),
                        Some(true) => {}
                        Some(false) => {
                            return Err(UserError::InconsistentListMemberType(
                                TokenKind::Int(n),
                                member.pos,
                            ))
                        }
                    }
                    values.push(ListValue::Int(n));
                }
                TokenKind::Str(ref s) => {
                    match kind_is_int {
                        None => kind_is_int = Some(false),
                        Some(false) => {}
                        Some(true) => {
                            return Err(UserError::InconsistentListMemberType(
                                TokenKind::Str(s.clone()),
                                member.pos,
                            ))
                        }
                    }
                    values.push(ListValue::Str(s.clone()));
                }
                other => return Err(UserError::InvalidListMember(other, member.pos)),
            }
        }

        if !closed {
            return Err(UserError::UnclosedList(open_pos));
        }

        out.push(Token {
            kind: TokenKind::List(values),
            pos: open_pos,
        });
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    #[test]
    fn divide_splits_on_semicolon_and_drops_empties() {
        let tokens = tokenize("a == 1 ;; b == 2 ;").unwrap();
        let groups = divide(tokens);
        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn listify_folds_bracket_run() {
        let tokens = tokenize(r#"x in ["US" "UK"]"#).unwrap();
        let grouped = listify(tokens).unwrap();
        assert!(matches!(grouped[2].kind, TokenKind::List(ref v) if v.len() == 2));
    }

    #[test]
    fn listify_rejects_mixed_kinds() {
        let tokens = tokenize(r#"[1, "x"]"#).unwrap();
        assert!(matches!(
            listify(tokens),
            Err(UserError::InconsistentListMemberType(_, _))
        ));
    }

    #[test]
    fn listify_rejects_unclosed_list() {
        let tokens = tokenize("[1, 2").unwrap();
        assert!(matches!(listify(tokens), Err(UserError::UnclosedList(_))));
    }
}
