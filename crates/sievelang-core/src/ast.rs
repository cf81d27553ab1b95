//! AST construction: typed nodes plus the left-to-right reduction that
//! consumes a fully precedence-folded [`Elem`] tree and produces a single
//! [`Ast`].
//!
//! The reduction walks the (already nested) input once, maintaining a
//! stack of completed operands (`left_stack`) and a queue of not-yet-seen
//! items (`remaining`). A binary operator pops its left operand off
//! `left_stack` and its right operand off the front of `remaining`; a unary
//! `not` only takes a right operand. Every operand, wherever it came from
//! (a bare leaf or a nested group already reduced to one `Ast`), is pushed
//! onto `left_stack` exactly once. If more than one operand survives to the
//! end, the expression had more operands than operators could consume.

use std::collections::VecDeque;

use crate::error::{Side, UserError};
use crate::lexer::{ListValue, Token, TokenKind};
use crate::paren::Elem;
use crate::pos::Pos;

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Str(String),
    Regex(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Equal,
    NotEqual,
    Match,
    And,
    Or,
    In,
    NotIn,
}

impl BinOp {
    fn name(self) -> &'static str {
        match self {
            BinOp::Equal => "==",
            BinOp::NotEqual => "!=",
            BinOp::Match => "=~",
            BinOp::And => "and",
            BinOp::Or => "or",
            BinOp::In => "in",
            BinOp::NotIn => "not in",
        }
    }
}

/// The abstract syntax tree for a single filter expression: a tagged sum
/// with pattern-match dispatch, not a class hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub enum Ast {
    Value(Literal, Pos),
    Symbol(Vec<String>, Pos),
    List(Vec<ListValue>, Pos),
    Not(Box<Ast>, Pos),
    Binary(BinOp, Box<Ast>, Box<Ast>, Pos),
}

impl Ast {
    pub fn pos(&self) -> Pos {
        match self {
            Ast::Value(_, p)
            | Ast::Symbol(_, p)
            | Ast::List(_, p)
            | Ast::Not(_, p)
            | Ast::Binary(_, _, _, p) => *p,
        }
    }
}

enum OpMarker {
    Not(Token),
    Binary(BinOp, Token),
}

enum StackItem {
    Operand(Ast),
    Op(OpMarker),
}

/// Entry point: reduce a precedence-folded element tree into one AST.
pub fn build(elems: Vec<Elem>) -> Result<Ast, UserError> {
    let items = elems
        .into_iter()
        .map(to_stack_item)
        .collect::<Result<Vec<_>, _>>()?;
    reduce(items)
}

fn to_stack_item(elem: Elem) -> Result<StackItem, UserError> {
    match elem {
        Elem::Group(inner) => Ok(StackItem::Operand(build(inner)?)),
        Elem::Tok(tok) => {
            let pos = tok.pos;
            match tok.kind.clone() {
                TokenKind::Int(n) => Ok(StackItem::Operand(Ast::Value(Literal::Int(n), pos))),
                TokenKind::Str(s) => Ok(StackItem::Operand(Ast::Value(Literal::Str(s), pos))),
                TokenKind::Regex(r) => Ok(StackItem::Operand(Ast::Value(Literal::Regex(r), pos))),
                TokenKind::Symbol(s) => {
                    Ok(StackItem::Operand(Ast::Symbol(validate_symbol(&s, pos)?, pos)))
                }
                TokenKind::List(values) => Ok(StackItem::Operand(Ast::List(values, pos))),
                TokenKind::Equal => Ok(StackItem::Op(OpMarker::Binary(BinOp::Equal, tok))),
                TokenKind::NotEqual => Ok(StackItem::Op(OpMarker::Binary(BinOp::NotEqual, tok))),
                TokenKind::Match => Ok(StackItem::Op(OpMarker::Binary(BinOp::Match, tok))),
                TokenKind::And => Ok(StackItem::Op(OpMarker::Binary(BinOp::And, tok))),
                TokenKind::Or => Ok(StackItem::Op(OpMarker::Binary(BinOp::Or, tok))),
                TokenKind::In => Ok(StackItem::Op(OpMarker::Binary(BinOp::In, tok))),
                TokenKind::NotIn => Ok(StackItem::Op(OpMarker::Binary(BinOp::NotIn, tok))),
                TokenKind::Not => Ok(StackItem::Op(OpMarker::Not(tok))),
                TokenKind::Semicolon => Err(UserError::SemicolonInExpression(pos)),
                TokenKind::OpenParen
                | TokenKind::CloseParen
                | TokenKind::OpenBracket
                | TokenKind::CloseBracket
                | TokenKind::Comma => {
                    unreachable!("consumed during grouping and parenthesizing")
                }
            }
        }
    }
}

fn reduce(items: Vec<StackItem>) -> Result<Ast, UserError> {
    let mut left_stack: Vec<Ast> = Vec::new();
    let mut remaining: VecDeque<StackItem> = items.into();

    while let Some(item) = remaining.pop_front() {
        match item {
            StackItem::Operand(ast) => left_stack.push(ast),
            StackItem::Op(OpMarker::Not(tok)) => {
                let right = take_right_operand(&mut remaining, tok.pos)?;
                left_stack.push(Ast::Not(Box::new(right), tok.pos));
            }
            StackItem::Op(OpMarker::Binary(op, tok)) => {
                // left_stack only ever holds built operands, never an
                // unconsumed operator marker, so the left-side
                // OperatorInsteadOfOperand case from the taxonomy cannot
                // arise here by construction.
                let left = left_stack.pop().ok_or(UserError::MissingOperand {
                    pos: tok.pos,
                    side: Side::Left,
                })?;
                let right = take_right_operand(&mut remaining, tok.pos)?;
                left_stack.push(build_binary(op, left, right, tok.pos)?);
            }
        }
    }

    match left_stack.len() {
        1 => Ok(left_stack.pop().unwrap()),
        0 => {
            // Unreachable in practice: an empty top-level expression is
            // caught as NullExpression before grouping, and an empty
            // parenthesized group is caught by the parenthesizer.
            Err(UserError::ExcessiveOperands(Pos::start()))
        }
        _ => {
            let pos = left_stack.first().map(|a| a.pos()).unwrap_or(Pos::start());
            Err(UserError::ExcessiveOperands(pos))
        }
    }
}

fn take_right_operand(remaining: &mut VecDeque<StackItem>, op_pos: Pos) -> Result<Ast, UserError> {
    match remaining.pop_front() {
        None => Err(UserError::MissingOperand {
            pos: op_pos,
            side: Side::Right,
        }),
        Some(StackItem::Operand(ast)) => Ok(ast),
        Some(StackItem::Op(_)) => Err(UserError::OperatorInsteadOfOperand {
            pos: op_pos,
            side: Side::Right,
        }),
    }
}

fn build_binary(op: BinOp, left: Ast, right: Ast, pos: Pos) -> Result<Ast, UserError> {
    match op {
        BinOp::Match => {
            if !matches!(right, Ast::Value(Literal::Regex(_), _)) {
                return Err(UserError::InvalidOperandType {
                    op: op.name(),
                    side: Side::Right,
                    expected: "a regex literal",
                    pos,
                });
            }
        }
        BinOp::In | BinOp::NotIn => {
            if !matches!(left, Ast::Symbol(_, _) | Ast::Value(_, _)) {
                return Err(UserError::InvalidOperandType {
                    op: op.name(),
                    side: Side::Left,
                    expected: "a symbol or value",
                    pos,
                });
            }
            if !matches!(right, Ast::List(_, _)) {
                return Err(UserError::InvalidOperandType {
                    op: op.name(),
                    side: Side::Right,
                    expected: "a list literal",
                    pos,
                });
            }
        }
        BinOp::Equal | BinOp::NotEqual | BinOp::And | BinOp::Or => {}
    }
    Ok(Ast::Binary(op, Box::new(left), Box::new(right), pos))
}

fn validate_symbol(text: &str, pos: Pos) -> Result<Vec<String>, UserError> {
    text.split('.')
        .map(|seg| {
            if is_valid_segment(seg) {
                Ok(seg.to_string())
            } else {
                Err(UserError::InvalidSymbolSegment {
                    segment: seg.to_string(),
                    pos,
                })
            }
        })
        .collect()
}

fn is_valid_segment(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
