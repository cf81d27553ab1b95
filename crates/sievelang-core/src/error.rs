//! Parse-time and evaluation-time error taxonomy.
//!
//! `UserError` covers everything that can go wrong turning source text into an
//! AST; `EvalError` covers the (much narrower) set of things that can go wrong
//! walking an AST against a record. Missing symbol paths are deliberately not
//! part of either family: they resolve to [`crate::eval::Missing`] and are
//! handled by expression semantics, never raised.

use std::fmt;

use crate::lexer::TokenKind;
use crate::pos::Pos;

/// Which side of an operator an operand error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Parse-time errors: malformed source text. Every variant carries enough
/// position information to anchor a caret diagnostic.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UserError {
    #[error("empty expression at {0}")]
    NullExpression(Pos),

    #[error("unclosed quote starting at {0}")]
    UnclosedQuote(Pos),

    #[error("unclosed regex literal starting at {0}")]
    UnclosedRegex(Pos),

    #[error("unclosed parenthesis opened at {0}")]
    UnclosedParen(Pos),

    #[error("unmatched closing parenthesis at {0}")]
    ExcessCloseParen(Pos),

    #[error("unclosed list literal opened at {0}")]
    UnclosedList(Pos),

    #[error("empty parenthesized group at {0}")]
    EmptyGroup(Pos),

    #[error("regex {source:?} at {pos} does not compile: {underlying}")]
    UncompileableRegex {
        source: String,
        pos: Pos,
        underlying: String,
    },

    #[error("unrecognized token at {pos} near {prefix:?}")]
    UnknownToken { prefix: String, pos: Pos },

    #[error("list member {0:?} at {1} is not an integer or string")]
    InvalidListMember(TokenKind, Pos),

    #[error("list member at {1} does not match the list's element kind ({0:?})")]
    InconsistentListMemberType(TokenKind, Pos),

    #[error("symbol segment {segment:?} at {pos} is not a valid identifier")]
    InvalidSymbolSegment { segment: String, pos: Pos },

    #[error("operator at {pos} is missing its {side} operand")]
    MissingOperand { pos: Pos, side: Side },

    #[error("operator at {pos} found another operator where its {side} operand should be")]
    OperatorInsteadOfOperand { pos: Pos, side: Side },

    #[error("expression at {0} has more operands than its operators can consume")]
    ExcessiveOperands(Pos),

    #[error("unexpected semicolon at {0} inside a single expression")]
    SemicolonInExpression(Pos),

    #[error("operand at {pos} has the wrong type for {op}: expected {expected}")]
    InvalidOperandType {
        op: &'static str,
        side: Side,
        expected: &'static str,
        pos: Pos,
    },
}

impl UserError {
    /// The source position this error is anchored to, for diagnostic rendering.
    pub fn pos(&self) -> Pos {
        match self {
            UserError::NullExpression(p)
            | UserError::UnclosedQuote(p)
            | UserError::UnclosedRegex(p)
            | UserError::UnclosedParen(p)
            | UserError::ExcessCloseParen(p)
            | UserError::UnclosedList(p)
            | UserError::EmptyGroup(p)
            | UserError::ExcessiveOperands(p)
            | UserError::SemicolonInExpression(p) => *p,
            UserError::UncompileableRegex { pos, .. } => *pos,
            UserError::UnknownToken { pos, .. } => *pos,
            UserError::InvalidListMember(_, pos) => *pos,
            UserError::InconsistentListMemberType(_, pos) => *pos,
            UserError::InvalidSymbolSegment { pos, .. } => *pos,
            UserError::MissingOperand { pos, .. } => *pos,
            UserError::OperatorInsteadOfOperand { pos, .. } => *pos,
            UserError::InvalidOperandType { pos, .. } => *pos,
        }
    }
}

/// Runtime errors: a resolved symbol value did not have a supported shape.
/// Missing keys and non-mapping intermediate containers are *not* errors
/// (they resolve to [`crate::eval::Missing`]); only a fully-resolved value
/// of an unsupported kind raises.
#[derive(Debug, Clone, thiserror::Error)]
pub enum EvalError {
    /// Reserved for a container at an intermediate step that was not a
    /// mapping. The current resolver never raises this (such a step simply
    /// resolves to Missing per policy), but the variant is kept so callers
    /// matching on `EvalError` exhaustively don't need to special-case a
    /// future stricter resolution mode.
    #[error("could not expand symbol {path}: {cause}")]
    SymbolExpansion { path: String, cause: String },

    #[error("symbol {path} resolved to an unsupported value kind: {kind}")]
    SymbolExpansionType { path: String, kind: &'static str },
}
