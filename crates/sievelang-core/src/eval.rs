//! Evaluator: walk an AST against a record, producing a boolean.
//!
//! Symbol resolution is an explicit walk over the record structure rather
//! than a generated expression string handed to a host evaluator. Missing
//! is a first-class outcome distinct from an explicit JSON `null`: a
//! missing key (or a non-mapping container where a mapping was expected)
//! never raises, and only propagates into expression semantics as "unequal
//! to everything, including itself's absence at the other side unless that
//! side is also Missing".

use serde_json::Value as Json;

use crate::ast::{Ast, BinOp, Literal};
use crate::error::EvalError;
use crate::lexer::ListValue;
use crate::regexcache::RegexCache;

/// A resolved scalar, or the sentinel for an unresolved symbol path.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Missing,
    Int(i64),
    Float(f64),
    Str(String),
    Bool(bool),
    Null,
}

pub struct Evaluator {
    regex_cache: RegexCache,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl Evaluator {
    pub fn new() -> Self {
        Evaluator {
            regex_cache: RegexCache::new(),
        }
    }

    /// Evaluate `ast` against `record`, producing a boolean.
    pub fn eval(&mut self, ast: &Ast, record: &Json) -> Result<bool, EvalError> {
        match ast {
            Ast::Binary(BinOp::And, left, right, _) => {
                Ok(self.eval(left, record)? && self.eval(right, record)?)
            }
            Ast::Binary(BinOp::Or, left, right, _) => {
                Ok(self.eval(left, record)? || self.eval(right, record)?)
            }
            Ast::Binary(BinOp::Equal, left, right, _) => {
                let l = self.resolve_operand(left, record)?;
                let r = self.resolve_operand(right, record)?;
                Ok(scalars_equal(&l, &r))
            }
            Ast::Binary(BinOp::NotEqual, left, right, _) => {
                let l = self.resolve_operand(left, record)?;
                let r = self.resolve_operand(right, record)?;
                Ok(!scalars_equal(&l, &r))
            }
            Ast::Binary(BinOp::Match, left, pattern, _) => {
                let l = self.resolve_operand(left, record)?;
                let text = match l {
                    Resolved::Missing => return Ok(false),
                    other => scalar_to_text(&other),
                };
                let pattern = match pattern.as_ref() {
                    Ast::Value(Literal::Regex(p), _) => p,
                    _ => unreachable!("validated at AST construction: right of =~ is a regex literal"),
                };
                Ok(self.regex_cache.is_match(pattern, &text))
            }
            Ast::Binary(BinOp::In, left, right, _) => {
                let l = self.resolve_operand(left, record)?;
                let list = list_values(right);
                Ok(list.iter().any(|v| scalars_equal(&l, v)))
            }
            Ast::Binary(BinOp::NotIn, left, right, _) => {
                let l = self.resolve_operand(left, record)?;
                let list = list_values(right);
                Ok(!list.iter().any(|v| scalars_equal(&l, v)))
            }
            Ast::Not(child, _) => Ok(!self.eval(child, record)?),
            // A bare operand used directly in boolean position (a whole
            // filter that is just a symbol or value, or such a node nested
            // directly under and/or/not): fall back to truthiness, since
            // the grammar permits this shape but the language has no
            // boolean literals to make it explicit.
            Ast::Value(_, _) | Ast::Symbol(_, _) | Ast::List(_, _) => {
                let resolved = self.resolve_operand(ast, record)?;
                Ok(truthy(&resolved))
            }
        }
    }

    /// Resolve a `Value`/`Symbol` operand to a scalar (or Missing). `List`
    /// operands are not meaningful here and are handled by `list_values`.
    fn resolve_operand(&mut self, ast: &Ast, record: &Json) -> Result<Resolved, EvalError> {
        match ast {
            Ast::Value(Literal::Int(n), _) => Ok(Resolved::Int(*n)),
            Ast::Value(Literal::Str(s), _) => Ok(Resolved::Str(s.clone())),
            Ast::Value(Literal::Regex(r), _) => Ok(Resolved::Str(r.clone())),
            Ast::Symbol(path, _) => resolve_symbol(record, path),
            Ast::List(_, _) => unreachable!("List is not a scalar operand"),
            other => {
                // A nested boolean sub-expression used where a scalar
                // operand was expected only happens for malformed ASTs;
                // the parser never builds one (Equal/NotEqual/Match/In/
                // NotIn operands are always Value/Symbol per §3's
                // invariants), so this arm exists for exhaustiveness.
                let b = self.eval(other, record)?;
                Ok(Resolved::Bool(b))
            }
        }
    }
}

fn list_values(ast: &Ast) -> Vec<Resolved> {
    match ast {
        Ast::List(values, _) => values
            .iter()
            .map(|v| match v {
                ListValue::Int(n) => Resolved::Int(*n),
                ListValue::Str(s) => Resolved::Str(s.clone()),
            })
            .collect(),
        _ => unreachable!("validated at AST construction: right of in/not in is a list"),
    }
}

/// Resolve a dotted symbol path against a record. A non-mapping container
/// at an intermediate step, or an absent key at any step, yields Missing
/// rather than raising — only a fully-resolved value of an unsupported
/// kind (array or object) raises `SymbolExpansionType`.
fn resolve_symbol(record: &Json, path: &[String]) -> Result<Resolved, EvalError> {
    let mut current = record;
    for segment in path {
        match current.as_object().and_then(|map| map.get(segment)) {
            Some(v) => current = v,
            None => return Ok(Resolved::Missing),
        }
    }
    match current {
        Json::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Resolved::Int(i))
            } else {
                Ok(Resolved::Float(n.as_f64().unwrap_or(f64::NAN)))
            }
        }
        Json::String(s) => Ok(Resolved::Str(s.clone())),
        Json::Bool(b) => Ok(Resolved::Bool(*b)),
        Json::Null => Ok(Resolved::Null),
        Json::Array(_) => Err(EvalError::SymbolExpansionType {
            path: path.join("."),
            kind: "array",
        }),
        Json::Object(_) => Err(EvalError::SymbolExpansionType {
            path: path.join("."),
            kind: "object",
        }),
    }
}

fn scalars_equal(a: &Resolved, b: &Resolved) -> bool {
    use Resolved::*;
    match (a, b) {
        (Missing, Missing) => true,
        (Missing, _) | (_, Missing) => false,
        (Int(x), Int(y)) => x == y,
        (Float(x), Float(y)) => x == y,
        (Int(x), Float(y)) | (Float(y), Int(x)) => (*x as f64) == *y,
        (Str(x), Str(y)) => x == y,
        (Bool(x), Bool(y)) => x == y,
        (Null, Null) => true,
        // Cross-kind equality (other than the int/float numeric widening
        // above) is false: an integer never equals a string, a bool never
        // equals a string, and so on.
        _ => false,
    }
}

fn scalar_to_text(r: &Resolved) -> String {
    match r {
        Resolved::Missing => String::new(),
        Resolved::Int(n) => n.to_string(),
        Resolved::Float(f) => f.to_string(),
        Resolved::Str(s) => s.clone(),
        Resolved::Bool(b) => b.to_string(),
        Resolved::Null => "null".to_string(),
    }
}

fn truthy(r: &Resolved) -> bool {
    match r {
        Resolved::Missing => false,
        Resolved::Int(n) => *n != 0,
        Resolved::Float(f) => *f != 0.0,
        Resolved::Str(s) => !s.is_empty(),
        Resolved::Bool(b) => *b,
        Resolved::Null => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::compile_filter;
    use serde_json::json;

    fn record_j() -> Json {
        json!({
            "name": "John Doe",
            "age": 133,
            "location": {"city": "Ono", "country": "US"},
        })
    }

    fn record_p() -> Json {
        json!({
            "name": "Jane Doe",
            "age": 97,
            "location": {"city": "Hel", "country": "PL"},
        })
    }

    fn matches(src: &str, record: &Json) -> bool {
        let ast = compile_filter(src).unwrap();
        Evaluator::new().eval(&ast, record).unwrap()
    }

    #[test]
    fn scenario_1_equality() {
        assert!(matches(r#"name == "John Doe""#, &record_j()));
        assert!(!matches(r#"name == "John Doe""#, &record_p()));
    }

    #[test]
    fn scenario_2_regex_match() {
        assert!(matches(r#"name =~ /Doe/"#, &record_j()));
        assert!(matches(r#"name =~ /Doe/"#, &record_p()));
    }

    #[test]
    fn scenario_3_or_chain() {
        let src = r#"name == "John Doe" or location.country == "PL""#;
        assert!(matches(src, &record_j()));
        assert!(matches(src, &record_p()));
    }

    #[test]
    fn scenario_4_in_list() {
        let src = r#"location.country in ["US" "UK"]"#;
        assert!(matches(src, &record_j()));
        assert!(!matches(src, &record_p()));
    }

    #[test]
    fn scenario_5_not_in_and_not_equal() {
        let src = r#"location.country not in ["US" "UK"] and name != "John Doe""#;
        assert!(!matches(src, &record_j()));
        assert!(matches(src, &record_p()));
    }

    #[test]
    fn scenario_6_missing_key_is_not_an_error() {
        assert!(!matches(r#"nickname == "Jo""#, &record_j()));
        assert!(!matches(r#"nickname == "Jo""#, &record_p()));
    }

    #[test]
    fn scenario_7_integer_equality() {
        assert!(!matches("age == 97", &record_j()));
        assert!(matches("age == 97", &record_p()));
    }

    #[test]
    fn missing_never_equals_explicit_null() {
        let ast = compile_filter("nickname == nonexistent").unwrap();
        // both operands are unresolvable symbols -> both Missing -> equal
        // to each other (Missing == Missing), regardless of any literal
        // null elsewhere in the record.
        assert!(Evaluator::new().eval(&ast, &record_j()).unwrap());
    }

    #[test]
    fn int_and_float_compare_numerically() {
        let record = json!({"score": 3});
        assert!(matches("score == 3", &record));
    }

    #[test]
    fn not_negates() {
        let src = "not (name == \"John Doe\")";
        assert!(!matches(src, &record_j()));
        assert!(matches(src, &record_p()));
    }
}
