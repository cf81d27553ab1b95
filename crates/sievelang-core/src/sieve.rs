//! Sieve driver: an ordered, short-circuiting disjunction of predicates.

use serde_json::Value as Json;

use crate::ast::Ast;
use crate::error::EvalError;
use crate::eval::Evaluator;

/// An ordered sequence of compiled filter predicates. Owns its ASTs
/// outright; predicates never reference the sieve or each other.
pub struct Sieve {
    predicates: Vec<Ast>,
}

impl Sieve {
    pub(crate) fn new(predicates: Vec<Ast>) -> Self {
        Sieve { predicates }
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    pub fn predicates(&self) -> &[Ast] {
        &self.predicates
    }

    /// Whether any predicate matches `record`, evaluated in order with the
    /// first true result short-circuiting the rest.
    pub fn matches(&self, evaluator: &mut Evaluator, record: &Json) -> Result<bool, EvalError> {
        Ok(self.match_trace(evaluator, record)?.0)
    }

    /// Like [`Sieve::matches`], but also reports the 0-based index of the
    /// first matching predicate, or `None` if none matched.
    pub fn match_trace(
        &self,
        evaluator: &mut Evaluator,
        record: &Json,
    ) -> Result<(bool, Option<usize>), EvalError> {
        for (i, predicate) in self.predicates.iter().enumerate() {
            if evaluator.eval(predicate, record)? {
                return Ok((true, Some(i)));
            }
        }
        Ok((false, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::compile_sieve;
    use serde_json::json;

    #[test]
    fn sieve_short_circuits_on_first_match() {
        let sieve = compile_sieve(
            r#"name =~ /^John/; name =~ /^Bob/; location.country in ["US","UK"];"#,
        )
        .unwrap();
        let record_j = json!({"name": "John Doe", "location": {"country": "US"}});
        let record_p = json!({"name": "Jane Doe", "location": {"country": "PL"}});
        let mut evaluator = Evaluator::new();

        assert_eq!(sieve.matches(&mut evaluator, &record_j).unwrap(), true);
        assert_eq!(sieve.match_trace(&mut evaluator, &record_j).unwrap(), (true, Some(0)));
        assert_eq!(sieve.matches(&mut evaluator, &record_p).unwrap(), false);
        assert_eq!(sieve.match_trace(&mut evaluator, &record_p).unwrap(), (false, None));
    }

    #[test]
    fn sieve_matches_later_predicate() {
        let sieve = compile_sieve(r#"a == 1; b == 2;"#).unwrap();
        let record = json!({"b": 2});
        let mut evaluator = Evaluator::new();
        assert_eq!(sieve.match_trace(&mut evaluator, &record).unwrap(), (true, Some(1)));
    }
}
