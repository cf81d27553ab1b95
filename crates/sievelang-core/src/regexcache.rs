//! Evaluator-owned cache mapping regex source text to its compiled form.
//!
//! A straightforward hash map, not a serialized DFA table: the evaluator
//! only ever needs an unanchored substring search, and every regex literal
//! was already test-compiled once at tokenize time (see
//! [`crate::lexer::tokenize`]), so this cache exists purely to avoid
//! recompiling the same pattern on every `match` call.
//!
//! Not `Sync` by itself. A caller sharing one cache across threads must
//! guard insertion with its own lock (e.g. wrap in `Mutex<RegexCache>`);
//! reads of an already-populated entry need no further synchronization.

use std::collections::HashMap;

use regex_automata::meta::Regex;

#[derive(Default)]
pub struct RegexCache {
    compiled: HashMap<String, Regex>,
}

impl RegexCache {
    pub fn new() -> Self {
        RegexCache {
            compiled: HashMap::new(),
        }
    }

    /// Unanchored substring search: `pattern` matches anywhere in `haystack`.
    ///
    /// `pattern` is assumed already valid (checked at tokenize time); a
    /// pattern that somehow fails to compile here is treated as a non-match
    /// rather than panicking, since evaluation must never raise for input
    /// that already passed parsing.
    pub fn is_match(&mut self, pattern: &str, haystack: &str) -> bool {
        if !self.compiled.contains_key(pattern) {
            match Regex::new(pattern) {
                Ok(re) => {
                    self.compiled.insert(pattern.to_string(), re);
                }
                Err(_) => return false,
            }
        }
        self.compiled[pattern].is_match(haystack)
    }

    pub fn len(&self) -> usize {
        self.compiled.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compiled.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caches_compiled_pattern() {
        let mut cache = RegexCache::new();
        assert!(cache.is_match("Doe", "John Doe"));
        assert!(!cache.is_match("Doe", "Jane Smith"));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn search_finds_pattern_mid_string() {
        let mut cache = RegexCache::new();
        assert!(cache.is_match("Doe$", "John Doe"));
        assert!(!cache.is_match("^John", "not John Doe"));
    }
}
