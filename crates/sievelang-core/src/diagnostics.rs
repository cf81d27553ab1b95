//! Source-anchored pretty-printing of [`UserError`], for terminal output.
//!
//! Purely a presentation layer over `UserError`'s own `Display` impl: it
//! adds a caret under the offending line using `annotate-snippets`, which
//! operates on byte spans, so the error's 1-based `Pos` is translated to a
//! byte offset by walking the source once.

use annotate_snippets::{AnnotationKind, Level, Renderer, Snippet};

use crate::error::UserError;
use crate::pos::Pos;

fn byte_offset(source: &str, pos: Pos) -> usize {
    let mut line = 1u32;
    let mut col = 1u32;
    for (idx, ch) in source.char_indices() {
        if line == pos.line && col == pos.column {
            return idx;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    source.len()
}

/// Render `err` as a caret diagnostic anchored in `source`. `origin` is a
/// short label for the source (a file path, or `"<expr>"`), shown in the
/// diagnostic header.
pub fn render(source: &str, origin: &str, err: &UserError) -> String {
    let pos = err.pos();
    let start = byte_offset(source, pos);
    let end = (start + 1).min(source.len());
    let message = err.to_string();

    let snippet = Snippet::source(source)
        .path(origin)
        .annotation(AnnotationKind::Primary.span(start..end).label(&message));

    let renderer = Renderer::plain();
    let group = Level::ERROR.primary_title(&message).element(snippet);
    renderer.render(&[group])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::compile_filter;

    #[test]
    fn renders_a_caret_diagnostic() {
        let source = "== 1";
        let err = compile_filter(source).unwrap_err();
        let rendered = render(source, "<expr>", &err);
        assert!(rendered.contains("missing"));
        assert!(rendered.contains("== 1"));
    }

    #[test]
    fn renders_unclosed_paren() {
        let source = "(a == 1";
        let err = compile_filter(source).unwrap_err();
        let rendered = render(source, "<expr>", &err);
        assert!(rendered.contains("unclosed parenthesis"));
        assert!(rendered.contains("(a == 1"));
    }

    #[test]
    fn renders_uncompileable_regex() {
        let source = "a =~ /[/";
        let err = compile_filter(source).unwrap_err();
        let rendered = render(source, "<expr>", &err);
        assert!(rendered.contains("does not compile"));
        assert!(rendered.contains("a =~ /[/"));
    }
}
