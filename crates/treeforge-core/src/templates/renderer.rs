//! Placeholder renderer for templates and path patterns.
//!
//! The grammar is deliberately tiny: `{{role:casing}}` substitutes one casing variant
//! of the identifier bound to `role`, and `{{{{` writes a literal `{{`. Everything
//! else that starts with `{{` is an error. Generated files are source code; a silently
//! empty substitution would produce code that breaks much later and far from the cause.
//!
//! ## Usage
//!
//! ```ignore
//! use crate::casing::case_variants;
//! use crate::templates::renderer::{Bindings, TemplateRenderer};
//!
//! let mut bindings = Bindings::new();
//! bindings.insert("name".into(), case_variants("tasks")?);
//! let output = TemplateRenderer::new().render_str("{{name:pascal}}Page", &bindings)?;
//! assert_eq!(output, "TasksPage");
//! ```

use std::collections::BTreeMap;

use crate::casing::{CaseVariants, Casing};
use crate::error::PlanError;
use crate::templates::registry::Template;

/// Role name to casing variants.
pub type Bindings = BTreeMap<String, CaseVariants>;

const OPEN: &str = "{{";
const CLOSE: &str = "}}";
const ESCAPED_OPEN: &str = "{{{{";

/// One `{{role:casing}}` occurrence, as written in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
    pub role: &'a str,
    pub casing: &'a str,
    /// Byte offset of the opening `{{`.
    pub offset: usize,
}

/// Stateless renderer for the `{{role:casing}}` grammar.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateRenderer;

impl TemplateRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Render a registry template.
    pub fn render(&self, template: &Template, bindings: &Bindings) -> Result<String, PlanError> {
        self.render_str(template.body(), bindings)
    }

    /// Render raw text, e.g. a slot path pattern.
    pub fn render_str(&self, text: &str, bindings: &Bindings) -> Result<String, PlanError> {
        let mut out = String::with_capacity(text.len());
        for segment in Segments::new(text) {
            match segment? {
                Segment::Text(t) => out.push_str(t),
                Segment::Placeholder(p) => {
                    let variants =
                        bindings
                            .get(p.role)
                            .ok_or_else(|| PlanError::UnboundPlaceholder {
                                role: p.role.to_string(),
                            })?;
                    let casing: Casing = p.casing.parse()?;
                    out.push_str(variants.get(casing));
                }
            }
        }
        Ok(out)
    }

    /// List every placeholder in `text` without resolving them.
    pub fn placeholders<'a>(&self, text: &'a str) -> Result<Vec<Placeholder<'a>>, PlanError> {
        let mut found = Vec::new();
        for segment in Segments::new(text) {
            if let Segment::Placeholder(p) = segment? {
                found.push(p);
            }
        }
        Ok(found)
    }
}

enum Segment<'a> {
    Text(&'a str),
    Placeholder(Placeholder<'a>),
}

/// Splits text into literal runs and placeholders.
struct Segments<'a> {
    text: &'a str,
    pos: usize,
    failed: bool,
}

impl<'a> Segments<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            failed: false,
        }
    }

    fn malformed(&mut self, offset: usize, reason: &str) -> Option<Result<Segment<'a>, PlanError>> {
        self.failed = true;
        Some(Err(PlanError::MalformedPlaceholder {
            offset,
            reason: reason.to_string(),
        }))
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Result<Segment<'a>, PlanError>;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.text;
        if self.failed || self.pos >= text.len() {
            return None;
        }

        let rest = &text[self.pos..];
        let Some(rel) = rest.find(OPEN) else {
            self.pos = text.len();
            return Some(Ok(Segment::Text(rest)));
        };

        if rel > 0 {
            self.pos += rel;
            return Some(Ok(Segment::Text(&rest[..rel])));
        }

        let start = self.pos;
        if rest.starts_with(ESCAPED_OPEN) {
            self.pos += ESCAPED_OPEN.len();
            return Some(Ok(Segment::Text(OPEN)));
        }

        let inner_start = start + OPEN.len();
        let Some(close) = text[inner_start..].find(CLOSE) else {
            return self.malformed(start, "missing closing '}}'");
        };
        let inner = &text[inner_start..inner_start + close];

        let Some((role, casing)) = inner.split_once(':') else {
            return self.malformed(start, "expected 'role:casing'");
        };
        if !is_identifier(role) {
            return self.malformed(start, "role must be an identifier");
        }
        if casing.is_empty() || !casing.chars().all(|c| c.is_ascii_alphabetic()) {
            return self.malformed(start, "casing must be a word");
        }

        self.pos = inner_start + close + CLOSE.len();
        Some(Ok(Segment::Placeholder(Placeholder {
            role,
            casing,
            offset: start,
        })))
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
