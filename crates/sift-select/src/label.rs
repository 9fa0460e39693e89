//! Display text resolution.
//!
//! Each row's display (and filter) text comes from a [`LabelSource`]:
//! either a single record attribute, or a [`LabelTemplate`] - an
//! interpolated expression such as `"{{item.num}}: {{item.name}}"`
//! evaluated in the record's own context. When an expression is supplied it
//! supersedes the attribute for both display and filtering.

use crate::model::record::Record;

/// One parsed piece of a label template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    /// Literal text, emitted verbatim.
    Literal(String),
    /// A field reference, rendered from the record.
    Field(String),
}

/// An interpolated label expression.
///
/// Templates mix literal text with `{{item.field}}` references. Field
/// references are resolved against the record; the `item.` prefix is
/// optional. Missing fields render as empty text and an unterminated
/// interpolation is kept as literal text - a malformed expression degrades,
/// it never errors.
///
/// # Example
///
/// ```
/// use sift_select::label::LabelTemplate;
/// use sift_select::model::Record;
///
/// let template = LabelTemplate::parse("{{item.num}}: {{item.name}}");
/// let record = Record::new().with_field("name", "Foo").with_field("num", 5);
/// assert_eq!(template.render(&record), "5: Foo");
/// ```
#[derive(Debug, Clone)]
pub struct LabelTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl LabelTemplate {
    /// Parses a template string.
    pub fn parse(template: &str) -> Self {
        let mut segments = Vec::new();
        let mut rest = template;

        while let Some(open) = rest.find("{{") {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            let after_open = &rest[open + 2..];
            match after_open.find("}}") {
                Some(close) => {
                    let path = after_open[..close].trim();
                    let field = path.strip_prefix("item.").unwrap_or(path);
                    segments.push(Segment::Field(field.to_string()));
                    rest = &after_open[close + 2..];
                }
                None => {
                    // Unterminated interpolation: keep the remainder verbatim.
                    segments.push(Segment::Literal(rest[open..].to_string()));
                    rest = "";
                }
            }
        }

        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Self {
            source: template.to_string(),
            segments,
        }
    }

    /// The original template text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Renders the template against a record.
    pub fn render(&self, record: &Record) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(name) => out.push_str(&record.text(name)),
            }
        }
        out
    }
}

impl PartialEq for LabelTemplate {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for LabelTemplate {}

/// Where a row's display text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelSource {
    /// A single record field, rendered as text.
    Attribute(String),
    /// An interpolated expression evaluated per record.
    Expression(LabelTemplate),
}

impl Default for LabelSource {
    /// The default label attribute, `"label"`.
    fn default() -> Self {
        LabelSource::Attribute("label".to_string())
    }
}

impl LabelSource {
    /// A label source reading one attribute.
    pub fn attribute(name: impl Into<String>) -> Self {
        LabelSource::Attribute(name.into())
    }

    /// A label source evaluating an interpolated expression.
    pub fn expression(template: &str) -> Self {
        LabelSource::Expression(LabelTemplate::parse(template))
    }

    /// Computes the display/filter text for a record.
    pub fn resolve(&self, record: &Record) -> String {
        match self {
            LabelSource::Attribute(name) => record.text(name),
            LabelSource::Expression(template) => template.render(record),
        }
    }
}
