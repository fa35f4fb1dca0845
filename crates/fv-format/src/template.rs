//! Output layouts.
//!
//! A [`Template`] is either a positional [`Pattern`] with four slots or an
//! arbitrary renderer function. Both receive the same four strings: the
//! fixed-point value, the fixed-point error, the exponent as a signed integer,
//! and the caller's units.

use core::fmt;
use core::str::FromStr;
use std::sync::Arc;

use crate::error::{FormatError, FormatResult};

/// Typesetting markup for the siunitx `\SI` macro.
pub const SIUNITX_PATTERN: &str = r"\SI{{{0} \pm {1} e{2}}}{{{3}}}";

/// Plain numeric layout; units are appended verbatim.
pub const BARE_PATTERN: &str = "({0} ± {1}) x 10^{2}{3}";

/// The four strings a template lays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderArgs<'a> {
    pub value: &'a str,
    pub error: &'a str,
    pub exponent: &'a str,
    pub units: &'a str,
}

impl<'a> RenderArgs<'a> {
    pub fn slot(&self, slot: Slot) -> &'a str {
        match slot {
            Slot::Value => self.value,
            Slot::Error => self.error,
            Slot::Exponent => self.exponent,
            Slot::Units => self.units,
        }
    }
}

/// Positional slot in a pattern: `{0}` to `{3}`, or by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Value,
    Error,
    Exponent,
    Units,
}

impl Slot {
    fn from_key(key: &str) -> Option<Self> {
        match key {
            "0" | "value" => Some(Slot::Value),
            "1" | "error" => Some(Slot::Error),
            "2" | "exponent" => Some(Slot::Exponent),
            "3" | "units" => Some(Slot::Units),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Slot(Slot),
}

/// Parsed positional pattern.
///
/// `{{` and `}}` produce literal braces. Parsing rejects unknown slots and
/// unbalanced braces, so rendering never fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
}

impl Pattern {
    pub fn parse(source: &str) -> FormatResult<Self> {
        let invalid = |what: String| FormatError::InvalidTemplate { what };

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '{' => {
                    let mut key = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some('{') => {
                                return Err(invalid(format!("nested '{{' in {source:?}")));
                            }
                            Some(ch) => key.push(ch),
                            None => return Err(invalid(format!("unclosed '{{' in {source:?}"))),
                        }
                    }
                    let slot = Slot::from_key(key.trim())
                        .ok_or_else(|| invalid(format!("unknown slot {{{key}}} in {source:?}")))?;
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(core::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Slot(slot));
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => return Err(invalid(format!("unmatched '}}' in {source:?}"))),
                other => literal.push(other),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Slots in the order they appear.
    pub fn slots(&self) -> impl Iterator<Item = Slot> + '_ {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Slot(slot) => Some(*slot),
            Segment::Literal(_) => None,
        })
    }

    pub fn render(&self, args: &RenderArgs<'_>) -> String {
        let mut out = String::with_capacity(self.source.len() + 16);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Slot(slot) => out.push_str(args.slot(*slot)),
            }
        }
        out
    }

    fn builtin(source: &str) -> Self {
        Self::parse(source).expect("built-in pattern is well-formed")
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

pub type RenderFn = dyn Fn(&RenderArgs<'_>) -> String + Send + Sync;

/// Layout applied to the rounded strings.
#[derive(Clone)]
pub enum Template {
    Pattern(Pattern),
    Renderer(Arc<RenderFn>),
}

impl Template {
    pub fn pattern(source: &str) -> FormatResult<Self> {
        Pattern::parse(source).map(Template::Pattern)
    }

    pub fn renderer<F>(render: F) -> Self
    where
        F: Fn(&RenderArgs<'_>) -> String + Send + Sync + 'static,
    {
        Template::Renderer(Arc::new(render))
    }

    /// `\SI{v \pm e e<n>}{units}`.
    pub fn siunitx() -> Self {
        Template::Pattern(Pattern::builtin(SIUNITX_PATTERN))
    }

    /// `(v ± e) x 10^n` followed by the units verbatim.
    pub fn bare() -> Self {
        Template::Pattern(Pattern::builtin(BARE_PATTERN))
    }

    /// Reads like prose: drops the power of ten at exponent 0 and the caret
    /// at exponent 1.
    pub fn natural() -> Self {
        Template::renderer(natural_layout)
    }

    pub fn render(&self, args: &RenderArgs<'_>) -> String {
        match self {
            Template::Pattern(pattern) => pattern.render(args),
            Template::Renderer(render) => render(args),
        }
    }
}

fn natural_layout(args: &RenderArgs<'_>) -> String {
    let RenderArgs {
        value,
        error,
        exponent,
        units,
    } = *args;
    let body = match exponent {
        "0" => format!("{value} ± {error}"),
        "1" => format!("({value} ± {error}) x 10"),
        n => format!("({value} ± {error}) x 10^{n}"),
    };
    if units.is_empty() {
        body
    } else {
        format!("{body} {units}")
    }
}

impl fmt::Debug for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Template::Pattern(pattern) => {
                f.debug_tuple("Pattern").field(&pattern.as_str()).finish()
            }
            Template::Renderer(_) => f.write_str("Renderer(..)"),
        }
    }
}

impl Default for Template {
    fn default() -> Self {
        Template::natural()
    }
}

impl From<Pattern> for Template {
    fn from(pattern: Pattern) -> Self {
        Template::Pattern(pattern)
    }
}

impl FromStr for Template {
    type Err = FormatError;

    fn from_str(s: &str) -> FormatResult<Self> {
        Template::pattern(s)
    }
}
