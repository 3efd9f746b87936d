//! Finds candidate payloads in a model response.
//!
//! Each kind owns an ordered list of [`Grammar`] descriptors. Every grammar is
//! tried on its own and all matches are kept, so a block that satisfies two
//! grammars is reported twice.

use crate::domain::model::{Kind, RawSegment};
use crate::utils::error::{HookError, Result};
use regex::Regex;

#[derive(Debug, Clone)]
pub struct Grammar {
    kind: Kind,
    name: String,
    pattern: Regex,
}

impl Grammar {
    /// `<tag ...>content</tag>`, tag name case-insensitive, attributes ignored.
    pub fn tag(kind: Kind, tag: &str) -> Result<Self> {
        let escaped = regex::escape(tag);
        let pattern = format!(r"(?is)<{escaped}[^>]*>(.*?)</{escaped}>");
        Self::custom(kind, format!("<{tag}>"), &pattern)
    }

    /// A fenced block opened by three backticks followed by `tag`.
    pub fn fence(kind: Kind, tag: &str) -> Result<Self> {
        let escaped = regex::escape(tag);
        let pattern = format!(r"(?is)```{escaped}\s*(.*?)```");
        Self::custom(kind, format!("```{tag}"), &pattern)
    }

    /// Any pattern with exactly one capture group holding the payload.
    pub fn custom(kind: Kind, name: impl Into<String>, pattern: &str) -> Result<Self> {
        let name = name.into();
        let pattern = Regex::new(pattern)?;
        if pattern.captures_len() != 2 {
            return Err(HookError::ValidationError {
                field: format!("grammar {}", name),
                reason: "pattern must have exactly one capture group".to_string(),
            });
        }

        Ok(Self {
            kind,
            name,
            pattern,
        })
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn segments<'a>(&'a self, text: &'a str) -> impl Iterator<Item = RawSegment> + 'a {
        self.pattern.captures_iter(text).filter_map(move |caps| {
            caps.get(1).map(|content| RawSegment {
                kind: self.kind,
                text: content.as_str().to_string(),
            })
        })
    }
}

/// Lower-case tag, upper-case tag and fenced block, for every kind.
pub fn default_grammars() -> Result<Vec<Grammar>> {
    let mut grammars = Vec::new();
    for kind in Kind::ALL {
        let tag = kind.tag();
        grammars.push(Grammar::tag(kind, tag)?);
        grammars.push(Grammar::tag(kind, &tag.to_uppercase())?);
        grammars.push(Grammar::fence(kind, tag)?);
    }
    Ok(grammars)
}

#[derive(Debug, Clone)]
pub struct Extractor {
    grammars: Vec<Grammar>,
}

impl Extractor {
    pub fn new() -> Result<Self> {
        Ok(Self::with_grammars(default_grammars()?))
    }

    pub fn with_grammars(grammars: Vec<Grammar>) -> Self {
        Self { grammars }
    }

    pub fn push(&mut self, grammar: Grammar) {
        self.grammars.push(grammar);
    }

    pub fn grammars(&self) -> &[Grammar] {
        &self.grammars
    }

    /// Segments grouped by kind (chart, table, diagram), then by grammar
    /// order, then by position in the text.
    pub fn extract(&self, text: &str) -> Vec<RawSegment> {
        let mut segments = Vec::new();

        for kind in Kind::ALL {
            for grammar in self.grammars.iter().filter(|g| g.kind == kind) {
                let before = segments.len();
                segments.extend(grammar.segments(text));
                let found = segments.len() - before;
                if found > 0 {
                    tracing::debug!("🔎 Grammar {} matched {} segment(s)", grammar.name, found);
                }
            }
        }

        segments
    }
}
