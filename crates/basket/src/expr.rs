//! Tag expressions, the argument of `-R` and `-X`.
//!
//! Grammar:
//!
//! ```text
//! expr        := alternative ('|' alternative)*
//! alternative := [name] [':' [description]]
//! ```
//!
//! Both parts are unanchored regular expressions. An empty part matches
//! anything, so `:bar` selects by description only and `foo` by name only.

use ntt_core::Tag;
use regex::Regex;

/// A compiled tag expression.
#[derive(Debug, Clone)]
pub struct TagExpr {
    source: String,
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Clone)]
struct Alternative {
    name: Option<Regex>,
    description: Option<Regex>,
}

impl Alternative {
    fn matches(&self, tags: &[Tag]) -> bool {
        tags.iter().any(|tag| {
            self.name.as_ref().map_or(true, |re| re.is_match(&tag.name))
                && self
                    .description
                    .as_ref()
                    .map_or(true, |re| re.is_match(tag.description()))
        })
    }
}

impl TagExpr {
    /// Compile an expression.
    pub fn parse(source: &str) -> Result<Self, regex::Error> {
        let alternatives = source
            .split('|')
            .map(|alt| {
                let (name, description) = match alt.split_once(':') {
                    Some((name, description)) => (name, description),
                    None => (alt, ""),
                };
                Ok(Alternative {
                    name: compile_part(name)?,
                    description: compile_part(description)?,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        Ok(Self {
            source: source.to_string(),
            alternatives,
        })
    }

    /// True if any alternative matches some tag.
    pub fn matches(&self, tags: &[Tag]) -> bool {
        self.alternatives.iter().any(|alt| alt.matches(tags))
    }

    /// The expression text this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

fn compile_part(part: &str) -> Result<Option<Regex>, regex::Error> {
    if part.is_empty() {
        return Ok(None);
    }
    Regex::new(part).map(Some)
}

impl std::str::FromStr for TagExpr {
    type Err = regex::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for TagExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.source)
    }
}
