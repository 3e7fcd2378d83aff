//! Test tags.

use serde::{Deserialize, Serialize};

/// A tag attached to a test, e.g. `@wip` or `@since 1.2`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    /// Label, e.g. `@wip`
    pub name: String,

    /// Free text following the label
    pub description: Option<String>,
}

impl Tag {
    /// Create a tag from its parts.
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
        }
    }

    /// Split a full tag text on the first whitespace run.
    ///
    /// `"@foo bar"` becomes name `@foo` and description `bar`. An empty
    /// remainder yields no description.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        match text.split_once(char::is_whitespace) {
            Some((name, rest)) => {
                let rest = rest.trim();
                Self {
                    name: name.to_string(),
                    description: (!rest.is_empty()).then(|| rest.to_string()),
                }
            }
            None => Self {
                name: text.to_string(),
                description: None,
            },
        }
    }

    /// Description text, empty if there is none.
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.description {
            Some(desc) => write!(f, "{} {}", self.name, desc),
            None => f.write_str(&self.name),
        }
    }
}

impl From<&str> for Tag {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

/// Produces the tags of a test from its source text.
///
/// Selection only consumes tags; scanning source comments is left to the
/// language front end.
pub trait TagExtractor {
    /// Extract tags in source order. Duplicates are kept.
    fn extract(&self, text: &str) -> Vec<Tag>;
}

impl<F> TagExtractor for F
where
    F: Fn(&str) -> Vec<Tag>,
{
    fn extract(&self, text: &str) -> Vec<Tag> {
        self(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_only() {
        let tag = Tag::parse("@wip");
        assert_eq!(tag.name, "@wip");
        assert_eq!(tag.description, None);
        assert_eq!(tag.description(), "");
    }

    #[test]
    fn test_parse_splits_on_first_whitespace_run() {
        let tag = Tag::parse("@foo \t bar  baz ");
        assert_eq!(tag.name, "@foo");
        assert_eq!(tag.description.as_deref(), Some("bar  baz"));
    }

    #[test]
    fn test_parse_trailing_whitespace_has_no_description() {
        let tag = Tag::parse("  @foo   ");
        assert_eq!(tag.name, "@foo");
        assert_eq!(tag.description, None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Tag::parse("@foo bar").to_string(), "@foo bar");
        assert_eq!(Tag::new("@wip", None).to_string(), "@wip");
    }

    #[test]
    fn test_closure_extractor() {
        let extractor = |text: &str| text.lines().map(Tag::parse).collect::<Vec<_>>();
        let tags = extractor.extract("@foo bar\n@wip\n@wip");
        assert_eq!(tags.len(), 3);
        assert_eq!(tags[0].description(), "bar");
        assert_eq!(tags[1], tags[2]);
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(Tag::parse("@foo bar")).unwrap();
        assert_eq!(json["name"], "@foo");
        assert_eq!(json["description"], "bar");
    }
}
