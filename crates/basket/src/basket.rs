//! Basket construction and matching.

use ntt_core::{Error, Result, Tag};
use regex::Regex;

use crate::expr::TagExpr;

/// A named test filter with optional child baskets.
///
/// Own predicates are fixed at construction. Children are owned and can only
/// be appended, which keeps the structure a tree.
#[derive(Debug, Clone)]
pub struct Basket {
    /// Diagnostic name
    name: String,

    /// `-r` patterns, all must match
    include_names: Vec<Regex>,

    /// `-x` patterns, none may match
    exclude_names: Vec<Regex>,

    /// `-R` expressions, all must match
    include_tags: Vec<TagExpr>,

    /// `-X` expressions, none may match
    exclude_tags: Vec<TagExpr>,

    /// Alternatives, at least one must match if any exist
    children: Vec<Basket>,
}

impl Basket {
    /// Build a basket from flag/argument tokens, e.g. `["-r", "foo", "-X", "@wip"]`.
    ///
    /// Patterns are compiled here; any unknown flag, missing argument or bad
    /// pattern fails with [`Error::InvalidArgument`].
    pub fn new<I, S>(name: impl Into<String>, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut basket = Self::universal(name);
        let mut args = args.into_iter();

        while let Some(flag) = args.next() {
            let flag = flag.as_ref();
            if !matches!(flag, "-r" | "-x" | "-R" | "-X") {
                return Err(Error::invalid_argument(
                    &basket.name,
                    format!("unknown flag {:?}", flag),
                ));
            }

            let Some(arg) = args.next() else {
                return Err(Error::invalid_argument(
                    &basket.name,
                    format!("flag {} requires an argument", flag),
                ));
            };
            let arg = arg.as_ref();

            match flag {
                "-r" => {
                    let re = basket.compile_name(arg)?;
                    basket.include_names.push(re);
                }
                "-x" => {
                    let re = basket.compile_name(arg)?;
                    basket.exclude_names.push(re);
                }
                "-R" => {
                    let expr = basket.compile_tags(arg)?;
                    basket.include_tags.push(expr);
                }
                _ => {
                    let expr = basket.compile_tags(arg)?;
                    basket.exclude_tags.push(expr);
                }
            }
        }

        Ok(basket)
    }

    /// Build a basket from a whitespace separated flag string.
    pub fn parse(name: impl Into<String>, flags: &str) -> Result<Self> {
        Self::new(name, flags.split_whitespace())
    }

    /// A basket without predicates or children. It matches every test.
    pub fn universal(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            include_names: Vec::new(),
            exclude_names: Vec::new(),
            include_tags: Vec::new(),
            exclude_tags: Vec::new(),
            children: Vec::new(),
        }
    }

    /// A basket selecting tests with a tag matching `tag`, same as `-R <tag>`.
    pub fn tagged(name: impl Into<String>, tag: &str) -> Result<Self> {
        Self::new(name, ["-R", tag])
    }

    fn compile_name(&self, pattern: &str) -> Result<Regex> {
        Regex::new(pattern).map_err(|e| {
            Error::invalid_argument(&self.name, format!("invalid pattern {:?}: {}", pattern, e))
        })
    }

    fn compile_tags(&self, expr: &str) -> Result<TagExpr> {
        TagExpr::parse(expr).map_err(|e| {
            Error::invalid_argument(&self.name, format!("invalid tag expression {:?}: {}", expr, e))
        })
    }

    /// Diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Child baskets in the order they were added.
    pub fn children(&self) -> &[Basket] {
        &self.children
    }

    /// Append a child basket.
    pub fn push(&mut self, child: Basket) {
        self.children.push(child);
    }

    /// Append several child baskets, keeping their order.
    pub fn extend(&mut self, children: impl IntoIterator<Item = Basket>) {
        self.children.extend(children);
    }

    /// True if this basket has no predicates and no children.
    pub fn is_universal(&self) -> bool {
        !self.has_predicates() && self.children.is_empty()
    }

    fn has_predicates(&self) -> bool {
        !(self.include_names.is_empty()
            && self.exclude_names.is_empty()
            && self.include_tags.is_empty()
            && self.exclude_tags.is_empty())
    }

    /// Evaluate this basket's own predicates, ignoring children.
    pub fn matches_own(&self, name: &str, tags: &[Tag]) -> bool {
        self.include_names.iter().all(|re| re.is_match(name))
            && !self.exclude_names.iter().any(|re| re.is_match(name))
            && self.include_tags.iter().all(|expr| expr.matches(tags))
            && !self.exclude_tags.iter().any(|expr| expr.matches(tags))
    }

    /// Decide whether a test with the given name and tags is selected.
    pub fn matches(&self, name: &str, tags: &[Tag]) -> bool {
        if !self.matches_own(name, tags) {
            return false;
        }
        self.children.is_empty() || self.children.iter().any(|c| c.matches(name, tags))
    }

    /// Names of the selected tests, in input order.
    pub fn filter<'a, I>(&self, tests: I) -> Vec<&'a str>
    where
        I: IntoIterator<Item = (&'a str, &'a [Tag])>,
    {
        tests
            .into_iter()
            .filter(|(name, tags)| self.matches(name, tags))
            .map(|(name, _)| name)
            .collect()
    }
}

impl std::fmt::Display for Basket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)?;
        for re in &self.include_names {
            write!(f, " -r {}", re.as_str())?;
        }
        for re in &self.exclude_names {
            write!(f, " -x {}", re.as_str())?;
        }
        for expr in &self.include_tags {
            write!(f, " -R {}", expr)?;
        }
        for expr in &self.exclude_tags {
            write!(f, " -X {}", expr)?;
        }
        Ok(())
    }
}
