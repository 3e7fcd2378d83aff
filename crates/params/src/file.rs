//! Parameter file parsing.
//!
//! Files are line oriented:
//!
//! ```text
//! # comment
//! %module test
//! %test A
//! %test B
//! X=X from good
//! Y = Y from good
//! ```
//!
//! `%module` names the module the file belongs to, `%test` lists the tests
//! its values apply to. Both are optional.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use ntt_core::{Error, Result};

/// A parsed parameter file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamsFile {
    /// Where the file was read from
    pub path: PathBuf,

    /// Declared module (`%module`)
    pub module: Option<String>,

    /// Declared tests (`%test`), qualified or not
    pub tests: Vec<String>,

    /// Parameter values
    pub values: BTreeMap<String, String>,
}

impl ParamsFile {
    /// Read and parse a file. A missing file yields `None`.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                return Err(Error::parse(path, 1, "file is not valid UTF-8"));
            }
            Err(e) => return Err(Error::from_io(path, e)),
        };
        Self::parse(path, &content).map(Some)
    }

    /// Parse file content. `path` is only used for error reporting.
    pub fn parse(path: impl Into<PathBuf>, content: &str) -> Result<Self> {
        let mut file = Self {
            path: path.into(),
            ..Default::default()
        };

        for (index, raw) in content.lines().enumerate() {
            let line = raw.trim();
            let lineno = index + 1;

            if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
                continue;
            }

            if let Some(directive) = line.strip_prefix('%') {
                file.directive(lineno, directive)?;
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(Error::parse(&file.path, lineno, "expected key=value"));
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(Error::parse(&file.path, lineno, "empty parameter name"));
            }
            if key.contains(char::is_whitespace) {
                return Err(Error::parse(
                    &file.path,
                    lineno,
                    format!("invalid parameter name {:?}", key),
                ));
            }
            file.values.insert(key.to_string(), value.trim().to_string());
        }

        Ok(file)
    }

    fn directive(&mut self, lineno: usize, directive: &str) -> Result<()> {
        let (name, arg) = match directive.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (directive, ""),
        };
        if arg.is_empty() {
            return Err(Error::parse(
                &self.path,
                lineno,
                format!("%{} requires an argument", name),
            ));
        }

        match name {
            "module" => {
                if self.module.is_some() {
                    return Err(Error::parse(&self.path, lineno, "duplicate %module"));
                }
                self.module = Some(arg.to_string());
            }
            "test" => self.tests.push(arg.to_string()),
            _ => {
                return Err(Error::parse(
                    &self.path,
                    lineno,
                    format!("unknown directive %{}", name),
                ));
            }
        }
        Ok(())
    }

    /// Whether the values of this file apply to a test.
    ///
    /// `module` is the requested (or inferred) module, `test` the test name
    /// without module. A request without test name always applies.
    pub fn applies_to(&self, module: Option<&str>, test: Option<&str>) -> bool {
        let Some(test) = test else {
            return true;
        };
        if self.module.is_some() && self.module.as_deref() != module {
            return false;
        }
        if self.tests.is_empty() {
            return true;
        }
        self.tests.iter().any(|entry| match entry.split_once('.') {
            Some((m, t)) => Some(m) == module && t == test,
            None => entry == test,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntt_core::ErrorKind;
    use tempfile::TempDir;

    #[test]
    fn test_parse_values_and_directives() {
        let content = "\
# defaults
%module test
%test A
%test test.B

X=X from good
  Y = Y from good
// trailing comment
URL=http://host/?a=b
";
        let file = ParamsFile::parse("good.parameters", content).unwrap();
        assert_eq!(file.module.as_deref(), Some("test"));
        assert_eq!(file.tests, vec!["A", "test.B"]);
        assert_eq!(file.values.len(), 3);
        assert_eq!(file.values["X"], "X from good");
        assert_eq!(file.values["Y"], "Y from good");
        assert_eq!(file.values["URL"], "http://host/?a=b");
    }

    #[test]
    fn test_later_duplicates_win() {
        let file = ParamsFile::parse("p", "X=1\nX=2\n").unwrap();
        assert_eq!(file.values["X"], "2");
    }

    #[test]
    fn test_empty_value_is_allowed() {
        let file = ParamsFile::parse("p", "X=\n").unwrap();
        assert_eq!(file.values["X"], "");
    }

    #[test]
    fn test_parse_errors_report_line() {
        let cases = [
            ("X=1\nnot a parameter\n", 2),
            ("=1\n", 1),
            ("A B=1\n", 1),
            ("\n\n%module\n", 3),
            ("%module a\n%module b\n", 2),
            ("%include other\n", 1),
        ];
        for (content, line) in cases {
            match ParamsFile::parse("bad.parameters", content) {
                Err(Error::Parse { line: got, .. }) => assert_eq!(got, line, "{:?}", content),
                other => panic!("{:?}: expected parse error, got {:?}", content, other),
            }
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        assert_eq!(ParamsFile::load(dir.path().join("nope")).unwrap(), None);
    }

    #[test]
    fn test_load_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("p.parameters");
        fs::write(&path, "A=1\n").unwrap();

        let file = ParamsFile::load(&path).unwrap().unwrap();
        assert_eq!(file.path, path);
        assert_eq!(file.values["A"], "1");
    }

    #[test]
    fn test_load_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("p.parameters");
        fs::write(&path, [b'A', b'=', 0xff, 0xfe]).unwrap();

        let err = ParamsFile::load(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ParseError);
    }

    #[test]
    fn test_applies_to() {
        let file = ParamsFile::parse("p", "%module test\n%test A\n%test test.B\n").unwrap();
        assert!(file.applies_to(None, None));
        assert!(file.applies_to(Some("test"), Some("A")));
        assert!(file.applies_to(Some("test"), Some("B")));
        assert!(!file.applies_to(Some("test"), Some("C")));
        assert!(!file.applies_to(Some("other"), Some("A")));

        let open = ParamsFile::parse("p", "X=1\n").unwrap();
        assert!(open.applies_to(Some("any"), Some("thing")));
        assert!(open.applies_to(None, Some("thing")));
    }
}
