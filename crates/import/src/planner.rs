//! Classifying import paths.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Component, Path, PathBuf};

use ntt_core::{Error, Result};
use tracing::debug;

use crate::unit::{BuildUnit, T3xf};

/// File extensions recognized as sources.
pub const SOURCE_EXTENSIONS: [&str; 5] = ["ttcn3", "ttcn", "ttcnpp", "asn", "asn1"];

/// What kind of path the caller accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImportShape {
    /// Only directories; a file is [`Error::NotADirectory`]
    #[default]
    Directory,

    /// Directories, or a single source file
    DirectoryOrFile,
}

/// Turns paths into build units.
#[derive(Debug, Clone, Default)]
pub struct ImportPlanner {
    shape: ImportShape,
}

impl ImportPlanner {
    /// Create a planner accepting directories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the accepted path shape.
    pub fn shape(mut self, shape: ImportShape) -> Self {
        self.shape = shape;
        self
    }

    /// Plan a single path.
    ///
    /// Classification, in order:
    /// 1. missing path: [`Error::NotFound`]
    /// 2. file where a directory is required: [`Error::NotADirectory`]
    /// 3. directory without sources: [`Error::NoSources`]
    /// 4. otherwise one unit holding the sources directly inside the directory
    pub fn plan(&self, path: impl AsRef<Path>) -> Result<Vec<Box<dyn BuildUnit>>> {
        let path = clean(path.as_ref());
        let meta = fs::metadata(&path).map_err(|e| Error::from_io(&path, e))?;

        let unit = if meta.is_dir() {
            let sources = scan(&path)?;
            if sources.is_empty() {
                return Err(Error::NoSources { path });
            }
            T3xf::new(unit_name(&path), sources)
        } else {
            match self.shape {
                ImportShape::Directory => {
                    return Err(Error::NotADirectory { path, source: None });
                }
                ImportShape::DirectoryOrFile if is_source_file(&path) => {
                    let name = path
                        .file_stem()
                        .map(|s| s.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    T3xf::new(name, [path])
                }
                ImportShape::DirectoryOrFile => return Err(Error::NoSources { path }),
            }
        };

        debug!(
            "Planned unit {} with {} sources",
            unit.name(),
            unit.sources().len()
        );
        Ok(vec![Box::new(unit)])
    }

    /// Plan several paths in order, stopping at the first error.
    pub fn plan_all<I, P>(&self, paths: I) -> Result<Vec<Box<dyn BuildUnit>>>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut units = Vec::new();
        for path in paths {
            units.extend(self.plan(path)?);
        }
        Ok(units)
    }
}

/// Plan an import directory.
pub fn plan_import(path: impl AsRef<Path>) -> Result<Vec<Box<dyn BuildUnit>>> {
    ImportPlanner::new().plan(path)
}

/// True if the path has a recognized source extension.
pub fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Source files directly inside `dir`. Subdirectories are not descended.
fn scan(dir: &Path) -> Result<BTreeSet<PathBuf>> {
    let mut sources = BTreeSet::new();
    for entry in fs::read_dir(dir).map_err(|e| Error::from_io(dir, e))? {
        let entry = entry.map_err(|e| Error::from_io(dir, e))?;
        let path = dir.join(entry.file_name());
        if path.is_file() && is_source_file(&path) {
            sources.insert(path);
        }
    }
    Ok(sources)
}

/// Drop `.` components so `./lib` plans as `lib`.
fn clean(path: &Path) -> PathBuf {
    let cleaned: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    if cleaned.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        cleaned
    }
}

fn unit_name(dir: &Path) -> String {
    dir.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .or_else(|| {
            fs::canonicalize(dir)
                .ok()
                .and_then(|p| p.file_name().map(|s| s.to_string_lossy().into_owned()))
        })
        .unwrap_or_else(|| "main".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ntt_core::ErrorKind;
    use std::collections::HashSet;
    use tempfile::TempDir;

    /// Lays out:
    ///
    /// ```text
    /// invalid/file.ttcn3
    /// invalid/dirs/sub/a.ttcn3
    /// other/README.md
    /// other/x.txt
    /// 🤔/a.ttcn3
    /// lib/a.ttcn3  lib/b.ttcn3  lib/🤔.ttcn3  lib/notes.txt  lib/sub/c.ttcn3
    /// ```
    fn create_test_tree() -> TempDir {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        for d in ["invalid/dirs/sub", "other", "🤔", "lib/sub"] {
            fs::create_dir_all(root.join(d)).unwrap();
        }
        for f in [
            "invalid/file.ttcn3",
            "invalid/dirs/sub/a.ttcn3",
            "other/README.md",
            "other/x.txt",
            "🤔/a.ttcn3",
            "lib/a.ttcn3",
            "lib/b.ttcn3",
            "lib/🤔.ttcn3",
            "lib/notes.txt",
            "lib/sub/c.ttcn3",
        ] {
            fs::write(root.join(f), "module M {}\n").unwrap();
        }
        dir
    }

    fn source_set(unit: &dyn BuildUnit) -> HashSet<PathBuf> {
        unit.sources().into_iter().collect()
    }

    #[test]
    fn test_plan_imports() {
        let dir = create_test_tree();
        let root = dir.path();

        let errors = [
            ("invalid/notexist", ErrorKind::NotFound),
            ("invalid/file.ttcn3", ErrorKind::NotADirectory),
            ("invalid/dirs", ErrorKind::NoSources),
            ("other", ErrorKind::NoSources),
        ];
        for (path, kind) in errors {
            let err = plan_import(root.join(path)).unwrap_err();
            assert_eq!(err.kind(), kind, "{}: {}", path, err);
        }

        let results: [(&str, &[&str]); 2] = [
            ("🤔", &["🤔/a.ttcn3"]),
            ("lib", &["lib/a.ttcn3", "lib/b.ttcn3", "lib/🤔.ttcn3"]),
        ];
        for (path, want) in results {
            let units = plan_import(root.join(path)).unwrap();
            assert_eq!(units.len(), 1, "{}: {:?}", path, units);

            let want: HashSet<PathBuf> = want.iter().map(|w| root.join(w)).collect();
            assert_eq!(source_set(units[0].as_ref()), want, "{}", path);
        }
    }

    #[test]
    fn test_not_found_keeps_os_cause() {
        use std::error::Error as _;

        let dir = create_test_tree();
        let err = plan_import(dir.path().join("nope")).unwrap_err();
        let io = err
            .source()
            .and_then(|s| s.downcast_ref::<std::io::Error>())
            .unwrap();
        assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_file_used_as_directory() {
        use std::error::Error as _;

        let dir = create_test_tree();
        let err = plan_import(dir.path().join("invalid/file.ttcn3/sub")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotADirectory, "{}", err);
        assert!(err.source().is_some());

        let err = plan_import(dir.path().join("invalid/file.ttcn3")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotADirectory);
        assert!(err.source().is_none());
    }

    #[test]
    fn test_single_file_shape() {
        let dir = create_test_tree();
        let planner = ImportPlanner::new().shape(ImportShape::DirectoryOrFile);

        let units = planner.plan(dir.path().join("lib/a.ttcn3")).unwrap();
        assert_eq!(units.len(), 1);
        assert_eq!(
            source_set(units[0].as_ref()),
            HashSet::from([dir.path().join("lib/a.ttcn3")])
        );

        let err = planner.plan(dir.path().join("other/x.txt")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoSources);

        let units = planner.plan(dir.path().join("lib")).unwrap();
        assert_eq!(units[0].sources().len(), 3);
    }

    #[test]
    fn test_plan_all() {
        let dir = create_test_tree();
        let planner = ImportPlanner::new();

        let units = planner
            .plan_all([dir.path().join("lib"), dir.path().join("🤔")])
            .unwrap();
        assert_eq!(units.len(), 2);
        assert_eq!(units[1].sources().len(), 1);

        let err = planner
            .plan_all([dir.path().join("lib"), dir.path().join("other")])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoSources);
    }

    #[test]
    fn test_clean() {
        assert_eq!(clean(Path::new("./testdata/lib")), PathBuf::from("testdata/lib"));
        assert_eq!(clean(Path::new("testdata/./lib")), PathBuf::from("testdata/lib"));
        assert_eq!(clean(Path::new(".")), PathBuf::from("."));
    }

    #[test]
    fn test_is_source_file() {
        assert!(is_source_file(Path::new("a.ttcn3")));
        assert!(is_source_file(Path::new("dir/b.asn1")));
        assert!(!is_source_file(Path::new("a.ttcn3.bak")));
        assert!(!is_source_file(Path::new("ttcn3")));
    }
}
