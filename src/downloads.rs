use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ignore::WalkBuilder;

/// A file found in the downloads directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Full path to the file.
    pub path: PathBuf,
    /// File name, used for identifier matching.
    pub name: String,
}

/// The files available in the downloads directory.
#[derive(Debug, Default)]
pub struct Downloads {
    files: Vec<Download>,
}

impl Downloads {
    /// Scan the given directory for downloaded files.
    ///
    /// Files are kept sorted by file name so that matching is deterministic.
    /// File names which are not valid unicode can never match an identifier
    /// and are ignored.
    pub fn scan(dir: &Path) -> Result<Self> {
        let mut files = Vec::new();

        for entry in WalkBuilder::new(dir).standard_filters(false).build() {
            let entry = entry.with_context(|| format!("scanning {}", dir.display()))?;

            if !entry.file_type().is_some_and(|ty| ty.is_file()) {
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                continue;
            };

            files.push(Download {
                name: name.to_owned(),
                path: entry.into_path(),
            });
        }

        files.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.path.cmp(&b.path)));
        Ok(Self { files })
    }

    /// Number of files available.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Test if no files are available.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Find the first file, in lexical order, whose name is equal to or
    /// prefixed by the given identifier.
    pub fn find(&self, id: &str) -> Option<&Download> {
        self.files.iter().find(|file| file.name.starts_with(id))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::Downloads;

    #[test]
    fn matches_by_identifier_prefix() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("abc123.webma"), b"").unwrap();
        fs::write(dir.path().join("xyz.webma"), b"").unwrap();

        let downloads = Downloads::scan(dir.path()).unwrap();

        assert_eq!(downloads.len(), 2);
        assert_eq!(downloads.find("abc123").unwrap().name, "abc123.webma");
        assert_eq!(downloads.find("xyz.webma").unwrap().name, "xyz.webma");
        assert!(downloads.find("nope").is_none());
    }

    #[test]
    fn ambiguous_identifiers_use_the_first_lexical_match() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("abc123.webma"), b"").unwrap();
        fs::write(dir.path().join("abc123 (1).webma"), b"").unwrap();

        let downloads = Downloads::scan(dir.path()).unwrap();

        assert_eq!(downloads.find("abc123").unwrap().name, "abc123 (1).webma");
    }

    #[test]
    fn scans_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested").join("abc123.mp4a"), b"").unwrap();

        let downloads = Downloads::scan(dir.path()).unwrap();

        assert_eq!(downloads.find("abc123").unwrap().name, "abc123.mp4a");
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Downloads::scan(&dir.path().join("missing")).is_err());
    }
}
