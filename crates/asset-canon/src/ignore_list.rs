//! resources whose code location is always masked
//!
//! Some resources get a freshly generated code location on every synthesis even when their asset parameters are
//! stable. Resources whose name starts with one of the configured prefixes have that location replaced
//! (see [crate::substitution::Substitutions::add_mask]).
use std::path::Path;

#[derive(Debug, Default, Clone, PartialEq)]
pub struct IgnoreList {
    prefixes: Vec<String>,
}

impl IgnoreList {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut list = Self::default();
        list.extend(prefixes);
        list
    }

    /// Add prefixes, duplicates are skipped
    pub fn extend<I, S>(&mut self, prefixes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for prefix in prefixes {
            let prefix = prefix.into();
            if !self.prefixes.contains(&prefix) {
                self.prefixes.push(prefix);
            }
        }
    }

    /// Does `resource_name` start with any of the prefixes
    pub fn matches(&self, resource_name: &str) -> bool {
        self.prefixes
            .iter()
            .any(|prefix| resource_name.starts_with(prefix.as_str()))
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Parse an ignore file
    ///
    /// One prefix per line. Blank lines and lines starting with `#` are skipped.
    pub fn parse(contents: &str) -> Self {
        Self::new(
            contents
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#')),
        )
    }

    pub fn load_file(&mut self, file_path: &Path) -> Result<(), std::io::Error> {
        tracing::info!(path=%file_path.display(), "loading ignore list");
        let contents = std::fs::read_to_string(file_path)?;
        let loaded = Self::parse(&contents);
        self.extend(loaded.prefixes);
        Ok(())
    }
}
