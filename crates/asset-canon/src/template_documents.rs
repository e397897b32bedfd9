//! collection of templates ([Value] and path to source file)
//!
//! [TemplateDocuments] keeps the templates in the order they were loaded together with their source path, so errors
//! can point back to the file they came from.
use crate::value::Value;
use std::path::{Path, PathBuf};

/// File name endings picked up by [TemplateDocuments::load_directory]
pub const TEMPLATE_SUFFIXES: [&str; 3] = [".template.json", ".template.yaml", ".template.yml"];

#[derive(Default, Debug)]
pub struct TemplateDocuments {
    documents: Vec<(Source, Value)>,
}

impl TemplateDocuments {
    pub fn insert(&mut self, document: Value, path: impl Into<Option<PathBuf>>) {
        self.documents.push((path.into(), document));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Source, &Value)> {
        self.documents.iter().map(|(source, value)| (source, value))
    }

    pub fn source_count(&self) -> usize {
        self.documents.len()
    }

    /// Single template for one document, batch (array) for several
    pub fn into_value(mut self) -> Value {
        if self.documents.len() == 1 {
            if let Some((_, value)) = self.documents.pop() {
                return value;
            }
        }

        Value::Array(self.documents.into_iter().map(|(_, value)| value).collect())
    }
}

impl TemplateDocuments {
    pub fn load_file(&mut self, file_path: &Path) -> Result<(), LoadError> {
        let file_path = file_path.canonicalize()?;
        tracing::info!(path=%file_path.display(), "loading file");

        let file_contents = std::fs::read_to_string(&file_path)?;
        let document: Value = match file_path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => serde_yaml::from_str(&file_contents)?,
            _ => serde_json::from_str(&file_contents)?,
        };

        self.insert(document, Some(file_path));
        Ok(())
    }

    /// Load all template files of a directory, ordered by file name
    pub fn load_directory(&mut self, dir_path: &Path) -> Result<(), LoadError> {
        let mut file_paths = vec![];

        let read_dir = std::fs::read_dir(dir_path)?;
        for dir_entry in read_dir {
            let dir_entry = dir_entry?;
            if !dir_entry.file_type()?.is_file() {
                continue;
            }

            let file_name = dir_entry.file_name();
            let file_name = file_name.to_string_lossy();
            let is_template_file = TEMPLATE_SUFFIXES
                .iter()
                .any(|suffix| file_name.ends_with(suffix));
            if !is_template_file {
                continue;
            }

            file_paths.push(dir_entry.path());
        }

        if file_paths.is_empty() {
            return Err(LoadError::NoFilesFound);
        }

        file_paths.sort();
        for file_path in &file_paths {
            self.load_file(file_path)?;
        }

        Ok(())
    }

    /// Read a single template, JSON or YAML
    pub fn load_reader(&mut self, reader: impl std::io::Read) -> Result<(), LoadError> {
        let contents = std::io::read_to_string(reader)?;

        let document: Value = match serde_json::from_str(&contents) {
            Ok(document) => document,
            Err(json_error) => {
                tracing::debug!(%json_error, "not json, trying yaml");
                serde_yaml::from_str(&contents)?
            }
        };

        self.insert(document, None);
        Ok(())
    }
}

#[derive(thiserror::Error, Debug)]
pub enum LoadError {
    #[error("No template files found in directory")]
    NoFilesFound,
    #[error("IO error")]
    IoError(#[from] std::io::Error),
    #[error("Unable to parse json template")]
    JsonParseFailed(#[from] serde_json::Error),
    #[error("Unable to parse yaml template")]
    YamlParseFailed(#[from] serde_yaml::Error),
}

impl From<Value> for TemplateDocuments {
    fn from(value: Value) -> Self {
        let mut documents = TemplateDocuments::default();
        documents.insert(value, None);
        documents
    }
}

pub type Source = Option<PathBuf>;
