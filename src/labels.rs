use std::fs;
use std::io;
use std::path::Path;

/// Ordered class names; index `i` names the class scored at position `i`
/// of the classifier output. Immutable after load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelVocabulary {
    names: Vec<String>,
}

impl LabelVocabulary {
    /// Reads one label per line, trimming whitespace and skipping blanks.
    pub fn from_file(path: &Path) -> io::Result<Self> {
        let raw = fs::read_to_string(path)?;
        let names = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        Ok(Self { names })
    }

    pub fn from_names(names: Vec<String>) -> Self {
        Self { names }
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
