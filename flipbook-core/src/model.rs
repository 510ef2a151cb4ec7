//! Document and page records as served by the document store.

use serde::{Deserialize, Serialize};
use std::fmt;

pub type DocumentId = u64;
pub type PageId = u64;

/// Source format of an uploaded document
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FileType {
    Pdf,
    Docx,
    Other(String),
}

impl FileType {
    /// Map a file extension (without the dot) to a supported type
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Other(s) => s,
        }
    }
}

impl From<String> for FileType {
    fn from(value: String) -> Self {
        Self::from_extension(&value).unwrap_or(Self::Other(value))
    }
}

impl From<FileType> for String {
    fn from(value: FileType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single rendered page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub id: PageId,
    /// 1-based, equal to position + 1 within the document
    pub page_number: usize,
    /// Image URL, absolute or relative to the api base
    pub image: String,
}

/// Entry of the document library listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub id: DocumentId,
    pub title: String,
    pub file_type: FileType,
    #[serde(default)]
    pub total_pages: usize,
}

impl DocumentSummary {
    /// Subtitle shown under the title in the library, e.g. "12 pages • PDF"
    pub fn subtitle(&self) -> String {
        format!(
            "{} pages \u{2022} {}",
            self.total_pages,
            self.file_type.as_str().to_uppercase()
        )
    }
}

/// A fully loaded document with its ordered pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: DocumentId,
    pub title: String,
    pub file_type: FileType,
    #[serde(default)]
    pub total_pages: usize,
    #[serde(default)]
    pub pages: Vec<Page>,
}

impl Document {
    /// Number of pages navigation may reach.
    ///
    /// Once pages exist the reported total is capped by the pages actually served.
    pub fn page_bound(&self) -> usize {
        if self.pages.is_empty() {
            self.total_pages
        } else {
            self.total_pages.min(self.pages.len())
        }
    }

    /// Whether the backend has produced page images yet
    pub fn has_pages(&self) -> bool {
        !self.pages.is_empty()
    }
}
