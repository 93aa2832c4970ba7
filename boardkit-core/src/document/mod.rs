//! Layout documents for `Boardkit`
//!
//! A [`LayoutDocument`] is the persisted form of one project's page: its
//! metadata plus the ordered root containers. Documents are written as JSON
//! (or YAML) using the flat container shape (`isSplit`, `splitAreas`,
//! `splitLevel`, `parentId`).
//!
//! Reading a document is a two-step process: the text is parsed into plain
//! records, then the records are validated against every structural
//! invariant of the layout tree before a single [`Container`] is built.
//! Syntax problems surface as [`DocumentError::Parse`], structural problems
//! as [`DocumentError::Invalid`]; a broken document never turns into an
//! empty or partial tree.
//!
//! # Example
//!
//! ```
//! use boardkit_core::document::{DocumentError, LayoutDocument};
//! use boardkit_core::layout::LayoutStore;
//!
//! let store = LayoutStore::new("Landing page");
//! let json = store.to_document().to_json().unwrap();
//! let loaded = LayoutDocument::from_json(&json).unwrap();
//! assert_eq!(loaded.title, "Landing page");
//!
//! let broken = json.replace("\"splitLevel\": 0", "\"splitLevel\": 3");
//! assert!(matches!(
//!     LayoutDocument::from_json(&broken),
//!     Err(DocumentError::Invalid(_))
//! ));
//! ```

mod validation;

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::layout::{Container, ContainerRecord, ProjectId};

pub use validation::{ValidationError, validate_records};

/// Errors that can occur while reading or writing documents
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The text is not a well-formed document
    #[error("Failed to parse document: {0}")]
    Parse(String),

    /// The document could not be serialized
    #[error("Failed to serialize document: {0}")]
    Serialize(String),

    /// The document is well-formed but breaks a layout invariant
    #[error("Invalid document: {0}")]
    Invalid(#[from] ValidationError),
}

/// Result type for document operations
pub type DocumentResult<T> = std::result::Result<T, DocumentError>;

/// Document format version for compatibility
pub const DOCUMENT_FORMAT_VERSION: u32 = 1;

/// Publication state of a page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PublishStatus {
    /// Only visible in the editor
    #[default]
    Draft,
    /// Publicly visible
    Published {
        /// When the page was published
        published_at: DateTime<Utc>,
    },
}

impl PublishStatus {
    /// Returns true if the page is published.
    #[must_use]
    pub const fn is_published(&self) -> bool {
        matches!(self, Self::Published { .. })
    }
}

/// Text format of a document file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// YAML
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from a file extension, defaulting to JSON.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }

    /// Returns the preferred file extension.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

/// The persisted layout of one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "DocumentRecord")]
pub struct LayoutDocument {
    /// Document format version
    pub format_version: u32,
    /// Owning project
    pub project_id: ProjectId,
    /// Page title
    pub title: String,
    /// Optional page description
    pub description: Option<String>,
    /// Publication state
    pub publish_status: PublishStatus,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
    /// Root containers in document order
    pub containers: Vec<Container>,
}

/// Wire form of a document, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Document format version
    #[serde(default = "default_format_version")]
    pub format_version: u32,
    /// Owning project
    pub project_id: ProjectId,
    /// Page title
    #[serde(default)]
    pub title: String,
    /// Optional page description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the page is published
    #[serde(default)]
    pub published: bool,
    /// When the page was published
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
    /// Root containers
    #[serde(default)]
    pub containers: Vec<ContainerRecord>,
}

const fn default_format_version() -> u32 {
    DOCUMENT_FORMAT_VERSION
}

impl From<LayoutDocument> for DocumentRecord {
    fn from(document: LayoutDocument) -> Self {
        let (published, published_at) = match document.publish_status {
            PublishStatus::Draft => (false, None),
            PublishStatus::Published { published_at } => (true, Some(published_at)),
        };
        Self {
            format_version: document.format_version,
            project_id: document.project_id,
            title: document.title,
            description: document.description,
            published,
            published_at,
            updated_at: document.updated_at,
            containers: document.containers.into_iter().map(Into::into).collect(),
        }
    }
}

impl TryFrom<DocumentRecord> for LayoutDocument {
    type Error = ValidationError;

    fn try_from(record: DocumentRecord) -> Result<Self, Self::Error> {
        if record.format_version > DOCUMENT_FORMAT_VERSION {
            return Err(ValidationError::UnsupportedVersion {
                found: record.format_version,
                supported: DOCUMENT_FORMAT_VERSION,
            });
        }
        let containers = validate_records(record.containers)?;
        let publish_status = if record.published {
            PublishStatus::Published {
                published_at: record.published_at.unwrap_or(record.updated_at),
            }
        } else {
            PublishStatus::Draft
        };
        Ok(Self {
            format_version: DOCUMENT_FORMAT_VERSION,
            project_id: record.project_id,
            title: record.title,
            description: record.description,
            publish_status,
            updated_at: record.updated_at,
            containers,
        })
    }
}

impl LayoutDocument {
    /// Serializes the document to JSON
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Serialize` if serialization fails
    pub fn to_json(&self) -> DocumentResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| DocumentError::Serialize(e.to_string()))
    }

    /// Deserializes and validates a document from JSON
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Parse` for malformed JSON and
    /// `DocumentError::Invalid` for a document that breaks a tree invariant
    pub fn from_json(json: &str) -> DocumentResult<Self> {
        let record: DocumentRecord =
            serde_json::from_str(json).map_err(|e| DocumentError::Parse(e.to_string()))?;
        Self::from_record(record)
    }

    /// Serializes the document to YAML
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Serialize` if serialization fails
    pub fn to_yaml(&self) -> DocumentResult<String> {
        serde_yaml::to_string(self).map_err(|e| DocumentError::Serialize(e.to_string()))
    }

    /// Deserializes and validates a document from YAML
    ///
    /// # Errors
    ///
    /// Same as [`from_json`](Self::from_json).
    pub fn from_yaml(yaml: &str) -> DocumentResult<Self> {
        let record: DocumentRecord =
            serde_yaml::from_str(yaml).map_err(|e| DocumentError::Parse(e.to_string()))?;
        Self::from_record(record)
    }

    /// Serializes the document in the given format
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Serialize` if serialization fails
    pub fn to_format(&self, format: DocumentFormat) -> DocumentResult<String> {
        match format {
            DocumentFormat::Json => self.to_json(),
            DocumentFormat::Yaml => self.to_yaml(),
        }
    }

    /// Deserializes and validates a document in the given format
    ///
    /// # Errors
    ///
    /// Same as [`from_json`](Self::from_json).
    pub fn from_format(content: &str, format: DocumentFormat) -> DocumentResult<Self> {
        match format {
            DocumentFormat::Json => Self::from_json(content),
            DocumentFormat::Yaml => Self::from_yaml(content),
        }
    }

    /// Validates a parsed record and builds the document
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Invalid` describing the first violation found
    pub fn from_record(record: DocumentRecord) -> DocumentResult<Self> {
        let project_id = record.project_id;
        Self::try_from(record).map_err(|e| {
            tracing::warn!(project = %project_id, error = %e, "Rejected invalid layout document");
            DocumentError::Invalid(e)
        })
    }
}
