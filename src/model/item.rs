//! Annotation entities and the versioned file container.
//!
//! This is the canonical polymorphic model shared by every document type.
//! Items are created by a single user action, mutated only by whole-field
//! replacement, and deleted by id. The file is the unit of persistence:
//! read once per document open, rewritten in full on save.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use super::target::AnnotationTarget;

/// The exact version literal of the current file container.
///
/// An unrecognized version is always invalid; decoding never coerces or
/// best-effort parses another version.
pub const CURRENT_VERSION: u32 = 2;

/// Milliseconds since the Unix epoch.
pub type TimestampMs = i64;

/// Returns the current time as milliseconds since the Unix epoch.
pub fn now_millis() -> TimestampMs {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// The visual kind of an annotation mark.
///
/// Unknown strings survive decode/encode verbatim via [`StyleKind::Other`],
/// so files written by newer versions keep their styling through a
/// load/save cycle here.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StyleKind {
    Highlight,
    Underline,
    Area,
    Drawing,
    Pin,
    Other(String),
}

impl StyleKind {
    /// The canonical serialized name.
    pub fn as_str(&self) -> &str {
        match self {
            StyleKind::Highlight => "highlight",
            StyleKind::Underline => "underline",
            StyleKind::Area => "area",
            StyleKind::Drawing => "drawing",
            StyleKind::Pin => "pin",
            StyleKind::Other(s) => s,
        }
    }

    /// Parses a serialized name, keeping unknown values as `Other`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "highlight" => StyleKind::Highlight,
            "underline" => StyleKind::Underline,
            "area" => StyleKind::Area,
            "drawing" => StyleKind::Drawing,
            "pin" => StyleKind::Pin,
            other => StyleKind::Other(other.to_string()),
        }
    }

    /// Display label with the first letter capitalized, e.g. "Highlight".
    pub fn label(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            None => String::new(),
        }
    }
}

impl Serialize for StyleKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StyleKind {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(StyleKind::from_name(&name))
    }
}

/// How an annotation is drawn: a color plus a mark kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationStyle {
    /// Color name or hex string, e.g. "yellow" or "#ffff00".
    pub color: String,

    /// The mark kind.
    #[serde(rename = "type")]
    pub kind: StyleKind,
}

impl AnnotationStyle {
    pub fn new(color: impl Into<String>, kind: StyleKind) -> Self {
        Self {
            color: color.into(),
            kind,
        }
    }
}

/// A single annotation.
///
/// `id` and `author` never change after creation except through full
/// replacement of the item. Absent `content`/`comment` is represented as
/// the field not being present, never as an empty string; the two states
/// have distinct downstream behavior.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationItem {
    /// Unique within a file.
    pub id: Uuid,

    /// Where the annotation is anchored.
    pub target: AnnotationTarget,

    /// How it is drawn.
    pub style: AnnotationStyle,

    /// The annotated text itself, when the target carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// The author's note about the annotated region.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// Identity string supplied by the session layer.
    pub author: String,

    /// Creation time in milliseconds since the Unix epoch.
    pub created_at: TimestampMs,
}

impl AnnotationItem {
    /// Creates a new annotation with a fresh id and the current time.
    ///
    /// Coordinates are never inferred; the caller supplies the target.
    pub fn new(target: AnnotationTarget, style: AnnotationStyle, author: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            target,
            style,
            content: None,
            comment: None,
            author: author.into(),
            created_at: now_millis(),
        }
    }

    /// Attaches the annotated text. Empty strings are normalized to absent.
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = non_empty(content.into());
        self
    }

    /// Attaches an author note. Empty strings are normalized to absent.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = non_empty(comment.into());
        self
    }
}

/// Normalizes the absent/empty distinction: empty in, absent out.
pub(crate) fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// The document type an annotation file belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FileType {
    Pdf,
    Image,
    Code,
    Text,
}

/// The versioned, per-document annotation container.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationFile {
    /// Exact version literal; see [`CURRENT_VERSION`].
    pub version: u32,

    /// Storage key derived from the document path.
    pub file_id: String,

    /// The document type.
    pub file_type: FileType,

    /// All annotations, in creation order.
    pub annotations: Vec<AnnotationItem>,

    /// Last save time in milliseconds since the Unix epoch.
    pub last_modified: TimestampMs,
}

impl AnnotationFile {
    /// Creates an empty container at the current version.
    pub fn new(file_id: impl Into<String>, file_type: FileType) -> Self {
        Self {
            version: CURRENT_VERSION,
            file_id: file_id.into(),
            file_type,
            annotations: Vec::new(),
            last_modified: now_millis(),
        }
    }
}
