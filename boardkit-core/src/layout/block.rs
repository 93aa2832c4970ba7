//! Content blocks held by leaf containers
//!
//! A block is a single unit of page content. Blocks only ever live in the
//! `blocks` sequence of a leaf container and carry a back-reference to that
//! container (`drop_area_id`) which the store rewrites on every move.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::LayoutError;
use super::types::{BlockId, ContainerId};

/// Smallest valid heading level.
pub const MIN_HEADING_LEVEL: u8 = 1;

/// Largest valid heading level.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Block type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlockKind {
    /// Section heading (levels 1-6)
    Heading,
    /// Body text
    Paragraph,
    /// Uploaded image
    Image,
    /// Call-to-action button
    Button,
    /// Contact / signup form
    Form,
    /// Horizontal rule
    Divider,
    /// Uploaded audio clip
    Audio,
    /// Uploaded or transcoded video
    Video,
    /// Downloadable document (PDF etc.)
    Document,
    /// Stock media picked from the Freepik library
    FreepikMedia,
    /// Animated GIF picked from Giphy
    Gif,
    /// Vertical whitespace
    Spacer,
}

impl BlockKind {
    /// Returns all block kinds in palette order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Heading,
            Self::Paragraph,
            Self::Image,
            Self::Button,
            Self::Form,
            Self::Divider,
            Self::Audio,
            Self::Video,
            Self::Document,
            Self::FreepikMedia,
            Self::Gif,
            Self::Spacer,
        ]
    }

    /// Returns the kebab-case tag used in documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Paragraph => "paragraph",
            Self::Image => "image",
            Self::Button => "button",
            Self::Form => "form",
            Self::Divider => "divider",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Document => "document",
            Self::FreepikMedia => "freepik-media",
            Self::Gif => "gif",
            Self::Spacer => "spacer",
        }
    }

    /// Returns true for kinds whose payload is an externally stored asset.
    #[must_use]
    pub const fn is_media(self) -> bool {
        matches!(
            self,
            Self::Image | Self::Audio | Self::Video | Self::Document | Self::FreepikMedia | Self::Gif
        )
    }

    /// Returns true if `content` is a valid payload for this kind.
    ///
    /// Every kind accepts `Empty` so that a block can be dropped from the
    /// palette before its payload exists.
    #[must_use]
    pub const fn accepts(self, content: &BlockContent) -> bool {
        match content {
            BlockContent::Empty => true,
            BlockContent::Text { .. } => matches!(self, Self::Heading | Self::Paragraph),
            BlockContent::Media(_) => self.is_media(),
            BlockContent::Button { .. } => matches!(self, Self::Button),
            BlockContent::Form { .. } => matches!(self, Self::Form),
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.as_str() == lower)
            .ok_or_else(|| format!("unknown block type: {s}"))
    }
}

/// Reference to an externally stored media asset.
///
/// Resolving the reference to bytes or a preview is the job of the media
/// service; the layout tree only carries the pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRef {
    /// Public or signed URL of the asset
    pub url: String,
    /// Storage-side identifier, if the asset was uploaded by the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_id: Option<String>,
    /// MIME type reported by the upload pipeline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    /// Alternative text for accessibility
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl MediaRef {
    /// Creates a reference from a URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            media_id: None,
            mime_type: None,
            alt: None,
        }
    }

    /// Sets the storage-side identifier.
    #[must_use]
    pub fn with_media_id(mut self, media_id: impl Into<String>) -> Self {
        self.media_id = Some(media_id.into());
        self
    }

    /// Sets the MIME type.
    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// A single field of a form block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    /// Field name submitted with the form
    pub name: String,
    /// Label shown to the visitor
    pub label: String,
    /// Whether the field must be filled in
    #[serde(default)]
    pub required: bool,
}

/// Type-dependent block payload.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum BlockContent {
    /// No payload yet
    #[default]
    Empty,
    /// Plain or rich text
    Text {
        /// The text itself
        text: String,
    },
    /// Pointer to an asset
    Media(MediaRef),
    /// Button label and link target
    Button {
        /// Visible label
        label: String,
        /// Link target
        #[serde(default, skip_serializing_if = "Option::is_none")]
        href: Option<String>,
    },
    /// Form definition
    Form {
        /// Input fields in display order
        fields: Vec<FormField>,
        /// Submit button label
        #[serde(rename = "submitLabel")]
        submit_label: String,
    },
}

impl BlockContent {
    /// Creates a text payload.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Returns the media reference, if this is a media payload.
    #[must_use]
    pub const fn media(&self) -> Option<&MediaRef> {
        match self {
            Self::Media(media) => Some(media),
            _ => None,
        }
    }
}

/// Horizontal alignment of a block within its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Align to the start edge
    Left,
    /// Center
    Center,
    /// Align to the end edge
    Right,
}

/// Optional type-specific attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockAttributes {
    /// Heading level (1-6), headings only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_level: Option<u8>,
    /// Horizontal alignment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
}

impl BlockAttributes {
    /// Returns true if no attribute is set.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.heading_level.is_none() && self.alignment.is_none()
    }
}

/// A content block inside a leaf container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Unique identifier
    pub id: BlockId,
    /// Block type tag
    #[serde(rename = "type")]
    pub kind: BlockKind,
    /// Type-dependent payload
    #[serde(default)]
    pub content: BlockContent,
    /// Container currently holding this block
    pub drop_area_id: ContainerId,
    /// Type-specific attributes
    #[serde(default, skip_serializing_if = "BlockAttributes::is_empty")]
    pub attributes: BlockAttributes,
}

impl Block {
    /// Returns the media reference carried by this block, if any.
    #[must_use]
    pub const fn media(&self) -> Option<&MediaRef> {
        self.content.media()
    }

    /// Checks that the payload and attributes fit the kind.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::InvalidBlock` describing the first problem found.
    pub fn validate(&self) -> Result<(), LayoutError> {
        validate_parts(self.kind, &self.content, &self.attributes)
    }
}

/// Payload used to create a new block.
///
/// The store assigns the ID and the owning container when the `BlockSpec` is
/// turned into a [`Block`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSpec {
    /// Block type tag
    pub kind: BlockKind,
    /// Initial payload
    pub content: BlockContent,
    /// Initial attributes
    pub attributes: BlockAttributes,
}

impl BlockSpec {
    /// Creates a spec with an empty payload.
    #[must_use]
    pub fn new(kind: BlockKind) -> Self {
        let attributes = if kind == BlockKind::Heading {
            BlockAttributes {
                heading_level: Some(2),
                alignment: None,
            }
        } else {
            BlockAttributes::default()
        };
        Self {
            kind,
            content: BlockContent::Empty,
            attributes,
        }
    }

    /// Creates a heading spec with the given level and text.
    #[must_use]
    pub fn heading(level: u8, text: impl Into<String>) -> Self {
        Self {
            kind: BlockKind::Heading,
            content: BlockContent::text(text),
            attributes: BlockAttributes {
                heading_level: Some(level),
                alignment: None,
            },
        }
    }

    /// Creates a paragraph spec.
    #[must_use]
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self::new(BlockKind::Paragraph).with_content(BlockContent::text(text))
    }

    /// Creates a media spec of the given kind.
    #[must_use]
    pub fn media(kind: BlockKind, media: MediaRef) -> Self {
        Self::new(kind).with_content(BlockContent::Media(media))
    }

    /// Replaces the payload.
    #[must_use]
    pub fn with_content(mut self, content: BlockContent) -> Self {
        self.content = content;
        self
    }

    /// Replaces the attributes.
    #[must_use]
    pub const fn with_attributes(mut self, attributes: BlockAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Checks that the payload and attributes fit the kind.
    ///
    /// # Errors
    ///
    /// Returns `LayoutError::InvalidBlock` describing the first problem found.
    pub fn validate(&self) -> Result<(), LayoutError> {
        validate_parts(self.kind, &self.content, &self.attributes)
    }

    /// Turns this `BlockSpec` into a block owned by `container_id`.
    #[must_use]
    pub fn into_block(self, container_id: ContainerId) -> Block {
        Block {
            id: BlockId::new(),
            kind: self.kind,
            content: self.content,
            drop_area_id: container_id,
            attributes: self.attributes,
        }
    }
}

/// Shared validation for new blocks and for edits of existing ones.
pub(crate) fn validate_parts(
    kind: BlockKind,
    content: &BlockContent,
    attributes: &BlockAttributes,
) -> Result<(), LayoutError> {
    if !kind.accepts(content) {
        return Err(LayoutError::InvalidBlock(format!(
            "{kind} blocks cannot hold this content"
        )));
    }
    match (kind, attributes.heading_level) {
        (BlockKind::Heading, Some(level))
            if !(MIN_HEADING_LEVEL..=MAX_HEADING_LEVEL).contains(&level) =>
        {
            Err(LayoutError::InvalidBlock(format!(
                "heading level {level} outside {MIN_HEADING_LEVEL}..={MAX_HEADING_LEVEL}"
            )))
        }
        (BlockKind::Heading, _) | (_, None) => Ok(()),
        (_, Some(_)) => Err(LayoutError::InvalidBlock(format!(
            "heading level set on a {kind} block"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_kind_from_str_accepts_kebab_case() {
        assert_eq!("freepik-media".parse::<BlockKind>(), Ok(BlockKind::FreepikMedia));
        assert_eq!("Heading".parse::<BlockKind>(), Ok(BlockKind::Heading));
        assert!("carousel".parse::<BlockKind>().is_err());
    }

    #[test]
    fn block_kind_serializes_kebab_case() {
        let json = serde_json::to_string(&BlockKind::FreepikMedia).unwrap();
        assert_eq!(json, "\"freepik-media\"");
    }

    #[test]
    fn media_kinds_reject_text() {
        assert!(!BlockKind::Image.accepts(&BlockContent::text("hello")));
        assert!(BlockKind::Image.accepts(&BlockContent::Media(MediaRef::new("a.png"))));
        assert!(BlockKind::Image.accepts(&BlockContent::Empty));
    }

    #[test]
    fn heading_spec_validates() {
        assert!(BlockSpec::heading(1, "Title").validate().is_ok());
        assert!(BlockSpec::heading(6, "Title").validate().is_ok());
    }

    #[test]
    fn heading_level_out_of_range_is_rejected() {
        let err = BlockSpec::heading(7, "Title").validate().unwrap_err();
        assert!(matches!(err, LayoutError::InvalidBlock(_)));
        assert!(BlockSpec::heading(0, "Title").validate().is_err());
    }

    #[test]
    fn heading_level_on_paragraph_is_rejected() {
        let spec = BlockSpec::paragraph("body").with_attributes(BlockAttributes {
            heading_level: Some(2),
            alignment: None,
        });
        assert!(spec.validate().is_err());
    }

    #[test]
    fn new_heading_spec_defaults_to_level_two() {
        let spec = BlockSpec::new(BlockKind::Heading);
        assert_eq!(spec.attributes.heading_level, Some(2));
    }

    #[test]
    fn into_block_sets_back_reference() {
        let container = ContainerId::new();
        let block = BlockSpec::paragraph("body").into_block(container);
        assert_eq!(block.drop_area_id, container);
        assert_eq!(block.kind, BlockKind::Paragraph);
    }

    #[test]
    fn block_wire_format_uses_type_and_drop_area_id() {
        let block = BlockSpec::heading(1, "Hi").into_block(ContainerId::new());
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["type"], "heading");
        assert!(value.get("dropAreaId").is_some());
        assert_eq!(value["attributes"]["headingLevel"], 1);
        assert_eq!(value["content"]["kind"], "text");
    }

    #[test]
    fn empty_attributes_are_omitted() {
        let block = BlockSpec::new(BlockKind::Divider).into_block(ContainerId::new());
        let value = serde_json::to_value(&block).unwrap();
        assert!(value.get("attributes").is_none());
    }
}
