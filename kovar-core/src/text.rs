//! Text content carried by text objects.

use serde::{Deserialize, Serialize};

/// Text content as stored by the editor.
///
/// Older snapshots store a plain string; the editor's rich-text model stores
/// a document of blocks, each holding inline runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextContent {
    /// Plain string.
    Plain(String),
    /// Rich-text document.
    Rich(RichText),
}

/// Rich-text document: a list of blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichText {
    /// Blocks (paragraphs).
    #[serde(default)]
    pub content: Vec<RichBlock>,
}

/// A block of inline runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichBlock {
    /// Inline runs.
    #[serde(default)]
    pub content: Vec<RichInline>,
}

/// An inline run. Non-text runs (hard breaks, mentions) have no `text`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RichInline {
    /// Run text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl TextContent {
    /// Flatten to plain text. Runs and blocks are concatenated without separators.
    #[must_use]
    pub fn plain_text(&self) -> String {
        match self {
            Self::Plain(text) => text.clone(),
            Self::Rich(doc) => doc
                .content
                .iter()
                .flat_map(|block| block.content.iter())
                .filter_map(|run| run.text.as_deref())
                .collect(),
        }
    }
}

impl From<&str> for TextContent {
    fn from(text: &str) -> Self {
        Self::Plain(text.to_string())
    }
}

impl From<String> for TextContent {
    fn from(text: String) -> Self {
        Self::Plain(text)
    }
}

impl From<RichText> for TextContent {
    fn from(doc: RichText) -> Self {
        Self::Rich(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rich_text_concatenates_runs() {
        let json = r#"{
            "type": "doc",
            "content": [
                { "type": "paragraph", "content": [ { "type": "text", "text": "Hello " }, { "type": "text", "text": "there" } ] },
                { "type": "paragraph" },
                { "type": "paragraph", "content": [ { "type": "hardBreak" }, { "type": "text", "text": "!" } ] }
            ]
        }"#;

        let content: TextContent = serde_json::from_str(json).expect("should parse");
        assert!(matches!(content, TextContent::Rich(_)));
        assert_eq!(content.plain_text(), "Hello there!");
    }

    #[test]
    fn test_plain_text_passes_through() {
        let content: TextContent = serde_json::from_str(r#""Sign in""#).expect("should parse");
        assert_eq!(content.plain_text(), "Sign in");
    }

    #[test]
    fn test_empty_document_is_empty() {
        assert_eq!(TextContent::Rich(RichText::default()).plain_text(), "");
    }
}
