//! Word-map node records

use serde::{Deserialize, Serialize};

/// A lexical entry with its bilingual metadata
///
/// Every field is a plain string; a column missing from the source row
/// becomes an empty string, never null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Root the word derives from (`kök`)
    pub kok: String,

    /// Azerbaijani word (`söz`)
    pub id: String,

    /// English translation (`word`)
    pub en_word: String,

    /// Azerbaijani part of speech (`növ`)
    pub az_word_type: String,

    /// English part of speech (`type`)
    pub en_word_type: String,

    pub azerbaijani_synonyms: String,
    pub english_synonyms: String,
    pub azerbaijani_antonyms: String,
    pub english_antonyms: String,
    pub azerbaijani_variants: String,
    pub english_variants: String,

    /// Example sentences (`cümlələr`)
    pub azerbaijani_sentences: String,
}

/// Body of a successful `/data` response
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodesResponse {
    pub nodes: Vec<Node>,
}

impl From<Vec<Node>> for NodesResponse {
    fn from(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }
}
