use std::fmt;

use serde::Serialize;

/// Outcome of a single strategy invocation.
///
/// The two sentinel variants describe a well-formed request that the data
/// cannot satisfy. They are ordinary, displayable results and not errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Sample {
    /// A single token.
    Token(String),
    /// Several tokens in draw order, displayed space-joined.
    Phrase(Vec<String>),
    /// Stratified sampling collected nothing.
    NoValidSelection,
    /// Cluster sampling pooled fewer tokens than requested.
    NotEnoughWords,
}

impl Sample {
    pub fn token(token: impl Into<String>) -> Self {
        Self::Token(token.into())
    }

    /// The tokens carried by this sample; empty for sentinels.
    pub fn tokens(&self) -> Vec<&str> {
        match self {
            Self::Token(token) => vec![token.as_str()],
            Self::Phrase(words) => words.iter().map(String::as_str).collect(),
            Self::NoValidSelection | Self::NotEnoughWords => Vec::new(),
        }
    }

    /// The single token, if this is a [`Sample::Token`].
    pub fn as_token(&self) -> Option<&str> {
        match self {
            Self::Token(token) => Some(token),
            _ => None,
        }
    }

    pub const fn is_sentinel(&self) -> bool {
        matches!(self, Self::NoValidSelection | Self::NotEnoughWords)
    }
}

impl fmt::Display for Sample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(token) => f.write_str(token),
            Self::Phrase(words) => f.write_str(&words.join(" ")),
            Self::NoValidSelection => f.write_str("No valid selection"),
            Self::NotEnoughWords => f.write_str("Not enough words available"),
        }
    }
}
