use std::collections::HashSet;
use std::str::FromStr;

use unicode_segmentation::UnicodeSegmentation;

use crate::error::{Error, Result};

const MAX_LEN: usize = 256;

/// A guest's display name. Immutable once a response is stored.
#[derive(Debug, Clone)]
pub struct GuestName(String);

impl AsRef<str> for GuestName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for GuestName {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        lazy_static::lazy_static! {
            static ref INVALID_CHARS: HashSet<char> = vec!['/', '(', ')', '"', '<', '>', '\\', '{', '}']
                .into_iter()
                .collect();
        }

        let value = value.trim();

        if value.is_empty() {
            return Err(Error::ParsingError("Name cannot be empty".into()));
        }
        if value.graphemes(true).count() > MAX_LEN {
            return Err(Error::ParsingError("Name too long".into()));
        }
        if value.chars().any(|c| INVALID_CHARS.contains(&c)) {
            return Err(Error::ParsingError(
                "Name contains invalid characters".into(),
            ));
        }
        Ok(Self(value.to_string()))
    }
}
