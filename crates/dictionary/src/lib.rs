use std::fmt;

use entries_api::get_definition;

mod entries_api;
mod entry;

pub use entry::{Definition, License, Meaning, Phonetic, Word};

#[derive(Debug)]
pub enum DictionaryError {
    Fetch(reqwest::Error),
    Deserialize(reqwest::Error),
    NotFound(NotFoundError),
}

impl fmt::Display for DictionaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(error) => write!(f, "failed to reach the dictionary service: {error}"),
            Self::Deserialize(error) => {
                write!(f, "failed to read the dictionary response: {error}")
            }
            Self::NotFound(error) => write!(f, "{}", error.message),
        }
    }
}

impl std::error::Error for DictionaryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Fetch(error) | Self::Deserialize(error) => Some(error),
            Self::NotFound(_) => None,
        }
    }
}

#[derive(Debug)]
pub struct NotFoundError {
    message: String,
}

pub struct Dictionary {
    client: reqwest::Client,
}

impl Dictionary {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    pub async fn get_definition(&self, word: &str) -> Result<Word, DictionaryError> {
        get_definition(&self.client, word).await
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}
