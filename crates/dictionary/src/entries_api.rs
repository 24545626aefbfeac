use serde::Deserialize;

use crate::entry::Word;
use crate::{DictionaryError, NotFoundError};

const ENTRIES_API_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// Body the service sends alongside a 404.
#[derive(Deserialize)]
struct NotFoundBody {
    title: String,
    message: String,
}

pub(crate) async fn get_definition(
    client: &reqwest::Client,
    word: &str,
) -> Result<Word, DictionaryError> {
    let res = client
        .get(format!("{ENTRIES_API_URL}/{word}"))
        .send()
        .await
        .map_err(DictionaryError::Fetch)?;
    if res.status() == reqwest::StatusCode::NOT_FOUND {
        let message = match res.json::<NotFoundBody>().await {
            Ok(body) => format!("{}: {}", body.title, body.message),
            Err(_) => format!("no definitions found for '{word}'"),
        };
        return Err(DictionaryError::NotFound(NotFoundError { message }));
    }
    let res = res.error_for_status().map_err(DictionaryError::Fetch)?;
    let entries = res
        .json::<Vec<Word>>()
        .await
        .map_err(DictionaryError::Deserialize)?;
    first_entry(entries, word)
}

/// The service answers with an array of homograph entries; only the first
/// one is shown. An empty array counts as not found, never as a success.
fn first_entry(mut entries: Vec<Word>, word: &str) -> Result<Word, DictionaryError> {
    if entries.is_empty() {
        return Err(DictionaryError::NotFound(NotFoundError {
            message: format!("the service returned no entries for '{word}'"),
        }));
    }
    Ok(entries.swap_remove(0))
}
