use serde::Deserialize;

/// A single dictionary entry as served by the entries endpoint.
///
/// Field order inside the vectors follows the upstream payload and must be
/// preserved by consumers that render them.
#[derive(Debug, Clone, Deserialize)]
pub struct Word {
    pub word: String,
    #[serde(default)]
    pub phonetics: Vec<Phonetic>,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
    #[serde(default, rename = "sourceUrls")]
    pub source_urls: Vec<String>,
    #[serde(default)]
    pub license: Option<License>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Phonetic {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub audio: Option<String>,
}

/// One part-of-speech section of an entry.
///
/// The part of speech stays a plain string; the service occasionally serves
/// values outside the classic eight and those must not fail deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct Meaning {
    #[serde(rename = "partOfSpeech")]
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<Definition>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Definition {
    pub definition: String,
    #[serde(default)]
    pub example: Option<String>,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct License {
    pub name: String,
    pub url: String,
}
