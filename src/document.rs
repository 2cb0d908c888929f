//! Verse document model shared by all search components.
//!
//! A corpus is an ordered sequence of [`Ayat`] records, either the verses of
//! one surah or the verses of all 114 surahs for a global search. Engines
//! only ever read these records; they never mutate them.

use serde::{Deserialize, Serialize};

/// A single verse with its transliteration, translation and commentary.
///
/// `id` is 1-based and contiguous within a surah. Across a multi-surah
/// corpus ids need not be dense, but must be unique within the set used to
/// build one engine instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ayat {
    /// Verse number within the surah.
    pub id: u32,
    /// Arabic text.
    pub arab: String,
    /// Latin transliteration.
    pub latin: String,
    /// Indonesian translation.
    pub terjemahan: String,
    /// Commentary. Optional in the remote payload; missing means empty.
    #[serde(default)]
    pub tafsir: String,
}

impl Ayat {
    /// Create a new verse record.
    pub fn new(
        id: u32,
        arab: impl Into<String>,
        latin: impl Into<String>,
        terjemahan: impl Into<String>,
        tafsir: impl Into<String>,
    ) -> Self {
        Self {
            id,
            arab: arab.into(),
            latin: latin.into(),
            terjemahan: terjemahan.into(),
            tafsir: tafsir.into(),
        }
    }

    /// All four text fields joined with single spaces, in field order.
    ///
    /// This is the text the vector store embeds for the verse.
    pub fn combined_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.arab, self.latin, self.terjemahan, self.tafsir
        )
    }
}

/// Display names of a surah as served by the remote API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurahName {
    /// Full Arabic name.
    pub long: String,
    /// Short Arabic name used in result listings.
    pub short: String,
    /// Indonesian transliteration.
    #[serde(default)]
    pub transliteration: String,
    /// Indonesian translation of the name.
    #[serde(default)]
    pub translation: String,
}

impl SurahName {
    /// Create a name record with only the short form populated.
    pub fn short_only(short: impl Into<String>) -> Self {
        let short = short.into();
        Self {
            long: short.clone(),
            short,
            transliteration: String::new(),
            translation: String::new(),
        }
    }
}

/// One fetched surah: its number, names and verses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurahData {
    /// Surah number, 1 through 114.
    pub number: u32,
    /// Surah names.
    pub name: SurahName,
    /// Verses in reading order.
    pub verses: Vec<Ayat>,
    /// Verse count as reported by the API.
    #[serde(default)]
    pub number_of_verses: usize,
}

impl SurahData {
    /// Create a surah from its number, short name and verses.
    pub fn new(number: u32, short_name: impl Into<String>, verses: Vec<Ayat>) -> Self {
        let number_of_verses = verses.len();
        Self {
            number,
            name: SurahName::short_only(short_name),
            verses,
            number_of_verses,
        }
    }
}
