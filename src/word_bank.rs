use rand::{seq::SliceRandom, Rng};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// How hard a word is; drives the mistake budget and the base score
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Medium,
        Difficulty::Hard,
        Difficulty::Expert,
    ];
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "expert" => Ok(Difficulty::Expert),
            other => Err(format!("unknown difficulty '{other}'")),
        }
    }
}

/// Categories a player can pick from
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Pet,
    Place,
    Restaurant,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Pet, Category::Place, Category::Restaurant];
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pet" => Ok(Category::Pet),
            "place" => Ok(Category::Place),
            "restaurant" => Ok(Category::Restaurant),
            other => Err(format!("unknown category '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    pub category: String,
    pub word: String,
    pub difficulty: Difficulty,
}

#[derive(Debug, thiserror::Error)]
pub enum WordBankError {
    #[error("could not open word bank {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no words loaded from {0}")]
    Empty(String),
}

/// In-memory word list, loaded once and handed to whoever starts rounds
#[derive(Debug, Clone, Default)]
pub struct WordBank {
    entries: Vec<WordEntry>,
}

impl WordBank {
    pub fn new(entries: Vec<WordEntry>) -> Self {
        Self { entries }
    }

    /// Load a `category,word,difficulty` file. The first line is a header.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, WordBankError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| {
            tracing::error!(path = %path.display(), error = %source, "failed to open word bank");
            WordBankError::Open {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let bank = Self::from_reader(file);
        if bank.is_empty() {
            return Err(WordBankError::Empty(path.display().to_string()));
        }

        tracing::info!(path = %path.display(), words = bank.len(), "loaded word bank");
        Ok(bank)
    }

    /// Parse rows from any reader. Rows that end up without a word or with an
    /// unknown difficulty are skipped rather than failing the whole load.
    pub fn from_reader<R: Read>(reader: R) -> Self {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .quoting(false)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut entries = Vec::new();
        for (line, result) in rdr.records().enumerate() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(row = line + 1, error = %e, "skipping unreadable word bank row");
                    continue;
                }
            };

            let category = record.get(0).unwrap_or("").to_string();
            let word = record.get(1).unwrap_or("").replace('_', " ");
            let raw_difficulty = record.get(2).unwrap_or("");

            if word.is_empty() {
                continue;
            }

            match raw_difficulty.parse::<Difficulty>() {
                Ok(difficulty) => entries.push(WordEntry {
                    category,
                    word,
                    difficulty,
                }),
                Err(e) => {
                    tracing::warn!(row = line + 1, %word, "skipping row: {e}");
                }
            }
        }

        Self { entries }
    }

    pub fn entries(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries matching both category and difficulty, ignoring case
    pub fn filter(&self, category: Category, difficulty: Difficulty) -> Vec<&WordEntry> {
        let category = category.to_string();
        self.entries
            .iter()
            .filter(|e| e.category.eq_ignore_ascii_case(&category) && e.difficulty == difficulty)
            .collect()
    }

    pub fn choose<R: Rng + ?Sized>(
        &self,
        category: Category,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Option<&WordEntry> {
        self.filter(category, difficulty).choose(rng).copied()
    }
}
