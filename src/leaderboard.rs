use crate::round::GameMode;
use chrono::{Local, NaiveDateTime};
use itertools::Itertools;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Format of the timestamp column
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";
/// How many ranked entries are shown or exported
pub const TOP_N: usize = 10;

const DELIMITER: u8 = b'|';
const BANNER: &str = "========================================";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRecord {
    pub name: String,
    pub score: u32,
    pub mode: GameMode,
    pub timestamp: String,
}

impl ScoreRecord {
    /// New record stamped with the current local time
    pub fn new(name: impl Into<String>, score: u32, mode: GameMode) -> Self {
        Self {
            name: name.into(),
            score,
            mode,
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    pub fn recorded_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LeaderboardError {
    #[error("could not open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Append-only `name|score|mode|timestamp` file
#[derive(Debug, Clone)]
pub struct LeaderboardStore {
    path: PathBuf,
}

impl LeaderboardStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&self, record: &ScoreRecord) -> Result<(), LeaderboardError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| LeaderboardError::Open {
                path: self.path.clone(),
                source,
            })?;

        // Fields holding the delimiter or quotes get quoted
        let mut wtr = csv::WriterBuilder::new()
            .delimiter(DELIMITER)
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(file);

        let name = record.name.replace(['\r', '\n'], " ");
        let score = record.score.to_string();
        let mode = record.mode.to_string();
        wtr.write_record([
            name.as_str(),
            score.as_str(),
            mode.as_str(),
            record.timestamp.as_str(),
        ])
        .map_err(|source| LeaderboardError::Write {
            path: self.path.clone(),
            source,
        })?;
        wtr.flush()?;

        tracing::info!(name = %record.name, score = record.score, "score saved");
        Ok(())
    }

    /// Every record in append order. A missing file means no scores yet.
    /// Lines are parsed one at a time so a damaged line only costs itself.
    pub fn read_all(&self) -> Vec<ScoreRecord> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "could not read leaderboard");
                return Vec::new();
            }
        };

        String::from_utf8_lossy(&bytes)
            .lines()
            .filter_map(parse_line)
            .collect()
    }

    /// Write a ranked snapshot of the top entries, replacing `dest` if present
    pub fn export<P: AsRef<Path>>(
        records: &[ScoreRecord],
        dest: P,
    ) -> Result<(), LeaderboardError> {
        let dest = dest.as_ref();
        let file = File::create(dest).map_err(|source| LeaderboardError::Open {
            path: dest.to_path_buf(),
            source,
        })?;
        let mut out = BufWriter::new(file);

        writeln!(out, "{BANNER}")?;
        writeln!(out, "{:^40}", "HANGR LEADERBOARD")?;
        writeln!(out, "{BANNER}")?;
        writeln!(out, "Generated: {}", Local::now().format(TIMESTAMP_FORMAT))?;
        writeln!(out)?;

        let top = top(records);
        if top.is_empty() {
            writeln!(out, "No scores recorded yet.")?;
        }
        for (i, record) in top.iter().enumerate() {
            writeln!(out, "{}", format_line(i + 1, record))?;
        }

        writeln!(out)?;
        writeln!(out, "{BANNER}")?;
        writeln!(out, "{:^40}", "Thanks for playing!")?;
        writeln!(out, "{BANNER}")?;
        out.flush()?;

        tracing::info!(path = %dest.display(), entries = top.len(), "leaderboard exported");
        Ok(())
    }
}

/// Split one line into its four fields. Quoted fields are honoured; a line
/// whose quoting is broken is split on the bare delimiter instead.
fn split_fields(line: &str) -> Option<Vec<String>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_reader(line.as_bytes());

    let quoted = rdr
        .records()
        .next()
        .and_then(Result::ok)
        .map(|row| row.iter().map(str::to_string).collect::<Vec<_>>());
    match quoted {
        Some(fields) if fields.len() == 4 => Some(fields),
        _ => {
            let fields: Vec<String> = line.split(DELIMITER as char).map(str::to_string).collect();
            (fields.len() == 4).then_some(fields)
        }
    }
}

fn parse_line(line: &str) -> Option<ScoreRecord> {
    if line.trim().is_empty() {
        return None;
    }
    let Some(fields) = split_fields(line) else {
        tracing::debug!(%line, "skipping malformed leaderboard line");
        return None;
    };

    let mode = match fields[2].parse::<GameMode>() {
        Ok(mode) => mode,
        Err(e) => {
            tracing::warn!("skipping leaderboard line: {e}");
            return None;
        }
    };

    let mut fields = fields.into_iter();
    let name = fields.next().unwrap_or_default();
    let score = fields.next().and_then(|s| s.trim().parse().ok()).unwrap_or(0);
    let timestamp = fields.nth(1).unwrap_or_default();
    Some(ScoreRecord {
        name,
        score,
        mode,
        timestamp,
    })
}

/// Highest score first, ties by name
pub fn rank(records: &[ScoreRecord]) -> Vec<ScoreRecord> {
    records
        .iter()
        .cloned()
        .sorted_by(|a, b| b.score.cmp(&a.score).then_with(|| a.name.cmp(&b.name)))
        .collect()
}

pub fn top(records: &[ScoreRecord]) -> Vec<ScoreRecord> {
    rank(records).into_iter().take(TOP_N).collect()
}

/// One ranked line as printed by `scores` and written by export
pub fn format_line(position: usize, record: &ScoreRecord) -> String {
    format!(
        "{:>2}. {:<16} {:>5}  {:<7}  {}",
        position,
        record.name,
        record.score,
        record.mode.to_string(),
        record.timestamp
    )
}
