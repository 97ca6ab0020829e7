//! JSONL persistence for `InputJournal`, chained with SHA-256.
//!
//! Line 1 is a header (`format_version`, `build_id`, `seed`, `config`). Every
//! following line is one input record carrying `prev_sha256_hex` and
//! `sha256_hex`, where each hash covers the record body plus the previous hash.
//! Records are flushed as they are appended, so a crashed run keeps every input
//! accepted before the crash. Loading stops at the first line that fails to
//! parse or breaks the chain.

use std::error::Error;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::config::SimConfig;
use crate::journal::{InputJournal, InputPayload, InputRecord, JOURNAL_FORMAT_VERSION};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
struct FileHeader {
    format_version: u16,
    build_id: String,
    seed: u64,
    config: SimConfig,
}

/// Canonical hash input for a record.
#[derive(Serialize)]
struct RecordBody<'a> {
    seq: u64,
    tick: u64,
    payload: &'a InputPayload,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
struct FileRecord {
    seq: u64,
    tick: u64,
    payload: InputPayload,
    prev_sha256_hex: String,
    sha256_hex: String,
}

const INITIAL_HASH: &str = "0000000000000000000000000000000000000000000000000000000000000000";

/// Tip of the hash chain: the last record's hash and the next sequence number.
/// The writer extends it and the loader replays it to verify each line.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Chain {
    last_sha256_hex: String,
    next_seq: u64,
}

impl Chain {
    fn start() -> Self {
        Self { last_sha256_hex: INITIAL_HASH.to_string(), next_seq: 0 }
    }

    /// Hash of the record that would come next with this tick and payload.
    fn next_hash(&self, tick: u64, payload: &InputPayload) -> serde_json::Result<String> {
        let body = RecordBody { seq: self.next_seq, tick, payload };
        let mut hasher = Sha256::new();
        hasher.update(serde_json::to_string(&body)?.as_bytes());
        hasher.update(self.last_sha256_hex.as_bytes());
        Ok(format!("{:064x}", hasher.finalize()))
    }

    fn extend(&mut self, sha256_hex: String) {
        self.last_sha256_hex = sha256_hex;
        self.next_seq += 1;
    }
}

pub struct JournalWriter {
    writer: BufWriter<File>,
    chain: Chain,
}

impl JournalWriter {
    /// Creates (or truncates) the file and writes the header line.
    pub fn create(
        path: &Path,
        seed: u64,
        config: &SimConfig,
        build_id: &str,
    ) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        let header = FileHeader {
            format_version: JOURNAL_FORMAT_VERSION,
            build_id: build_id.to_string(),
            seed,
            config: config.clone(),
        };
        write_line(&mut writer, &header)?;
        Ok(Self { writer, chain: Chain::start() })
    }

    /// Continues a file returned by `load_journal_from_file`.
    pub fn resume(path: &Path, loaded: &LoadedJournal) -> io::Result<Self> {
        let file = OpenOptions::new().append(true).open(path)?;
        let chain = Chain {
            last_sha256_hex: loaded.last_sha256_hex.clone(),
            next_seq: loaded.next_seq,
        };
        Ok(Self { writer: BufWriter::new(file), chain })
    }

    pub fn append(&mut self, tick: u64, payload: &InputPayload) -> io::Result<()> {
        let sha256_hex = self.chain.next_hash(tick, payload).map_err(io::Error::other)?;
        let record = FileRecord {
            seq: self.chain.next_seq,
            tick,
            payload: payload.clone(),
            prev_sha256_hex: self.chain.last_sha256_hex.clone(),
            sha256_hex: sha256_hex.clone(),
        };
        write_line(&mut self.writer, &record)?;
        self.chain.extend(sha256_hex);
        Ok(())
    }
}

// Flushed per line so a crash never loses an accepted input.
fn write_line<T: Serialize>(writer: &mut BufWriter<File>, value: &T) -> io::Result<()> {
    let json = serde_json::to_string(value).map_err(io::Error::other)?;
    writeln!(writer, "{json}")?;
    writer.flush()
}

#[derive(Debug)]
pub struct LoadedJournal {
    pub journal: InputJournal,
    /// Hash of the last valid record, or the all-zero hash for an empty journal.
    pub last_sha256_hex: String,
    pub next_seq: u64,
}

#[derive(Debug)]
pub enum JournalLoadError {
    Io(io::Error),
    EmptyFile,
    InvalidHeader { line: usize, message: String },
    InvalidRecord { line: usize, message: String },
    /// The file does not end with a newline.
    IncompleteLine { line: usize },
    HashChainBroken { line: usize },
}

impl fmt::Display for JournalLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "journal I/O error: {e}"),
            Self::EmptyFile => write!(f, "journal file is empty"),
            Self::InvalidHeader { line, message } => {
                write!(f, "invalid journal header at line {line}: {message}")
            }
            Self::InvalidRecord { line, message } => {
                write!(f, "invalid journal record at line {line}: {message}")
            }
            Self::IncompleteLine { line } => write!(f, "incomplete journal line at line {line}"),
            Self::HashChainBroken { line } => write!(f, "SHA-256 hash chain broken at line {line}"),
        }
    }
}

impl Error for JournalLoadError {}

pub fn load_journal_from_file(path: &Path) -> Result<LoadedJournal, JournalLoadError> {
    let content = fs::read_to_string(path).map_err(JournalLoadError::Io)?;
    let lines: Vec<&str> = content.lines().collect();
    if lines.is_empty() {
        return Err(JournalLoadError::EmptyFile);
    }
    if !content.ends_with('\n') {
        return Err(JournalLoadError::IncompleteLine { line: lines.len() });
    }

    let header: FileHeader = serde_json::from_str(lines[0])
        .map_err(|e| JournalLoadError::InvalidHeader { line: 1, message: e.to_string() })?;
    let mut journal = InputJournal {
        format_version: header.format_version,
        build_id: header.build_id,
        seed: header.seed,
        config: header.config,
        inputs: Vec::new(),
    };

    let mut chain = Chain::start();
    let mut last_tick = 0_u64;
    for (idx, line) in lines.iter().enumerate().skip(1) {
        let line_number = idx + 1;
        let invalid =
            |message: String| JournalLoadError::InvalidRecord { line: line_number, message };

        let record: FileRecord =
            serde_json::from_str(line).map_err(|e| invalid(e.to_string()))?;
        if record.seq != chain.next_seq {
            return Err(invalid(format!("expected seq {}, found {}", chain.next_seq, record.seq)));
        }
        if record.tick < last_tick {
            return Err(invalid(format!("tick {} precedes tick {last_tick}", record.tick)));
        }
        let expected = chain
            .next_hash(record.tick, &record.payload)
            .map_err(|e| invalid(e.to_string()))?;
        if record.prev_sha256_hex != chain.last_sha256_hex || record.sha256_hex != expected {
            return Err(JournalLoadError::HashChainBroken { line: line_number });
        }

        last_tick = record.tick;
        chain.extend(record.sha256_hex);
        journal.inputs.push(InputRecord {
            seq: record.seq,
            tick: record.tick,
            payload: record.payload,
        });
    }

    let Chain { last_sha256_hex, next_seq } = chain;
    Ok(LoadedJournal { journal, last_sha256_hex, next_seq })
}
