//! Dataset discovery and line-by-line record streaming

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chess_puzzler::puzzle::record::{parse_record, Record};
use chess_puzzler::Puzzle;
use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};
use tracing::{debug, warn};

use crate::error::MinerError;

/// Expand dataset roots into the files to scan, in a stable order.
///
/// Files are taken as given; directories are expanded with `pattern` and sorted.
/// A root that does not exist fails the whole run.
pub fn discover(roots: &[PathBuf], pattern: &str) -> Result<Vec<PathBuf>, MinerError> {
    for root in roots {
        if !root.exists() {
            return Err(MinerError::MissingDatasetRoot(root.clone()));
        }
    }

    let mut seen = HashSet::new();
    let mut files = Vec::new();

    for root in roots {
        let mut found = if root.is_dir() {
            expand(root, pattern)?
        } else {
            vec![root.clone()]
        };
        found.sort();

        for path in found {
            if seen.insert(path.clone()) {
                files.push(path);
            }
        }
    }

    debug!(count = files.len(), "dataset files discovered");
    Ok(files)
}

fn expand(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, MinerError> {
    let full = dir.join(pattern);
    let mut files = Vec::new();
    for entry in glob::glob(&full.to_string_lossy())? {
        let path = entry.map_err(|e| MinerError::Io(e.into()))?;
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

/// Read counters for one stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamStats {
    /// Records parsed into puzzles
    pub records_read: usize,
    /// Records dropped because they did not parse
    pub records_skipped: usize,
}

/// Streams puzzles out of one dataset file without loading it whole
pub struct DatasetReader {
    path: PathBuf,
    lines: Lines<BufReader<File>>,
    line_no: usize,
    stats: StreamStats,
}

impl DatasetReader {
    pub async fn open(path: &Path) -> Result<Self, MinerError> {
        let file = File::open(path).await?;
        Ok(Self {
            path: path.to_path_buf(),
            lines: BufReader::new(file).lines(),
            line_no: 0,
            stats: StreamStats::default(),
        })
    }

    /// Next puzzle in the file. Malformed records are counted and skipped.
    pub async fn next_puzzle(&mut self) -> Result<Option<Puzzle>, MinerError> {
        while let Some(line) = self.lines.next_line().await? {
            self.line_no += 1;
            match parse_record(&line, self.line_no) {
                Ok(Record::Puzzle(puzzle)) => {
                    self.stats.records_read += 1;
                    return Ok(Some(puzzle));
                }
                Ok(Record::Skip) => {}
                Err(e) => {
                    self.stats.records_skipped += 1;
                    warn!(path = %self.path.display(), error = %e, "skipping dataset record");
                }
            }
        }
        Ok(None)
    }

    pub fn stats(&self) -> StreamStats {
        self.stats
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
