//! Corpus mining pipeline
//!
//! One coordinating task streams the dataset files in order and owns the dedup set of
//! candidate ids and the report. Candidate validations run on the blocking pool, at most `workers` at a time, and
//! their verdicts are consumed in encounter order so a run is reproducible.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use chess_puzzler::skill_stack::ValidationOutcome;
use chess_puzzler::{Puzzle, SkillStackResult, SkillStackValidator};
use futures::stream::{FuturesOrdered, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::MinerConfig;
use crate::dataset::{self, DatasetReader};
use crate::error::MinerError;

/// Ordered theme combination: `theme1` is supposed to enable `theme2`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThemePair {
    pub theme1: String,
    pub theme2: String,
}

impl ThemePair {
    pub fn new(theme1: impl Into<String>, theme2: impl Into<String>) -> Self {
        Self {
            theme1: theme1.into(),
            theme2: theme2.into(),
        }
    }
}

impl fmt::Display for ThemePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.theme1, self.theme2)
    }
}

/// A candidate together with its verdict
#[derive(Debug, Clone, Serialize)]
pub struct MinedExample {
    pub puzzle: Puzzle,
    pub result: SkillStackResult,
}

/// Per-combination outcome of a mining run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MiningReport {
    pub combination: ThemePair,
    /// Candidates (both tags present) whose verdict was consumed
    pub candidates_examined: usize,
    pub valid_examples: Vec<MinedExample>,
    /// Generic verdicts held back for manual curation
    pub needs_review: Vec<MinedExample>,
    pub records_read: usize,
    pub records_skipped: usize,
    /// Candidates already seen earlier in the run
    pub duplicates_skipped: usize,
    pub walks_halted: usize,
    /// Ids of puzzles whose solution could not be replayed
    pub halted_ids: Vec<String>,
    pub reasoning: String,
}

impl MiningReport {
    fn new(combination: ThemePair) -> Self {
        Self {
            combination,
            candidates_examined: 0,
            valid_examples: Vec::new(),
            needs_review: Vec::new(),
            records_read: 0,
            records_skipped: 0,
            duplicates_skipped: 0,
            walks_halted: 0,
            halted_ids: Vec::new(),
            reasoning: String::new(),
        }
    }

    pub fn valid_count(&self) -> usize {
        self.valid_examples.len()
    }

    pub fn example_ids(&self) -> Vec<&str> {
        self.valid_examples
            .iter()
            .map(|e| e.puzzle.id.as_str())
            .collect()
    }

    fn finish(mut self) -> Self {
        let pair = &self.combination;
        self.reasoning = if self.candidates_examined == 0 {
            format!("no candidates: no puzzle carries both {} and {}", pair.theme1, pair.theme2)
        } else if self.valid_examples.is_empty() {
            format!(
                "{} candidates examined, none valid (tags co-occur without a causal link)",
                self.candidates_examined
            )
        } else {
            format!(
                "{} valid out of {} candidates examined",
                self.valid_examples.len(),
                self.candidates_examined
            )
        };
        self
    }
}

/// Knobs for a mining run
#[derive(Debug, Clone)]
pub struct MiningOptions {
    pub workers: usize,
    pub dataset_glob: String,
    pub allow_generic: bool,
}

impl Default for MiningOptions {
    fn default() -> Self {
        Self {
            workers: num_cpus::get(),
            dataset_glob: "**/*.csv".to_string(),
            allow_generic: false,
        }
    }
}

impl From<&MinerConfig> for MiningOptions {
    fn from(config: &MinerConfig) -> Self {
        Self {
            workers: config.workers,
            dataset_glob: config.dataset_glob.clone(),
            allow_generic: config.allow_generic,
        }
    }
}

type Pending = JoinHandle<(Puzzle, ValidationOutcome)>;

pub struct Miner {
    validator: Arc<SkillStackValidator>,
    options: MiningOptions,
}

impl Miner {
    pub fn new(options: MiningOptions) -> Self {
        Self::with_validator(SkillStackValidator::default(), options)
    }

    pub fn with_validator(validator: SkillStackValidator, options: MiningOptions) -> Self {
        Self {
            validator: Arc::new(validator),
            options,
        }
    }

    /// Collect up to `sample_size` valid examples of `pair` from the datasets under `roots`
    pub async fn mine(
        &self,
        pair: &ThemePair,
        sample_size: usize,
        roots: &[PathBuf],
    ) -> Result<MiningReport, MinerError> {
        let files = dataset::discover(roots, &self.options.dataset_glob)?;
        let workers = self.options.workers.max(1);

        let mut report = MiningReport::new(pair.clone());
        let mut seen: HashSet<String> = HashSet::new();
        let mut pending: FuturesOrdered<Pending> = FuturesOrdered::new();
        let mut done = sample_size == 0;

        for path in &files {
            if done {
                break;
            }

            let mut reader = DatasetReader::open(path).await?;
            while let Some(puzzle) = reader.next_puzzle().await? {
                // Only candidate ids are remembered
                if !puzzle.has_themes(&pair.theme1, &pair.theme2) {
                    continue;
                }
                if !seen.insert(puzzle.id.clone()) {
                    report.duplicates_skipped += 1;
                    continue;
                }

                pending.push_back(self.spawn_validation(puzzle, pair));
                if pending.len() >= workers {
                    if let Some(joined) = pending.next().await {
                        let (puzzle, outcome) = joined?;
                        done = self.consume(&mut report, puzzle, outcome, sample_size);
                    }
                }
                if done {
                    break;
                }
            }

            let stats = reader.stats();
            report.records_read += stats.records_read;
            report.records_skipped += stats.records_skipped;
            debug!(
                path = %reader.path().display(),
                records = stats.records_read,
                skipped = stats.records_skipped,
                "dataset file scanned"
            );
        }

        while !done {
            let Some(joined) = pending.next().await else {
                break;
            };
            let (puzzle, outcome) = joined?;
            done = self.consume(&mut report, puzzle, outcome, sample_size);
        }

        let report = report.finish();
        info!(
            combination = %pair,
            candidates = report.candidates_examined,
            valid = report.valid_count(),
            review = report.needs_review.len(),
            halted = report.walks_halted,
            "combination mined"
        );
        Ok(report)
    }

    fn spawn_validation(&self, puzzle: Puzzle, pair: &ThemePair) -> Pending {
        let validator = Arc::clone(&self.validator);
        let pair = pair.clone();
        tokio::task::spawn_blocking(move || {
            let outcome = validator.validate_puzzle_outcome(&puzzle, &pair.theme1, &pair.theme2);
            (puzzle, outcome)
        })
    }

    /// Fold one verdict into the report. Returns true once the sample is complete.
    fn consume(
        &self,
        report: &mut MiningReport,
        puzzle: Puzzle,
        outcome: ValidationOutcome,
        sample_size: usize,
    ) -> bool {
        report.candidates_examined += 1;

        if let Some(halt) = &outcome.halt {
            warn!(puzzle_id = %puzzle.id, error = %halt, "solution could not be replayed");
            report.walks_halted += 1;
            report.halted_ids.push(puzzle.id.clone());
        }

        let result = outcome.result;
        let example = MinedExample { puzzle, result };
        if !example.result.valid {
            return false;
        }

        if example.result.is_generic() && !self.options.allow_generic {
            debug!(puzzle_id = %example.puzzle.id, "generic verdict queued for review");
            if report.needs_review.len() < sample_size {
                report.needs_review.push(example);
            }
            return false;
        }

        report.valid_examples.push(example);
        report.valid_examples.len() >= sample_size
    }
}

/// Mine one combination with default options
pub async fn find_valid_examples(
    pair: &ThemePair,
    sample_size: usize,
    dataset_roots: &[PathBuf],
) -> Result<MiningReport, MinerError> {
    Miner::new(MiningOptions::default())
        .mine(pair, sample_size, dataset_roots)
        .await
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;

    const FORK_MATE: &str = "6k1/5ppp/8/3N4/8/8/2r2PPP/3R2K1 b - - 0 1,c2c6 d5e7 g8h8 d1d8";
    const QUIET_MATE: &str = "5k2/8/8/8/8/8/1R6/R3K3 b - - 0 1,f8g8 b2b7 g8h8 a1a8";
    const BROKEN: &str = "6k1/5ppp/8/3N4/8/8/2r2PPP/3R2K1 b - - 0 1,c2c6 d5e5 g8h8 d1d8";

    fn row(id: &str, body: &str, themes: &str) -> String {
        format!("{id},{body},1500,{themes},https://lichess.org/{id}\n")
    }

    fn write(dir: &Path, name: &str, rows: &[String]) {
        fs::write(dir.join(name), rows.concat()).unwrap();
    }

    fn options(workers: usize) -> MiningOptions {
        MiningOptions {
            workers,
            ..MiningOptions::default()
        }
    }

    #[tokio::test]
    async fn test_mine_filters_dedups_and_counts() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "fork.csv",
            &[
                row("f1", FORK_MATE, "fork mate mateIn2"),
                row("q1", QUIET_MATE, "fork mate mateIn2"),
                row("x1", BROKEN, "fork mate"),
                "garbage line\n".to_string(),
            ],
        );
        write(
            dir.path(),
            "mate.csv",
            &[
                row("f1", FORK_MATE, "fork mate mateIn2"),
                row("f2", FORK_MATE, "fork mate mateIn2"),
                row("m1", QUIET_MATE, "mate mateIn2"),
            ],
        );

        let miner = Miner::new(options(2));
        let report = miner
            .mine(&ThemePair::new("fork", "mate"), 5, &[dir.path().to_path_buf()])
            .await
            .unwrap();

        assert_eq!(report.example_ids(), vec!["f1", "f2"]);
        assert_eq!(report.candidates_examined, 4);
        assert_eq!(report.duplicates_skipped, 1);
        assert_eq!(report.records_skipped, 1);
        assert_eq!(report.records_read, 6);
        assert_eq!(report.walks_halted, 1);
        assert_eq!(report.halted_ids, vec!["x1"]);
    }

    #[tokio::test]
    async fn test_mine_stops_at_sample_size() {
        let dir = tempfile::tempdir().unwrap();
        let rows: Vec<String> = (0..10)
            .map(|i| row(&format!("p{i}"), FORK_MATE, "fork mate"))
            .collect();
        write(dir.path(), "fork.csv", &rows);

        let report = Miner::new(options(4))
            .mine(&ThemePair::new("fork", "mate"), 3, &[dir.path().to_path_buf()])
            .await
            .unwrap();
        assert_eq!(report.example_ids(), vec!["p0", "p1", "p2"]);
        assert_eq!(report.candidates_examined, 3);
    }

    #[tokio::test]
    async fn test_no_candidates_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "mate.csv", &[row("m1", QUIET_MATE, "mate mateIn2")]);

        let report = find_valid_examples(
            &ThemePair::new("pin", "fork"),
            5,
            &[dir.path().to_path_buf()],
        )
        .await
        .unwrap();
        assert_eq!(report.candidates_examined, 0);
        assert!(report.valid_examples.is_empty());
        assert!(report.reasoning.starts_with("no candidates"));
    }

    #[tokio::test]
    async fn test_none_valid_differs_from_no_candidates() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "mate.csv", &[row("q1", QUIET_MATE, "fork mateIn2")]);

        let report = find_valid_examples(
            &ThemePair::new("fork", "mateIn2"),
            5,
            &[dir.path().to_path_buf()],
        )
        .await
        .unwrap();
        assert_eq!(report.candidates_examined, 1);
        assert!(report.valid_examples.is_empty());
        assert!(report.reasoning.contains("none valid"));
    }

    #[tokio::test]
    async fn test_generic_verdicts_go_to_review() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "fork.csv", &[row("g1", FORK_MATE, "fork skewer")]);
        let pair = ThemePair::new("fork", "skewer");
        let roots = [dir.path().to_path_buf()];

        let strict = Miner::new(options(1)).mine(&pair, 5, &roots).await.unwrap();
        assert!(strict.valid_examples.is_empty());
        assert_eq!(strict.needs_review.len(), 1);

        let permissive = Miner::new(MiningOptions {
            allow_generic: true,
            ..options(1)
        })
        .mine(&pair, 5, &roots)
        .await
        .unwrap();
        assert_eq!(permissive.example_ids(), vec!["g1"]);
    }

    #[tokio::test]
    async fn test_halted_generic_verdict_is_not_mined() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "fork.csv",
            &[
                row("b1", BROKEN, "fork skewer"),
                row("g1", FORK_MATE, "fork skewer"),
            ],
        );

        let report = Miner::new(MiningOptions {
            allow_generic: true,
            ..options(2)
        })
        .mine(&ThemePair::new("fork", "skewer"), 5, &[dir.path().to_path_buf()])
        .await
        .unwrap();

        assert_eq!(report.example_ids(), vec!["g1"]);
        assert!(report.needs_review.is_empty());
        assert_eq!(report.walks_halted, 1);
        assert_eq!(report.halted_ids, vec!["b1"]);
    }

    #[tokio::test]
    async fn test_only_candidates_are_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        let rows = [
            row("m1", QUIET_MATE, "mate mateIn2"),
            row("f1", FORK_MATE, "fork mate"),
        ];
        write(dir.path(), "a.csv", &rows);
        write(dir.path(), "b.csv", &rows);

        let report = find_valid_examples(
            &ThemePair::new("fork", "mate"),
            5,
            &[dir.path().to_path_buf()],
        )
        .await
        .unwrap();

        assert_eq!(report.records_read, 4);
        assert_eq!(report.duplicates_skipped, 1);
        assert_eq!(report.candidates_examined, 1);
        assert_eq!(report.example_ids(), vec!["f1"]);
    }

    #[tokio::test]
    async fn test_missing_root_fails_run() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let err = find_valid_examples(&ThemePair::new("pin", "fork"), 5, &[missing])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("missing"));
    }
}
