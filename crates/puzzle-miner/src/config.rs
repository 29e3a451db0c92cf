//! Miner configuration from environment variables and CLI flags

use std::env;
use std::path::PathBuf;

use crate::error::MinerError;
use crate::mining::ThemePair;

/// Combinations mined when `--pairs` is not given
pub const DEFAULT_PAIRS: [(&str, &str); 6] = [
    ("fork", "mate"),
    ("pin", "mate"),
    ("discoveredAttack", "mate"),
    ("deflection", "mate"),
    ("pin", "fork"),
    ("deflection", "fork"),
];

#[derive(Clone, Debug)]
pub struct MinerConfig {
    /// Dataset files or directories to scan
    pub dataset_roots: Vec<PathBuf>,

    /// Valid examples to collect per combination
    pub sample_size: usize,

    /// Validations in flight at once
    pub workers: usize,

    /// Pattern used to expand directory roots
    pub dataset_glob: String,

    /// Count generic verdicts as valid examples instead of queueing them for review
    pub allow_generic: bool,

    /// Theme combinations to mine, in order
    pub pairs: Vec<ThemePair>,

    /// Also write the reports as JSON here
    pub json_output: Option<PathBuf>,
}

impl MinerConfig {
    /// Load configuration from the environment, with CLI flags taking precedence
    pub fn load() -> Result<Self, MinerError> {
        let args: Vec<String> = env::args().skip(1).collect();
        Self::from_sources(|key| env::var(key).ok(), &args)
    }

    pub fn from_sources(
        var: impl Fn(&str) -> Option<String>,
        args: &[String],
    ) -> Result<Self, MinerError> {
        let setting = |flag: &str, key: &str| flag_value(args, flag).or_else(|| var(key));

        let dataset_roots = setting("--roots", "DATASET_ROOTS")
            .map(|v| split_roots(&v))
            .unwrap_or_default();
        if dataset_roots.is_empty() {
            return Err(MinerError::Config("DATASET_ROOTS not set (or pass --roots)"));
        }

        let sample_size = match setting("--sample", "SAMPLE_SIZE") {
            Some(v) => v
                .trim()
                .parse()
                .map_err(|_| MinerError::Config("SAMPLE_SIZE must be a positive integer"))?,
            None => 5,
        };
        if sample_size == 0 {
            return Err(MinerError::Config("SAMPLE_SIZE must be a positive integer"));
        }

        let workers = setting("--workers", "MINER_WORKERS")
            .and_then(|v| v.trim().parse().ok())
            .filter(|n: &usize| *n > 0)
            .unwrap_or_else(num_cpus::get);

        let dataset_glob =
            setting("--glob", "DATASET_GLOB").unwrap_or_else(|| "**/*.csv".to_string());

        let allow_generic = has_flag(args, "--allow-generic")
            || var("ALLOW_GENERIC_VERDICTS").is_some_and(|v| is_truthy(&v));

        let pairs = match flag_value(args, "--pairs") {
            Some(v) => parse_pairs(&v)?,
            None => DEFAULT_PAIRS
                .iter()
                .map(|(a, b)| ThemePair::new(*a, *b))
                .collect(),
        };

        let json_output = flag_value(args, "--json").map(PathBuf::from);

        Ok(Self {
            dataset_roots,
            sample_size,
            workers,
            dataset_glob,
            allow_generic,
            pairs,
            json_output,
        })
    }
}

/// Value following `flag` in the argument list
fn flag_value(args: &[String], flag: &str) -> Option<String> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn split_roots(value: &str) -> Vec<PathBuf> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Parse `pin:fork,fork:mateIn2`
pub fn parse_pairs(value: &str) -> Result<Vec<ThemePair>, MinerError> {
    let pairs: Vec<ThemePair> = value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|pair| match pair.split_once(':') {
            Some((a, b)) if !a.trim().is_empty() && !b.trim().is_empty() => {
                Ok(ThemePair::new(a.trim(), b.trim()))
            }
            _ => Err(MinerError::Config("theme pairs look like pin:fork,fork:mate")),
        })
        .collect::<Result<_, _>>()?;

    if pairs.is_empty() {
        return Err(MinerError::Config("--pairs is empty"));
    }
    Ok(pairs)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn load(env: &[(&str, &str)], cli: &[&str]) -> Result<MinerConfig, MinerError> {
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        MinerConfig::from_sources(|key| env.get(key).cloned(), &args(cli))
    }

    #[test]
    fn test_env_defaults() {
        let config = load(&[("DATASET_ROOTS", "data/pins, data/forks")], &[]).unwrap();
        assert_eq!(
            config.dataset_roots,
            vec![PathBuf::from("data/pins"), PathBuf::from("data/forks")]
        );
        assert_eq!(config.sample_size, 5);
        assert!(config.workers > 0);
        assert_eq!(config.dataset_glob, "**/*.csv");
        assert!(!config.allow_generic);
        assert_eq!(config.pairs.len(), DEFAULT_PAIRS.len());
        assert!(config.json_output.is_none());
    }

    #[test]
    fn test_cli_overrides_env() {
        let config = load(
            &[("DATASET_ROOTS", "env-root"), ("SAMPLE_SIZE", "3")],
            &[
                "--roots",
                "cli-root",
                "--sample",
                "10",
                "--workers",
                "2",
                "--pairs",
                "pin:fork",
                "--allow-generic",
                "--json",
                "out.json",
            ],
        )
        .unwrap();
        assert_eq!(config.dataset_roots, vec![PathBuf::from("cli-root")]);
        assert_eq!(config.sample_size, 10);
        assert_eq!(config.workers, 2);
        assert_eq!(config.pairs, vec![ThemePair::new("pin", "fork")]);
        assert!(config.allow_generic);
        assert_eq!(config.json_output, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_allow_generic_from_env() {
        let config = load(
            &[("DATASET_ROOTS", "x"), ("ALLOW_GENERIC_VERDICTS", "true")],
            &[],
        )
        .unwrap();
        assert!(config.allow_generic);
    }

    #[test]
    fn test_missing_roots_and_bad_sample() {
        assert!(matches!(load(&[], &[]), Err(MinerError::Config(_))));
        assert!(matches!(
            load(&[("DATASET_ROOTS", "x"), ("SAMPLE_SIZE", "0")], &[]),
            Err(MinerError::Config(_))
        ));
        assert!(matches!(
            load(&[("DATASET_ROOTS", "x")], &["--sample", "lots"]),
            Err(MinerError::Config(_))
        ));
    }

    #[test]
    fn test_parse_pairs() {
        let pairs = parse_pairs("pin:fork, fork:mateIn2").unwrap();
        assert_eq!(
            pairs,
            vec![ThemePair::new("pin", "fork"), ThemePair::new("fork", "mateIn2")]
        );
        assert!(parse_pairs("pin").is_err());
        assert!(parse_pairs("pin:").is_err());
        assert!(parse_pairs(" , ").is_err());
    }
}
