//! Per-combination summary output

use std::fmt::Write as _;
use std::path::Path;

use crate::error::MinerError;
use crate::mining::MiningReport;

/// Render the summary table: one row per combination, then the accepted examples
pub fn summary_table(reports: &[MiningReport]) -> String {
    let mut out = String::new();
    let rule = "=".repeat(72);

    let _ = writeln!(out, "{rule}");
    let _ = writeln!(
        out,
        "{:<32} {:>10} {:>6} {:>7} {:>7}",
        "combination", "candidates", "valid", "review", "halted"
    );
    let _ = writeln!(out, "{rule}");
    for report in reports {
        let _ = writeln!(
            out,
            "{:<32} {:>10} {:>6} {:>7} {:>7}",
            report.combination.to_string(),
            report.candidates_examined,
            report.valid_count(),
            report.needs_review.len(),
            report.walks_halted
        );
    }

    for report in reports {
        let _ = writeln!(out, "\n{} ({})", report.combination, report.reasoning);
        for example in &report.valid_examples {
            let puzzle = &example.puzzle;
            let _ = writeln!(
                out,
                "  {} rating={} {}\n    {}",
                puzzle.id, puzzle.rating, puzzle.url, example.result.reasoning
            );
        }
        for example in &report.needs_review {
            let _ = writeln!(out, "  [review] {} {}", example.puzzle.id, example.puzzle.url);
        }
    }

    out
}

/// Write all reports as pretty JSON
pub fn write_json(path: &Path, reports: &[MiningReport]) -> Result<(), MinerError> {
    let json = serde_json::to_string_pretty(reports)?;
    std::fs::write(path, json)?;
    Ok(())
}
