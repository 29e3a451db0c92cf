//! Validate a single solution and print the verdict as JSON.
//!
//! Usage: verify-skill-stack <fen> <moves> <theme1> <theme2>
//! `moves` is the space-separated UCI solution, setup ply first.

use anyhow::bail;

use puzzle_miner::chess_puzzler::verify_skill_stack_sequence;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [fen, moves, theme1, theme2] = args.as_slice() else {
        bail!("usage: verify-skill-stack <fen> <moves> <theme1> <theme2>");
    };

    let result = verify_skill_stack_sequence(fen, moves, theme1, theme2);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
