//! Headless Tetrion driver.
//!
//! Plays a seeded game with the built-in autoplayer and prints a summary, or
//! the final snapshot as JSON with `--json`. Game events are logged to stderr.

use anyhow::Result;

use tetrion::sim::{parse_sim_args, run_sim, USAGE};

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let opts = parse_sim_args(&args)?;
    if opts.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let report = run_sim(&opts)?;
    if opts.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let snapshot = &report.snapshot;
    print!("{}", snapshot.render_text());
    println!(
        "seed {}  pieces {}  score {}  level {}  lines {}  {}",
        report.seed,
        report.pieces_locked,
        snapshot.score,
        snapshot.level,
        snapshot.lines,
        if snapshot.over { "GAME OVER" } else { "stopped" }
    );
    Ok(())
}
