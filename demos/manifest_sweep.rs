//! Benchmark a sweep of matrix shapes listed in a CSV manifest.
//! Matrix content is synthesized from the configured seed, so only
//! shapes need to be supplied.

use svdbench::bench::{BenchError, BenchRunner, BenchSettingsBuilder, ParseMode};
use std::io::Write;

fn main() -> Result<(), BenchError> {
    // manifest path from the command line, or a small built-in sweep
    let path = match std::env::args().nth(1) {
        Some(arg) => arg.into(),
        None => {
            let path = std::env::temp_dir().join("svdbench_shapes.csv");
            std::fs::write(&path, "m,n\n50,50\n100,100\n200,100\n100,200\n")?;
            path
        }
    };

    let settings = BenchSettingsBuilder::default()
        .parse_mode(ParseMode::Lenient)
        .build()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

    let mut runner = BenchRunner::new(settings)?;
    let outcomes = runner.run_manifest(&path)?;

    let failures = outcomes.iter().filter(|o| !o.is_success()).count();
    println!("{} datasets, {} failed", outcomes.len(), failures);

    println!("stage times:");
    let mut stdout = std::io::stdout();
    runner.timers.write_report(&mut stdout)?;
    stdout.flush()?;

    if failures == 0 {
        Ok(())
    } else {
        std::process::exit(1);
    }
}
