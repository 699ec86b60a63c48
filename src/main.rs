use anyhow::{bail, Result};
use std::env;
use std::path::Path;
use tracing_subscriber::EnvFilter;

// Use library instead of local modules
use scoreboard::{load_events, replay, Scoreboard, ScoreboardConfig, SummaryEntry};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("replay") => run_replay(&args[2..])?,
        Some("demo") | None => run_demo()?,
        Some(other) => {
            eprintln!("❌ Unknown command: {}", other);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("   scoreboard demo");
    eprintln!("   scoreboard replay <events.csv> [--json] [--config <path>]");
}

fn run_demo() -> Result<()> {
    println!("⚽ Live Football World Cup Scoreboard v{}", scoreboard::VERSION);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let mut board = Scoreboard::new();
    let games = [
        ("Mexico", "Canada", 0, 5),
        ("Spain", "Brazil", 10, 2),
        ("Germany", "France", 2, 2),
        ("Uruguay", "Italy", 6, 6),
        ("Argentina", "Australia", 3, 1),
    ];

    for (home, away, home_score, away_score) in games {
        board.start_match(home, away)?;
        board.update_score(home, away, home_score, away_score)?;
    }

    println!("\n📊 Summary:");
    print_summary(&board.summary_entries());

    board.finish_match("uruguay", "ITALY")?;
    println!("\n🏁 Uruguay - Italy finished");
    print_summary(&board.summary_entries());

    Ok(())
}

fn run_replay(args: &[String]) -> Result<()> {
    let mut csv_path = None;
    let mut config_path = None;
    let mut json = false;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--config" => match iter.next() {
                Some(path) => config_path = Some(path.clone()),
                None => bail!("--config requires a path"),
            },
            path if csv_path.is_none() => csv_path = Some(path.to_string()),
            extra => bail!("Unexpected argument: {}", extra),
        }
    }

    let Some(csv_path) = csv_path else {
        print_usage();
        bail!("Missing event file");
    };

    let config = match config_path {
        Some(path) => ScoreboardConfig::from_file(&path)?,
        None => ScoreboardConfig::default(),
    };

    let events = load_events(Path::new(&csv_path))?;
    let mut board = Scoreboard::with_config(config);
    let report = replay(&mut board, &events);
    let entries = board.summary_entries();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        println!("📂 Replayed {} events from {}", events.len(), csv_path);
        println!("✓ Applied: {}", report.applied);
        println!("\n📊 Summary:");
        print_summary(&entries);
    }

    if !report.is_clean() {
        eprintln!("\n⚠️  Rejected events: {}", report.rejected.len());
        for rejected in &report.rejected {
            eprintln!("   #{} {}: {}", rejected.index + 1, rejected.event, rejected.error);
        }
    }

    Ok(())
}

fn print_summary(entries: &[SummaryEntry]) {
    if entries.is_empty() {
        println!("   (no matches in progress)");
        return;
    }

    for (rank, entry) in entries.iter().enumerate() {
        println!("   {}. {}", rank + 1, entry);
    }
}
