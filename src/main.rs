use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use clap::Parser;
use person_factory::{Person, PersonFactory};
use std::path::PathBuf;

mod commands;
mod logger;

use commands::{Args, Commands};

fn build_factory(seed: Option<u64>) -> PersonFactory {
    match seed {
        Some(seed) => {
            tracing::debug!("Using seeded generator ({})", seed);
            PersonFactory::with_seed(seed)
        }
        None => PersonFactory::new(),
    }
}

fn print_people<'a>(people: impl IntoIterator<Item = &'a Person>) -> usize {
    let now = Utc::now();
    let mut printed = 0;

    println!("id,name,date_of_birth,age");
    for person in people {
        println!(
            "{},{},{},{}",
            person.id(),
            person.name(),
            person.date_of_birth().to_rfc3339_opts(SecondsFormat::Secs, true),
            person.age_in_years(now)
        );
        printed += 1;
    }

    printed
}

fn generate(seed: Option<u64>, count: i64) -> Result<()> {
    tracing::info!("Generating {} people", count);

    let start = std::time::Instant::now();
    let mut factory = build_factory(seed);
    let people = factory
        .generate(count)
        .context("Could not generate people")?;
    let printed = print_people(people);

    tracing::info!("{} people generated in {:?}", printed, start.elapsed());

    Ok(())
}

fn filter(seed: Option<u64>, count: i64, name: &str, threshold: u32, younger: bool) -> Result<()> {
    let mut factory = build_factory(seed);
    factory
        .generate(count)
        .context("Could not generate people")?;

    let matches = factory.filter_by_name_and_age(name, threshold, !younger);
    let printed = print_people(matches);

    tracing::info!(
        "{} of {} people named {} are {} than {} years",
        printed,
        factory.len(),
        name,
        if younger { "younger" } else { "older" },
        threshold
    );

    Ok(())
}

fn marry(seed: Option<u64>, name: &str, last_name: &str) -> Result<()> {
    let factory = build_factory(seed);
    let person = Person::with_default_age(name).context("Invalid person")?;
    let married = factory
        .format_married_name(Some(&person), last_name)
        .context("Could not format married name")?;

    println!("{}", married);

    Ok(())
}

/// Logs a `.env` that exists but could not be loaded. A missing file is fine,
/// settings fall back to flags and the process environment.
fn report_env_file(loaded: &dotenvy::Result<PathBuf>) -> bool {
    match loaded {
        Ok(path) => {
            tracing::debug!("Loaded environment from {}", path.display());
            false
        }
        Err(e) if e.not_found() => false,
        Err(e) => {
            tracing::warn!("Ignoring .env file: {}", e);
            true
        }
    }
}

fn main() -> Result<()> {
    // Loaded before parsing so PEOPLE_SEED and RUST_LOG can come from .env
    let env_file = dotenvy::dotenv();

    let cli = Args::parse();
    logger::init_cli_logger(cli.verbose);
    report_env_file(&env_file);

    match cli.command {
        Some(Commands::Generate { count }) => generate(cli.seed, count)?,
        Some(Commands::Filter {
            count,
            name,
            threshold,
            younger,
        }) => filter(cli.seed, count, &name, threshold, younger)?,
        Some(Commands::Marry { name, last_name }) => marry(cli.seed, &name, &last_name)?,
        None => {
            println!("Run with --help to see instructions");
        }
    }

    Ok(())
}
