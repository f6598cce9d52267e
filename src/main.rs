use anyhow::{bail, Context, Result};
use cbb_stats::clean::RangeTable;
use cbb_stats::config::Config;
use cbb_stats::engine::four_factors::{self, Baseline, TeamFactors};
use cbb_stats::engine::matchup::{self, Location, TeamProfile};
use cbb_stats::engine::TeamDirectory;
use std::io::{BufRead, Read, Write};
use std::path::{Path, PathBuf};

const USAGE: &str = "\
usage:
  cbb-stats clean --stat <name> [--config <path>]    raw cells on stdin, one per line
  cbb-stats score [--baseline <path>] [--ranked] [--config <path>]
                                                     JSON team rows on stdin
  cbb-stats teams [--config <path>]                  team names on stdin, one per line
  cbb-stats matchup [--location neutral|team-a|team-b]
                                                     JSON array of two team profiles on stdin";

#[derive(Debug, Default)]
struct Args {
    command: String,
    stat: Option<String>,
    config: Option<PathBuf>,
    baseline: Option<PathBuf>,
    ranked: bool,
    location: Location,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let mut parsed = Args {
        command: args.next().context("missing command")?,
        ..Args::default()
    };
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--stat" => parsed.stat = Some(args.next().context("--stat needs a value")?),
            "--config" => {
                parsed.config = Some(args.next().context("--config needs a path")?.into())
            }
            "--baseline" => {
                parsed.baseline = Some(args.next().context("--baseline needs a path")?.into())
            }
            "--ranked" => parsed.ranked = true,
            "--location" => {
                parsed.location = args.next().context("--location needs a value")?.parse()?
            }
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(parsed)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cbb_stats=warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        eprintln!("{USAGE}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = parse_args(std::env::args().skip(1))?;
    let config = Config::load_or_default(args.config.as_deref())?;

    match args.command.as_str() {
        "clean" => {
            let stat = args.stat.as_deref().context("clean needs --stat <name>")?;
            clean_cells(&config, stat)
        }
        "score" => score_teams(&config, args.baseline.as_deref(), args.ranked),
        "teams" => resolve_teams(&config),
        "matchup" => compare_teams(args.location),
        other => bail!("unknown command: {other}"),
    }
}

fn clean_cells(config: &Config, stat: &str) -> Result<()> {
    let table = RangeTable::from_config(&config.normalizer);
    if table.policy_for(stat).is_none() {
        tracing::warn!(stat, "no range policy for statistic, cells pass through unchanged");
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        let raw = line.trim_end_matches('\r');
        writeln!(out, "{}", table.clean(stat, raw))?;
    }
    Ok(())
}

fn read_rows(reader: impl Read, what: &str) -> Result<Vec<TeamFactors>> {
    serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse {what} as JSON team rows"))
}

fn score_teams(config: &Config, baseline_path: Option<&Path>, ranked: bool) -> Result<()> {
    let teams = read_rows(std::io::stdin().lock(), "stdin")?;

    let baseline = match baseline_path {
        Some(path) => {
            let file = std::fs::File::open(path)
                .with_context(|| format!("Failed to open baseline file: {}", path.display()))?;
            let rows = read_rows(std::io::BufReader::new(file), &path.display().to_string())?;
            let margins: Vec<_> = rows.iter().map(|r| r.factors.margins()).collect();
            let baseline = Baseline::from_population(&margins)
                .with_context(|| format!("baseline {} needs at least two teams", path.display()))?;
            Some(baseline)
        }
        None => None,
    };

    let mut scores = four_factors::score_population(&teams, baseline.as_ref(), &config.four_factor);
    if ranked {
        four_factors::rank(&mut scores);
    }
    if let Some(summary) = four_factors::summarize(&scores) {
        tracing::info!(
            teams = scores.len(),
            mean = summary.mean_score,
            best = %summary.best,
            worst = %summary.worst,
            "scored population"
        );
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &scores).context("Failed to write scores")?;
    writeln!(out)?;
    Ok(())
}

fn resolve_teams(config: &Config) -> Result<()> {
    let directory = TeamDirectory::from_entries(&config.teams);
    tracing::debug!(names = directory.len(), "team directory loaded");

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        writeln!(out, "{}", directory.resolve(line.trim()))?;
    }
    Ok(())
}

fn compare_teams(location: Location) -> Result<()> {
    let profiles: Vec<TeamProfile> = serde_json::from_reader(std::io::stdin().lock())
        .context("Failed to parse stdin as JSON team profiles")?;
    let [a, b] = profiles.as_slice() else {
        bail!("matchup needs exactly two team profiles, got {}", profiles.len());
    };

    let result = matchup::compare(a, b, location);
    if let Some(team) = result.favored() {
        tracing::info!(team, margin = result.adj_em_diff, "favored");
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, &result).context("Failed to write matchup")?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<Args> {
        parse_args(list.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_parse_clean_args() {
        let parsed = args(&["clean", "--stat", "ORtg", "--config", "cbb.toml"]).unwrap();
        assert_eq!(parsed.command, "clean");
        assert_eq!(parsed.stat.as_deref(), Some("ORtg"));
        assert_eq!(parsed.config, Some(PathBuf::from("cbb.toml")));
        assert!(!parsed.ranked);
    }

    #[test]
    fn test_parse_score_args() {
        let parsed = args(&["score", "--ranked", "--baseline", "champions.json"]).unwrap();
        assert!(parsed.ranked);
        assert_eq!(parsed.baseline, Some(PathBuf::from("champions.json")));
    }

    #[test]
    fn test_parse_matchup_args() {
        let parsed = args(&["matchup", "--location", "team-b"]).unwrap();
        assert_eq!(parsed.command, "matchup");
        assert_eq!(parsed.location, Location::TeamB);
        assert_eq!(args(&["matchup"]).unwrap().location, Location::Neutral);
        assert!(args(&["matchup", "--location", "road"]).is_err());
        assert!(args(&["matchup", "--location"]).is_err());
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(args(&[]).is_err());
        assert!(args(&["clean", "--stat"]).is_err());
        assert!(args(&["clean", "--verbose"]).is_err());
    }
}
