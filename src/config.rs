use crate::clean::policy::{RangePolicy, StatFamily};
use crate::clean::value::{SplitPreference, MIN_LENGTH};
use crate::engine::four_factors::{FourFactorWeights, ScoreScale};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "config.toml";

/// Top-level configuration. Every section is optional; a missing file or
/// section means built-in defaults.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub normalizer: NormalizerConfig,
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub four_factor: FourFactorConfig,
    /// Canonical team names and the spellings other sources use for them.
    #[serde(default)]
    pub teams: Vec<TeamAlias>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct NormalizerConfig {
    #[serde(default = "default_min_length")]
    pub min_length: usize,
    #[serde(default)]
    pub preference: SplitPreference,
    /// Overrides for the built-in family policies.
    #[serde(default)]
    pub families: HashMap<StatFamily, RangePolicy>,
    /// Per-statistic policies, keyed by column name (case-insensitive).
    #[serde(default)]
    pub stats: HashMap<String, RangePolicy>,
}

fn default_min_length() -> usize {
    MIN_LENGTH
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            min_length: MIN_LENGTH,
            preference: SplitPreference::default(),
            families: HashMap::new(),
            stats: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TableConfig {
    /// Columns whose lowercase header contains any of these are never cleaned.
    #[serde(default = "default_skip_keywords")]
    pub skip_keywords: Vec<String>,
}

fn default_skip_keywords() -> Vec<String> {
    [
        "team name",
        "team_original",
        "team_kenpom",
        "record",
        "date",
        "timestamp",
        "conference",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            skip_keywords: default_skip_keywords(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct FourFactorConfig {
    #[serde(default)]
    pub weights: FourFactorWeights,
    /// Score of a team exactly at the baseline mean.
    #[serde(default = "default_center")]
    pub center: f64,
    /// Score points per unit of index (one weighted standard deviation).
    #[serde(default = "default_scale")]
    pub scale: f64,
}

fn default_center() -> f64 { 50.0 }
fn default_scale() -> f64 { 15.0 }

impl FourFactorConfig {
    pub fn score_scale(&self) -> ScoreScale {
        ScoreScale {
            center: self.center,
            scale: self.scale,
        }
    }
}

impl Default for FourFactorConfig {
    fn default() -> Self {
        Self {
            weights: FourFactorWeights::default(),
            center: default_center(),
            scale: default_scale(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct TeamAlias {
    pub canonical: String,
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).with_context(|| "Failed to parse config TOML")?;
        Ok(config)
    }

    /// Load `path` if given; otherwise `config.toml` in the working directory
    /// if it exists; otherwise defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let fallback = Path::new(DEFAULT_CONFIG_FILE);
                if fallback.exists() {
                    Self::load(fallback)
                } else {
                    tracing::debug!("no {} found, using built-in defaults", DEFAULT_CONFIG_FILE);
                    Ok(Self::default())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clean::policy::PlausibleRange;

    #[test]
    fn test_empty_config_is_default() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.normalizer.min_length, 4);
        assert_eq!(config.normalizer.preference, SplitPreference::RangeFirst);
        assert_eq!(config.four_factor.weights, FourFactorWeights::default());
        assert_eq!(config.four_factor.center, 50.0);
        assert_eq!(config.four_factor.scale, 15.0);
        assert!(config.table.skip_keywords.iter().any(|k| k == "record"));
        assert!(config.teams.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
            [normalizer]
            min_length = 5
            preference = "shortest-prefix"

            [normalizer.families.rating]
            ranges = [[80.0, 140.0]]

            [normalizer.stats."PTS/G"]
            percentage = false
            ranges = [[50, 100], [0, 50]]

            [table]
            skip_keywords = ["team name"]

            [four_factor]
            weights = { efg = 0.5, tov = 0.3 }
            scale = 10.0

            [[teams]]
            canonical = "Michigan St."
            aliases = ["Michigan State"]
        "#;
        let config = Config::parse(toml).unwrap();
        assert_eq!(config.normalizer.min_length, 5);
        assert_eq!(config.normalizer.preference, SplitPreference::ShortestPrefix);

        let rating = &config.normalizer.families[&StatFamily::Rating];
        assert!(!rating.percentage);
        assert_eq!(rating.ranges, vec![PlausibleRange::new(80.0, 140.0)]);

        let pts = &config.normalizer.stats["PTS/G"];
        assert_eq!(
            pts.ranges,
            vec![PlausibleRange::new(50.0, 100.0), PlausibleRange::new(0.0, 50.0)]
        );

        assert_eq!(config.table.skip_keywords, vec!["team name".to_string()]);
        assert_eq!(config.four_factor.weights.efg, 0.5);
        assert_eq!(config.four_factor.weights.reb, 0.1432);
        assert_eq!(config.four_factor.center, 50.0);
        assert_eq!(config.four_factor.scale, 10.0);
        assert_eq!(
            config.teams,
            vec![TeamAlias {
                canonical: "Michigan St.".to_string(),
                aliases: vec!["Michigan State".to_string()],
            }]
        );
    }

    #[test]
    fn test_bad_toml_reports_context() {
        let err = Config::parse("[normalizer\nmin_length = 4").unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config TOML"));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = Config::load(Path::new("/nonexistent/cbb-stats.toml")).unwrap_err();
        assert!(format!("{err}").contains("/nonexistent/cbb-stats.toml"));
    }
}
