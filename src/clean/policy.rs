use super::value::Normalizer;
use crate::config::NormalizerConfig;
use serde::Deserialize;
use std::borrow::Cow;
use std::collections::HashMap;

/// Inclusive `[low, high]` band a statistic is expected to fall in.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "[f64; 2]")]
pub struct PlausibleRange {
    pub low: f64,
    pub high: f64,
}

impl PlausibleRange {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.low && value <= self.high
    }
}

impl From<[f64; 2]> for PlausibleRange {
    fn from([low, high]: [f64; 2]) -> Self {
        Self::new(low, high)
    }
}

/// How a single statistic is cleaned: its ranges, in order of preference,
/// and whether it is percentage-valued.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RangePolicy {
    #[serde(default)]
    pub percentage: bool,
    pub ranges: Vec<PlausibleRange>,
}

impl RangePolicy {
    pub fn new(percentage: bool, ranges: Vec<PlausibleRange>) -> Self {
        Self { percentage, ranges }
    }

    pub fn apply<'a>(&self, normalizer: &Normalizer, raw: &'a str) -> Cow<'a, str> {
        normalizer.recover(raw, self.percentage, &self.ranges)
    }

    /// True if `text` reads as a number inside one of the ranges.
    pub fn is_plausible(&self, text: &str) -> bool {
        super::value::parse_number(text.trim())
            .is_some_and(|v| self.ranges.iter().any(|r| r.contains(v)))
    }
}

/// Families of statistics that share a plausible range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatFamily {
    /// Offensive/defensive efficiency, points per 100 possessions.
    Rating,
    /// Efficiency margin; can be negative.
    NetRating,
    /// Possessions per 40 minutes.
    Tempo,
    /// Team points per game.
    Scoring,
    /// Other per-game counting stats (assists, rebounds, turnovers).
    PerGame,
    Percentage,
    /// Attempt rates such as FTA Rate, 3PAr and AST Ratio.
    Rate,
    /// Team-minus-opponent per-game differences; can be negative.
    Differential,
    /// Quotients of two counting stats such as AST/TOV or STL/PF.
    Ratio,
}

impl StatFamily {
    pub const ALL: [StatFamily; 9] = [
        StatFamily::Rating,
        StatFamily::NetRating,
        StatFamily::Tempo,
        StatFamily::Scoring,
        StatFamily::PerGame,
        StatFamily::Percentage,
        StatFamily::Rate,
        StatFamily::Differential,
        StatFamily::Ratio,
    ];

    /// Guess the family from a column header such as `"Team 4-Factors_ORtg"`
    /// or `"eFG%"`. Order matters: `"Net Rtg"` is a margin, not a rating, and
    /// `"PTS/G"` is scoring, not a small per-game stat.
    ///
    /// A trailing `adj` (`"eFG% adj"`, `"ORtg adj"`) marks the opponent-adjusted
    /// version of the same stat and is ignored.
    pub fn classify(name: &str) -> Option<StatFamily> {
        let trimmed = name.trim().to_lowercase();
        let lower = match trimmed.strip_suffix("adj") {
            Some(base) if !base.trim_end().is_empty() => base.trim_end(),
            _ => trimmed.as_str(),
        };
        let has = |needle: &str| lower.contains(needle);

        if has("net") || has("adjem") || has("adj em") || lower.ends_with("_em") {
            Some(StatFamily::NetRating)
        } else if has("diff") {
            Some(StatFamily::Differential)
        } else if has("pts/g") {
            Some(StatFamily::Scoring)
        } else if has("tempo") || has("pace") || has("adjt") || has("adj t") {
            Some(StatFamily::Tempo)
        } else if has("rtg") || has("adjo") || has("adjd") || has("adj o") || has("adj d") {
            Some(StatFamily::Rating)
        } else if has("rate") || has("ratio") || lower.ends_with("3par") {
            Some(StatFamily::Rate)
        } else if lower.ends_with('%') || has("pct") {
            Some(StatFamily::Percentage)
        } else if lower.ends_with("/g") {
            Some(StatFamily::PerGame)
        } else if has("/") {
            Some(StatFamily::Ratio)
        } else {
            None
        }
    }

    pub fn default_policy(self) -> RangePolicy {
        let r = PlausibleRange::new;
        match self {
            StatFamily::Rating => RangePolicy::new(false, vec![r(85.0, 135.0)]),
            StatFamily::NetRating => RangePolicy::new(false, vec![r(-50.0, 50.0)]),
            StatFamily::Tempo => RangePolicy::new(false, vec![r(55.0, 85.0)]),
            StatFamily::Scoring => RangePolicy::new(false, vec![r(50.0, 100.0)]),
            StatFamily::PerGame => RangePolicy::new(false, vec![r(0.0, 85.0)]),
            StatFamily::Percentage => RangePolicy::new(true, vec![r(30.0, 100.0), r(0.0, 100.0)]),
            StatFamily::Rate => RangePolicy::new(true, vec![r(0.0, 100.0)]),
            StatFamily::Differential => RangePolicy::new(false, vec![r(-25.0, 25.0)]),
            StatFamily::Ratio => RangePolicy::new(false, vec![r(0.0, 5.0)]),
        }
    }
}

/// Statistic name -> policy lookup, immutable once built.
///
/// Explicit per-statistic entries win; otherwise the name is classified into a
/// [`StatFamily`] and the family policy applies.
#[derive(Debug, Clone)]
pub struct RangeTable {
    normalizer: Normalizer,
    families: HashMap<StatFamily, RangePolicy>,
    stats: HashMap<String, RangePolicy>,
}

impl Default for RangeTable {
    fn default() -> Self {
        Self::from_config(&NormalizerConfig::default())
    }
}

impl RangeTable {
    pub fn from_config(config: &NormalizerConfig) -> Self {
        let families = StatFamily::ALL
            .iter()
            .map(|&family| {
                let policy = config
                    .families
                    .get(&family)
                    .cloned()
                    .unwrap_or_else(|| family.default_policy());
                (family, policy)
            })
            .collect();
        let stats = config
            .stats
            .iter()
            .map(|(name, policy)| (stat_key(name), policy.clone()))
            .collect();
        Self {
            normalizer: Normalizer::new(config.min_length, config.preference),
            families,
            stats,
        }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub fn policy_for(&self, stat: &str) -> Option<&RangePolicy> {
        self.stats
            .get(&stat_key(stat))
            .or_else(|| StatFamily::classify(stat).and_then(|f| self.families.get(&f)))
    }

    /// Clean one cell of `stat`. Unknown statistics pass through untouched.
    pub fn clean<'a>(&self, stat: &str, raw: &'a str) -> Cow<'a, str> {
        match self.policy_for(stat) {
            Some(policy) => policy.apply(&self.normalizer, raw),
            None => Cow::Borrowed(raw),
        }
    }
}

fn stat_key(name: &str) -> String {
    name.trim().to_lowercase()
}
