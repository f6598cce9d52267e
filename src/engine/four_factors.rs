use crate::config::FourFactorConfig;
use serde::{Deserialize, Serialize};

/// A team's offensive and defensive four factors, in percentage points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FourFactors {
    pub efg_pct: f64,
    pub tov_pct: f64,
    pub orb_pct: f64,
    pub ftr: f64,
    pub efg_pct_d: f64,
    pub tov_pct_d: f64,
    pub drb_pct: f64,
    pub ftr_d: f64,
}

/// Offense-minus-defense margin for each factor; positive is good.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Margins {
    pub efg_margin: f64,
    pub tov_edge: f64,
    pub reb_edge: f64,
    pub ftr_margin: f64,
}

impl FourFactors {
    pub fn margins(&self) -> Margins {
        Margins {
            efg_margin: self.efg_pct - self.efg_pct_d,
            // Forcing turnovers is good, committing them is bad.
            tov_edge: self.tov_pct_d - self.tov_pct,
            // Opponent offensive rebound rate is 100 - DRB%.
            reb_edge: self.orb_pct - (100.0 - self.drb_pct),
            ftr_margin: self.ftr - self.ftr_d,
        }
    }
}

/// Z-score of each margin against a [`Baseline`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MarginZ {
    pub efg: f64,
    pub tov: f64,
    pub reb: f64,
    pub ftr: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MarginStats {
    pub mean: f64,
    /// Sample standard deviation (n - 1).
    pub std_dev: f64,
}

impl MarginStats {
    fn from_samples(samples: &[f64]) -> Option<Self> {
        if samples.len() < 2 {
            return None;
        }
        let n = samples.len() as f64;
        let mean = samples.iter().sum::<f64>() / n;
        let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
        Some(Self {
            mean,
            std_dev: var.sqrt(),
        })
    }

    pub fn z(&self, value: f64) -> f64 {
        if self.std_dev == 0.0 {
            0.0
        } else {
            (value - self.mean) / self.std_dev
        }
    }
}

/// Reference population the z-scores are measured against, typically past
/// national champions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Baseline {
    pub efg: MarginStats,
    pub tov: MarginStats,
    pub reb: MarginStats,
    pub ftr: MarginStats,
}

impl Baseline {
    /// `None` for fewer than two samples.
    pub fn from_population(population: &[Margins]) -> Option<Self> {
        let column = |f: fn(&Margins) -> f64| population.iter().map(f).collect::<Vec<_>>();
        Some(Self {
            efg: MarginStats::from_samples(&column(|m| m.efg_margin))?,
            tov: MarginStats::from_samples(&column(|m| m.tov_edge))?,
            reb: MarginStats::from_samples(&column(|m| m.reb_edge))?,
            ftr: MarginStats::from_samples(&column(|m| m.ftr_margin))?,
        })
    }

    pub fn z_scores(&self, margins: &Margins) -> MarginZ {
        MarginZ {
            efg: self.efg.z(margins.efg_margin),
            tov: self.tov.z(margins.tov_edge),
            reb: self.reb.z(margins.reb_edge),
            ftr: self.ftr.z(margins.ftr_margin),
        }
    }
}

/// Weight of each margin z-score in the Four Factor Index.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct FourFactorWeights {
    #[serde(default = "default_efg_weight")]
    pub efg: f64,
    #[serde(default = "default_tov_weight")]
    pub tov: f64,
    #[serde(default = "default_reb_weight")]
    pub reb: f64,
    #[serde(default = "default_ftr_weight")]
    pub ftr: f64,
}

fn default_efg_weight() -> f64 { 0.4069 }
fn default_tov_weight() -> f64 { 0.4069 }
fn default_reb_weight() -> f64 { 0.1432 }
fn default_ftr_weight() -> f64 { 0.0428 }

impl Default for FourFactorWeights {
    fn default() -> Self {
        Self {
            efg: default_efg_weight(),
            tov: default_tov_weight(),
            reb: default_reb_weight(),
            ftr: default_ftr_weight(),
        }
    }
}

impl FourFactorWeights {
    /// Weighted sum of the z-scores. The default weights already sum to ~1, so
    /// the sum is not averaged again.
    pub fn index(&self, z: &MarginZ) -> f64 {
        self.efg * z.efg + self.tov * z.tov + self.reb * z.reb + self.ftr * z.ftr
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreScale {
    pub center: f64,
    pub scale: f64,
}

impl Default for ScoreScale {
    fn default() -> Self {
        Self {
            center: 50.0,
            scale: 15.0,
        }
    }
}

/// Map an index onto 0-100: `center + scale * index`, clamped.
pub fn four_factor_score(index: f64, scale: &ScoreScale) -> f64 {
    (scale.center + scale.scale * index).clamp(0.0, 100.0)
}

/// One input row: a team name plus its factors, flattened so JSON rows read
/// `{"team": "Duke", "efg_pct": 55.1, ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamFactors {
    pub team: String,
    #[serde(flatten)]
    pub factors: FourFactors,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FourFactorScore {
    pub team: String,
    pub margins: Margins,
    pub z: MarginZ,
    pub index: f64,
    pub score: f64,
}

/// Score every team against `baseline`, or against the teams themselves when
/// no baseline is given.
///
/// A self-baseline needs two teams; with fewer, every z-score is zero and the
/// team lands on the center score.
pub fn score_population(
    teams: &[TeamFactors],
    baseline: Option<&Baseline>,
    config: &FourFactorConfig,
) -> Vec<FourFactorScore> {
    let margins: Vec<Margins> = teams.iter().map(|t| t.factors.margins()).collect();
    let own;
    let baseline = match baseline {
        Some(b) => Some(b),
        None => {
            own = Baseline::from_population(&margins);
            if own.is_none() && !teams.is_empty() {
                tracing::warn!(teams = teams.len(), "population too small for a baseline, z-scores set to 0");
            }
            own.as_ref()
        }
    };
    let scale = config.score_scale();

    teams
        .iter()
        .zip(margins)
        .map(|(team, margins)| {
            let z = baseline.map(|b| b.z_scores(&margins)).unwrap_or_default();
            let index = config.weights.index(&z);
            FourFactorScore {
                team: team.team.clone(),
                margins,
                z,
                index,
                score: four_factor_score(index, &scale),
            }
        })
        .collect()
}

/// Sort best score first. Ties keep input order.
pub fn rank(scores: &mut [FourFactorScore]) {
    scores.sort_by(|a, b| b.score.total_cmp(&a.score));
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub mean_score: f64,
    pub best: String,
    pub best_score: f64,
    pub worst: String,
    pub worst_score: f64,
}

/// Average, highest and lowest score. `None` for an empty slice.
pub fn summarize(scores: &[FourFactorScore]) -> Option<ScoreSummary> {
    let best = scores.iter().max_by(|a, b| a.score.total_cmp(&b.score))?;
    let worst = scores.iter().min_by(|a, b| a.score.total_cmp(&b.score))?;
    let mean_score = scores.iter().map(|s| s.score).sum::<f64>() / scores.len() as f64;
    Some(ScoreSummary {
        mean_score,
        best: best.team.clone(),
        best_score: best.score,
        worst: worst.team.clone(),
        worst_score: worst.score,
    })
}
