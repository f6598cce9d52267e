//! Head-to-head comparison of two teams' adjusted efficiency profiles.
//!
//! Everything is team A minus team B, so positive numbers favor team A.

use super::four_factors::{FourFactors, Margins};
use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Home court expressed as points of efficiency margin.
pub const HOME_COURT_EDGE: f64 = 3.0;

/// Average efficiency; each side's projection is measured from it.
const LEAGUE_AVERAGE_EFFICIENCY: f64 = 100.0;

/// Tempo gaps under this many possessions read as the same pace.
const SIMILAR_PACE: f64 = 2.0;

/// Where the game is played.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Location {
    #[default]
    Neutral,
    /// Team A is at home.
    TeamA,
    /// Team B is at home.
    TeamB,
}

impl Location {
    /// Points added to team A's side of every margin.
    pub fn home_edge(self) -> f64 {
        match self {
            Location::Neutral => 0.0,
            Location::TeamA => HOME_COURT_EDGE,
            Location::TeamB => -HOME_COURT_EDGE,
        }
    }
}

impl FromStr for Location {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "neutral" => Ok(Location::Neutral),
            "team-a" | "a" => Ok(Location::TeamA),
            "team-b" | "b" => Ok(Location::TeamB),
            other => bail!("unknown location: {other} (expected neutral, team-a or team-b)"),
        }
    }
}

/// One team's season profile: KenPom-style adjusted efficiencies and tempo
/// plus its raw four factors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamProfile {
    pub team: String,
    /// Points scored per 100 possessions, opponent-adjusted.
    pub adj_o: f64,
    /// Points allowed per 100 possessions, opponent-adjusted.
    pub adj_d: f64,
    pub adj_tempo: f64,
    #[serde(flatten)]
    pub factors: FourFactors,
}

impl TeamProfile {
    pub fn adj_em(&self) -> f64 {
        self.adj_o - self.adj_d
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Matchup {
    pub team_a: String,
    pub team_b: String,
    pub location: Location,
    /// Efficiency-margin gap including home court.
    pub adj_em_diff: f64,
    pub tempo_diff: f64,
    /// Per-factor margin gaps. Home court is not applied here.
    pub edges: Margins,
    pub avg_tempo: f64,
    /// Team A's offense against team B's defense, per 100 possessions.
    pub projected_a: f64,
    pub projected_b: f64,
    /// `projected_a - projected_b` plus home court.
    pub projected_margin: f64,
}

impl Matchup {
    /// Name of the team the efficiency margin favors; `None` on a dead heat.
    pub fn favored(&self) -> Option<&str> {
        if self.adj_em_diff > 0.0 {
            Some(&self.team_a)
        } else if self.adj_em_diff < 0.0 {
            Some(&self.team_b)
        } else {
            None
        }
    }

    pub fn similar_pace(&self) -> bool {
        self.tempo_diff.abs() < SIMILAR_PACE
    }
}

fn edge_gap(a: &Margins, b: &Margins) -> Margins {
    Margins {
        efg_margin: a.efg_margin - b.efg_margin,
        tov_edge: a.tov_edge - b.tov_edge,
        reb_edge: a.reb_edge - b.reb_edge,
        ftr_margin: a.ftr_margin - b.ftr_margin,
    }
}

/// Compare `a` against `b` at `location`.
pub fn compare(a: &TeamProfile, b: &TeamProfile, location: Location) -> Matchup {
    let home = location.home_edge();
    let projected_a = a.adj_o + b.adj_d - LEAGUE_AVERAGE_EFFICIENCY;
    let projected_b = b.adj_o + a.adj_d - LEAGUE_AVERAGE_EFFICIENCY;

    let matchup = Matchup {
        team_a: a.team.clone(),
        team_b: b.team.clone(),
        location,
        adj_em_diff: a.adj_em() - b.adj_em() + home,
        tempo_diff: a.adj_tempo - b.adj_tempo,
        edges: edge_gap(&a.factors.margins(), &b.factors.margins()),
        avg_tempo: (a.adj_tempo + b.adj_tempo) / 2.0,
        projected_a,
        projected_b,
        projected_margin: projected_a - projected_b + home,
    };
    tracing::debug!(
        team_a = %matchup.team_a,
        team_b = %matchup.team_b,
        location = ?location,
        adj_em_diff = matchup.adj_em_diff,
        projected_margin = matchup.projected_margin,
        "compared matchup"
    );
    matchup
}
