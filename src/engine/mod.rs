pub mod four_factors;
pub mod matcher;
pub mod matchup;

pub use four_factors::{Baseline, FourFactorScore, FourFactorWeights, FourFactors, TeamFactors};
pub use matcher::{name_key, slugify, strip_decorations, TeamDirectory};
pub use matchup::{compare, Location, Matchup, TeamProfile};
