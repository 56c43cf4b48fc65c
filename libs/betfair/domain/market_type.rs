//! Market type codes used to filter catalogue requests

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketType {
    MatchOdds,
    #[serde(rename = "OVER_UNDER_25")]
    OverUnder25,
    CorrectScore,
    BothTeamsToScore,
    AsianHandicap,
    HalfTime,
}

impl MarketType {
    /// Convert to API string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            MarketType::MatchOdds => "MATCH_ODDS",
            MarketType::OverUnder25 => "OVER_UNDER_25",
            MarketType::CorrectScore => "CORRECT_SCORE",
            MarketType::BothTeamsToScore => "BOTH_TEAMS_TO_SCORE",
            MarketType::AsianHandicap => "ASIAN_HANDICAP",
            MarketType::HalfTime => "HALF_TIME",
        }
    }
}

impl fmt::Display for MarketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
