use serde::{Deserialize, Serialize};

use super::player_stats::{PlayerStatLine, PlayerStatTable};
use crate::models::TeamSide;

/// Counting categories that can be split between starters and bench.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
pub enum StatCategory {
    Points,
    Assists,
    Rebounds,
}

impl StatCategory {
    pub fn value(self, line: &PlayerStatLine) -> u32 {
        match self {
            StatCategory::Points => line.points(),
            StatCategory::Assists => line.assists,
            StatCategory::Rebounds => line.rebounds(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StarterBenchSplit {
    pub starters: u32,
    pub bench: u32,
}

impl StarterBenchSplit {
    pub fn total(&self) -> u32 {
        self.starters + self.bench
    }
}

/// Team total of `category`, split by the players' starter flag.
pub fn starter_bench_split(
    stats: &PlayerStatTable,
    side: TeamSide,
    category: StatCategory,
) -> StarterBenchSplit {
    stats.side(side).fold(StarterBenchSplit::default(), |mut split, line| {
        let value = category.value(line);
        if line.starter {
            split.starters += value;
        } else {
            split.bench += value;
        }
        split
    })
}
