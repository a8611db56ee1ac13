//! The fixed strategy catalog.
//!
//! Strategies are a closed enum; each variant owns one weight record. Name
//! lookup happens once at the boundary via [`std::str::FromStr`].

use crate::error::SearchError;

/// Weights applied to the three score terms, plus the utilization gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrategyWeights {
    /// Multiplier on the target-range penalty.
    pub range: f64,
    /// Multiplier on the smoothness term (log-gap spread plus utilization).
    pub smoothness: f64,
    /// Multiplier on the utilization term.
    pub utilization: f64,
    /// Keep only chains where every switch combination is a distinct ratio.
    pub filter_max_utilization: bool,
}

/// A named weighting profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Strategy {
    Balanced,
    RangeFirst,
    SmoothnessFirst,
    MaxGears,
    QualityOverQuantity,
}

impl Strategy {
    /// Every strategy in catalog order.
    pub const ALL: [Strategy; 5] = [
        Strategy::Balanced,
        Strategy::RangeFirst,
        Strategy::SmoothnessFirst,
        Strategy::MaxGears,
        Strategy::QualityOverQuantity,
    ];

    /// Display name, also the lookup key.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Balanced => "Balanced",
            Self::RangeFirst => "Range First",
            Self::SmoothnessFirst => "Smoothness First",
            Self::MaxGears => "Max Gears",
            Self::QualityOverQuantity => "Quality Over Quantity",
        }
    }

    #[must_use]
    pub const fn weights(self) -> StrategyWeights {
        match self {
            Self::Balanced => StrategyWeights {
                range: 2.0,
                smoothness: 1.0,
                utilization: 1.0,
                filter_max_utilization: false,
            },
            Self::RangeFirst => StrategyWeights {
                range: 10.0,
                smoothness: 0.1,
                utilization: 0.5,
                filter_max_utilization: false,
            },
            Self::SmoothnessFirst => StrategyWeights {
                range: 2.0,
                smoothness: 5.0,
                utilization: 0.5,
                filter_max_utilization: false,
            },
            Self::MaxGears => StrategyWeights {
                range: 2.0,
                smoothness: 0.5,
                utilization: 10.0,
                filter_max_utilization: false,
            },
            Self::QualityOverQuantity => StrategyWeights {
                range: 10.0,
                smoothness: 10.0,
                utilization: 10.0,
                filter_max_utilization: false,
            },
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Strategy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| SearchError::UnknownStrategy { name: s.to_string() })
    }
}
