//! Named strategies and their static leg tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::leg::Leg;
use crate::domain::quotes::OptionType;

const LONG_CALL_LEGS: &[Leg] = &[Leg::long(OptionType::Call)];
const SHORT_CALL_LEGS: &[Leg] = &[Leg::short(OptionType::Call)];
const LONG_PUT_LEGS: &[Leg] = &[Leg::long(OptionType::Put)];
const SHORT_PUT_LEGS: &[Leg] = &[Leg::short(OptionType::Put)];

const LONG_CALL_SPREAD_LEGS: &[Leg] = &[Leg::long(OptionType::Call), Leg::short(OptionType::Call)];
const SHORT_CALL_SPREAD_LEGS: &[Leg] = &[Leg::short(OptionType::Call), Leg::long(OptionType::Call)];
const LONG_PUT_SPREAD_LEGS: &[Leg] = &[Leg::short(OptionType::Put), Leg::long(OptionType::Put)];
const SHORT_PUT_SPREAD_LEGS: &[Leg] = &[Leg::long(OptionType::Put), Leg::short(OptionType::Put)];

const LONG_IRON_CONDOR_LEGS: &[Leg] = &[
    Leg::long(OptionType::Put),   // lower put wing
    Leg::short(OptionType::Put),  // higher put
    Leg::short(OptionType::Call), // lower call
    Leg::long(OptionType::Call),  // higher call wing
];
const SHORT_IRON_CONDOR_LEGS: &[Leg] = &[
    Leg::short(OptionType::Put),
    Leg::long(OptionType::Put),
    Leg::long(OptionType::Call),
    Leg::short(OptionType::Call),
];

/// Validation geometry of a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyShape {
    /// One option.
    Single,
    /// Two-leg call spread: leg 1 selection above leg 2.
    VerticalCall,
    /// Two-leg put spread: leg 1 selection below leg 2.
    VerticalPut,
    /// Four-leg iron condor.
    IronCondor,
    /// Four-leg iron butterfly (condor ordering rule).
    IronButterfly,
}

impl StrategyShape {
    /// Number of legs (and selection parameter families) for this shape.
    #[must_use]
    pub const fn leg_count(&self) -> usize {
        match self {
            Self::Single => 1,
            Self::VerticalCall | Self::VerticalPut => 2,
            Self::IronCondor | Self::IronButterfly => 4,
        }
    }

    /// Whether constructed spreads must be screened for coincident strikes.
    #[must_use]
    pub const fn drops_degenerate_spreads(&self) -> bool {
        matches!(self, Self::IronCondor | Self::IronButterfly)
    }
}

impl fmt::Display for StrategyShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single => write!(f, "Single"),
            Self::VerticalCall => write!(f, "Vertical Call"),
            Self::VerticalPut => write!(f, "Vertical Put"),
            Self::IronCondor => write!(f, "Iron Condor"),
            Self::IronButterfly => write!(f, "Iron Butterfly"),
        }
    }
}

/// A named strategy with a fixed leg sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Buy one call.
    LongCall,
    /// Sell one call.
    ShortCall,
    /// Buy one put.
    LongPut,
    /// Sell one put.
    ShortPut,
    /// Buy a call, sell a further OTM call.
    LongCallSpread,
    /// Sell a call, buy a further OTM call.
    ShortCallSpread,
    /// Sell a put, buy a higher put.
    LongPutSpread,
    /// Buy a put, sell a higher put.
    ShortPutSpread,
    /// Long put wing, short put, short call, long call wing.
    LongIronCondor,
    /// Short put wing, long put, long call, short call wing.
    ShortIronCondor,
}

impl Strategy {
    /// Every named strategy.
    pub const ALL: [Self; 10] = [
        Self::LongCall,
        Self::ShortCall,
        Self::LongPut,
        Self::ShortPut,
        Self::LongCallSpread,
        Self::ShortCallSpread,
        Self::LongPutSpread,
        Self::ShortPutSpread,
        Self::LongIronCondor,
        Self::ShortIronCondor,
    ];

    /// The ordered leg sequence for this strategy.
    #[must_use]
    pub const fn legs(&self) -> &'static [Leg] {
        match self {
            Self::LongCall => LONG_CALL_LEGS,
            Self::ShortCall => SHORT_CALL_LEGS,
            Self::LongPut => LONG_PUT_LEGS,
            Self::ShortPut => SHORT_PUT_LEGS,
            Self::LongCallSpread => LONG_CALL_SPREAD_LEGS,
            Self::ShortCallSpread => SHORT_CALL_SPREAD_LEGS,
            Self::LongPutSpread => LONG_PUT_SPREAD_LEGS,
            Self::ShortPutSpread => SHORT_PUT_SPREAD_LEGS,
            Self::LongIronCondor => LONG_IRON_CONDOR_LEGS,
            Self::ShortIronCondor => SHORT_IRON_CONDOR_LEGS,
        }
    }

    /// The validation geometry for this strategy.
    #[must_use]
    pub const fn shape(&self) -> StrategyShape {
        match self {
            Self::LongCall | Self::ShortCall | Self::LongPut | Self::ShortPut => {
                StrategyShape::Single
            }
            Self::LongCallSpread | Self::ShortCallSpread => StrategyShape::VerticalCall,
            Self::LongPutSpread | Self::ShortPutSpread => StrategyShape::VerticalPut,
            Self::LongIronCondor | Self::ShortIronCondor => StrategyShape::IronCondor,
        }
    }

    /// Snake-case name, as used in requests.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LongCall => "long_call",
            Self::ShortCall => "short_call",
            Self::LongPut => "long_put",
            Self::ShortPut => "short_put",
            Self::LongCallSpread => "long_call_spread",
            Self::ShortCallSpread => "short_call_spread",
            Self::LongPutSpread => "long_put_spread",
            Self::ShortPutSpread => "short_put_spread",
            Self::LongIronCondor => "long_iron_condor",
            Self::ShortIronCondor => "short_iron_condor",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy: {0}")]
pub struct UnknownStrategy(pub String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.name() == s)
            .ok_or_else(|| UnknownStrategy(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::strategy::value_objects::leg::Direction;

    fn signature(strategy: Strategy) -> Vec<(OptionType, i32)> {
        strategy
            .legs()
            .iter()
            .map(|leg| (leg.option_type(), leg.sign()))
            .collect()
    }

    #[test]
    fn single_leg_tables() {
        assert_eq!(signature(Strategy::LongCall), vec![(OptionType::Call, 1)]);
        assert_eq!(signature(Strategy::ShortCall), vec![(OptionType::Call, -1)]);
        assert_eq!(signature(Strategy::LongPut), vec![(OptionType::Put, 1)]);
        assert_eq!(signature(Strategy::ShortPut), vec![(OptionType::Put, -1)]);
    }

    #[test]
    fn vertical_tables() {
        assert_eq!(
            signature(Strategy::LongCallSpread),
            vec![(OptionType::Call, 1), (OptionType::Call, -1)]
        );
        assert_eq!(
            signature(Strategy::ShortCallSpread),
            vec![(OptionType::Call, -1), (OptionType::Call, 1)]
        );
        assert_eq!(
            signature(Strategy::LongPutSpread),
            vec![(OptionType::Put, -1), (OptionType::Put, 1)]
        );
        assert_eq!(
            signature(Strategy::ShortPutSpread),
            vec![(OptionType::Put, 1), (OptionType::Put, -1)]
        );
    }

    #[test]
    fn condor_tables() {
        assert_eq!(
            signature(Strategy::LongIronCondor),
            vec![
                (OptionType::Put, 1),
                (OptionType::Put, -1),
                (OptionType::Call, -1),
                (OptionType::Call, 1)
            ]
        );
        assert_eq!(
            signature(Strategy::ShortIronCondor),
            vec![
                (OptionType::Put, -1),
                (OptionType::Put, 1),
                (OptionType::Call, 1),
                (OptionType::Call, -1)
            ]
        );
    }

    #[test]
    fn leg_count_matches_shape() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.legs().len(), strategy.shape().leg_count(), "{strategy}");
        }
    }

    #[test]
    fn condor_legs_are_balanced() {
        let longs = Strategy::LongIronCondor
            .legs()
            .iter()
            .filter(|leg| leg.direction() == Direction::Long)
            .count();
        assert_eq!(longs, 2);
    }

    #[test]
    fn only_four_leg_shapes_drop_degenerate_spreads() {
        assert!(!StrategyShape::Single.drops_degenerate_spreads());
        assert!(!StrategyShape::VerticalCall.drops_degenerate_spreads());
        assert!(StrategyShape::IronCondor.drops_degenerate_spreads());
        assert!(StrategyShape::IronButterfly.drops_degenerate_spreads());
    }

    #[test]
    fn name_round_trip() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.name().parse::<Strategy>(), Ok(strategy));
        }
        assert_eq!(
            "iron_albatross".parse::<Strategy>(),
            Err(UnknownStrategy("iron_albatross".to_string()))
        );
    }

    #[test]
    fn serde_matches_name() {
        let json = serde_json::to_string(&Strategy::ShortPutSpread).unwrap();
        assert_eq!(json, "\"short_put_spread\"");
    }
}
