use core::fmt;
use core::ops::BitOr;

/// Whether a parameter, variable or value is indexed by time and/or by scenario.
///
/// This is the structural "type" every declared parameter carries and every
/// bound datum is checked against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexingStructure {
    pub time: bool,
    pub scenario: bool,
}

impl IndexingStructure {
    /// Neither time nor scenario dependent.
    pub const CONSTANT: Self = Self::new(false, false);
    /// Time dependent only.
    pub const TIME: Self = Self::new(true, false);
    /// Scenario dependent only.
    pub const SCENARIO: Self = Self::new(false, true);
    /// Time and scenario dependent.
    pub const TIME_AND_SCENARIO: Self = Self::new(true, true);

    pub const fn new(time: bool, scenario: bool) -> Self {
        Self { time, scenario }
    }

    pub fn is_time_varying(self) -> bool {
        self.time
    }

    pub fn is_scenario_varying(self) -> bool {
        self.scenario
    }

    pub fn is_time_scenario_varying(self) -> bool {
        self.time && self.scenario
    }

    pub fn is_constant(self) -> bool {
        !self.time && !self.scenario
    }

    /// True when every dimension `self` varies along is also allowed by `declared`.
    pub fn is_within(self, declared: IndexingStructure) -> bool {
        (!self.time || declared.time) && (!self.scenario || declared.scenario)
    }
}

impl BitOr for IndexingStructure {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self::new(self.time || rhs.time, self.scenario || rhs.scenario)
    }
}

impl fmt::Display for IndexingStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(time={}, scenario={})", self.time, self.scenario)
    }
}
