use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Network tariff package, selects the price table to fetch.
#[derive(
    Copy,
    Clone,
    Debug,
    Deserialize,
    Eq,
    Hash,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
    clap::ValueEnum,
)]
pub enum Plan {
    #[value(name = "V1")]
    V1,

    #[value(name = "V2")]
    V2,

    #[value(name = "V4")]
    V4,

    #[value(name = "V5")]
    V5,
}

impl Plan {
    /// Identifier as used in the table file name.
    pub const fn id(self) -> &'static str {
        match self {
            Self::V1 => "V1",
            Self::V2 => "V2",
            Self::V4 => "V4",
            Self::V5 => "V5",
        }
    }

    /// Localized package name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::V1 => "Võrk 1",
            Self::V2 => "Võrk 2",
            Self::V4 => "Võrk 4",
            Self::V5 => "Võrk 5",
        }
    }
}

impl Display for Plan {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.id(), self.name())
    }
}
