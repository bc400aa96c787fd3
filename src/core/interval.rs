use chrono::{NaiveDateTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

/// Price table granularity: both the upstream resolution and the filtering step.
#[derive(Copy, Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize, clap::ValueEnum)]
pub enum Interval {
    #[default]
    #[serde(rename = "15min")]
    #[value(name = "15min")]
    Quarterly,

    #[serde(rename = "1h")]
    #[value(name = "1h")]
    Hourly,
}

impl Interval {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quarterly => "15min",
            Self::Hourly => "1h",
        }
    }

    /// Path segment in front of the table file name. Hourly tables live in the bucket root.
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Quarterly => "15min/",
            Self::Hourly => "",
        }
    }

    const fn minutes(self) -> u32 {
        match self {
            Self::Quarterly => 15,
            Self::Hourly => 60,
        }
    }

    /// Truncate `now` to the start of the slot it falls into.
    #[must_use]
    pub fn cutoff(self, now: NaiveDateTime) -> NaiveDateTime {
        let excess = TimeDelta::minutes(i64::from(now.minute() % self.minutes()))
            + TimeDelta::seconds(i64::from(now.second()))
            + TimeDelta::nanoseconds(i64::from(now.nanosecond()));
        now - excess
    }
}
