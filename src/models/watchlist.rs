use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The four mutually exclusive watch-list categories.
///
/// Favorite is deliberately not part of this enum: it is tracked
/// independently and never interacts with category exclusivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatchCategory {
    Watching,
    WillWatch,
    Viewed,
    Dropped,
}

impl WatchCategory {
    pub const ALL: [Self; 4] = [Self::Watching, Self::WillWatch, Self::Viewed, Self::Dropped];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Watching => "watching",
            Self::WillWatch => "will_watch",
            Self::Viewed => "viewed",
            Self::Dropped => "dropped",
        }
    }

}

impl fmt::Display for WatchCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WatchCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "watching" => Ok(Self::Watching),
            "will_watch" => Ok(Self::WillWatch),
            "viewed" => Ok(Self::Viewed),
            "dropped" => Ok(Self::Dropped),
            other => Err(format!("unknown watch category: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for category in WatchCategory::ALL {
            assert_eq!(category.as_str().parse::<WatchCategory>(), Ok(category));
        }
    }

    #[test]
    fn rejects_unknown_category() {
        assert!("favorite".parse::<WatchCategory>().is_err());
    }
}
