use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimeStatus {
    Released,
    Ongoing,
    Announced,
}

impl AnimeStatus {
    pub const ALL: [Self; 3] = [Self::Released, Self::Ongoing, Self::Announced];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Released => "released",
            Self::Ongoing => "ongoing",
            Self::Announced => "announced",
        }
    }
}

impl FromStr for AnimeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "released" => Ok(Self::Released),
            "ongoing" => Ok(Self::Ongoing),
            "announced" => Ok(Self::Announced),
            other => Err(format!("unknown status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgeRating {
    #[serde(rename = "6+")]
    Six,
    #[serde(rename = "13+")]
    Thirteen,
    #[serde(rename = "16+")]
    Sixteen,
    #[serde(rename = "18+")]
    Eighteen,
}

impl AgeRating {
    pub const ALL: [Self; 4] = [Self::Six, Self::Thirteen, Self::Sixteen, Self::Eighteen];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Six => "6+",
            Self::Thirteen => "13+",
            Self::Sixteen => "16+",
            Self::Eighteen => "18+",
        }
    }
}

impl FromStr for AgeRating {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "6+" => Ok(Self::Six),
            "13+" => Ok(Self::Thirteen),
            "16+" => Ok(Self::Sixteen),
            "18+" => Ok(Self::Eighteen),
            other => Err(format!("unknown age rating: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    pub const ALL: [Self; 4] = [Self::Winter, Self::Spring, Self::Summer, Self::Autumn];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Winter => "winter",
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
        }
    }
}

impl FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "winter" => Ok(Self::Winter),
            "spring" => Ok(Self::Spring),
            "summer" => Ok(Self::Summer),
            "autumn" => Ok(Self::Autumn),
            other => Err(format!("unknown season: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimeKind {
    Series,
    Movie,
    Short,
    Ova,
    Ona,
    Special,
}

impl AnimeKind {
    pub const ALL: [Self; 6] = [
        Self::Series,
        Self::Movie,
        Self::Short,
        Self::Ova,
        Self::Ona,
        Self::Special,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Series => "series",
            Self::Movie => "movie",
            Self::Short => "short",
            Self::Ova => "ova",
            Self::Ona => "ona",
            Self::Special => "special",
        }
    }
}

impl FromStr for AnimeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "series" => Ok(Self::Series),
            "movie" => Ok(Self::Movie),
            "short" => Ok(Self::Short),
            "ova" => Ok(Self::Ova),
            "ona" => Ok(Self::Ona),
            "special" => Ok(Self::Special),
            other => Err(format!("unknown kind: {other}")),
        }
    }
}

/// Input for adding a title to the catalog. Studio, genres and directors are
/// given by name and resolved (or created) by slug.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewAnime {
    pub title: String,
    pub second_title: Option<String>,
    pub slug: String,
    pub description: String,
    pub poster: Option<String>,
    pub studio: String,
    /// ISO date (YYYY-MM-DD)
    pub release_date: String,
    pub episode_count: i32,
    pub status: AnimeStatus,
    pub age_rating: AgeRating,
    pub season: Season,
    pub kind: AnimeKind,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub directors: Vec<String>,
}

/// Lowercase, dash-separated slug from a display name.
#[must_use]
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_dash = true;
    for ch in name.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("Cowboy Bebop: The Movie"), "cowboy-bebop-the-movie");
        assert_eq!(slugify("  Mushishi  "), "mushishi");
    }

    #[test]
    fn enums_round_trip() {
        assert_eq!("ongoing".parse::<AnimeStatus>(), Ok(AnimeStatus::Ongoing));
        assert_eq!("16+".parse::<AgeRating>(), Ok(AgeRating::Sixteen));
        assert_eq!("autumn".parse::<Season>(), Ok(Season::Autumn));
        assert_eq!("ova".parse::<AnimeKind>(), Ok(AnimeKind::Ova));
        assert!("tv".parse::<AnimeKind>().is_err());
    }
}
