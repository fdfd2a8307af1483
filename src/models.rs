use std::{fmt, str::FromStr};

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Romance,
    Adventure,
    Suspense,
    Comedy,
    Horror,
    Drama,
}

impl Genre {
    /// Options offered by the genre select, in display order.
    pub const ALL: [Genre; 7] = [
        Genre::Action,
        Genre::Romance,
        Genre::Adventure,
        Genre::Suspense,
        Genre::Comedy,
        Genre::Horror,
        Genre::Drama,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Romance => "Romance",
            Genre::Adventure => "Adventure",
            Genre::Suspense => "Suspense",
            Genre::Comedy => "Comedy",
            Genre::Horror => "Horror",
            Genre::Drama => "Drama",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("unknown genre: {0}")]
pub struct UnknownGenre(pub String);

impl FromStr for Genre {
    type Err = UnknownGenre;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .into_iter()
            .find(|g| g.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownGenre(s.to_string()))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub photo_url: Option<String>,
    pub release_date: Date,
    #[serde(default)]
    pub description: Option<String>,
    pub rating: f64,
    #[serde(default)]
    pub reference_url: Option<String>,
    pub genre: Genre,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genre_parses_labels_case_insensitively() {
        assert_eq!("horror".parse::<Genre>().unwrap(), Genre::Horror);
        assert_eq!(" Drama ".parse::<Genre>().unwrap(), Genre::Drama);
        assert!("Western".parse::<Genre>().is_err());
    }

    #[test]
    fn movie_uses_camel_case_on_the_wire() {
        let movie = Movie {
            id: None,
            title: "Alien".to_string(),
            photo_url: Some("https://img.example/alien.jpg".to_string()),
            release_date: jiff::civil::date(1979, 5, 25),
            description: None,
            rating: 8.5,
            reference_url: None,
            genre: Genre::Horror,
        };

        let json = serde_json::to_value(&movie).unwrap();
        assert_eq!(json["photoUrl"], "https://img.example/alien.jpg");
        assert_eq!(json["releaseDate"], "1979-05-25");
        assert_eq!(json["genre"], "Horror");
        assert!(json.get("id").is_none());
    }
}
