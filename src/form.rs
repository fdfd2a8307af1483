use std::fmt;

use jiff::civil::Date;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{Genre, Movie};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Field {
    Title,
    PhotoUrl,
    ReleaseDate,
    Description,
    Rating,
    ReferenceUrl,
    Genre,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Title,
        Field::PhotoUrl,
        Field::ReleaseDate,
        Field::Description,
        Field::Rating,
        Field::ReferenceUrl,
        Field::Genre,
    ];

    /// Input name used in the HTML form and in `FormValues`.
    pub fn name(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::PhotoUrl => "photo_url",
            Field::ReleaseDate => "release_date",
            Field::Description => "description",
            Field::Rating => "rating",
            Field::ReferenceUrl => "reference_url",
            Field::Genre => "genre",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::PhotoUrl => "Photo URL",
            Field::ReleaseDate => "Release date",
            Field::Description => "Description",
            Field::Rating => "Rating (0 - 10)",
            Field::ReferenceUrl => "Reference URL",
            Field::Genre => "Genre",
        }
    }

    pub fn rule(self) -> Rule {
        match self {
            Field::Title => Rule {
                required: true,
                min_length: Some(2),
                max_length: Some(256),
                ..Rule::default()
            },
            Field::PhotoUrl | Field::ReferenceUrl => {
                Rule { min_length: Some(10), ..Rule::default() }
            }
            Field::ReleaseDate => Rule { required: true, kind: ValueKind::Date, ..Rule::default() },
            Field::Description => Rule::default(),
            Field::Rating => Rule {
                required: true,
                kind: ValueKind::Number,
                range: Some((0.0, 10.0)),
                ..Rule::default()
            },
            Field::Genre => Rule { required: true, kind: ValueKind::Genre, ..Rule::default() },
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

const FIELD_COUNT: usize = Field::ALL.len();

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ValueKind {
    #[default]
    Text,
    Date,
    Number,
    Genre,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rule {
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub kind: ValueKind,
    pub range: Option<(f64, f64)>,
}

impl Rule {
    /// Checks a trimmed value. An empty value on an optional field passes every rule.
    pub fn check(&self, value: &str) -> Result<(), FieldError> {
        if value.is_empty() {
            return if self.required { Err(FieldError::Required) } else { Ok(()) };
        }

        let len = value.chars().count();
        match (self.min_length, self.max_length) {
            (Some(min), _) if len < min => return Err(FieldError::MinLength { min, actual: len }),
            (_, Some(max)) if len > max => return Err(FieldError::MaxLength { max, actual: len }),
            _ => {}
        }

        match self.kind {
            ValueKind::Text => {}
            ValueKind::Date => {
                parse_date(value)?;
            }
            ValueKind::Genre => {
                value.parse::<Genre>().map_err(|_| FieldError::UnknownGenre)?;
            }
            ValueKind::Number => {
                let n = parse_number(value)?;
                if let Some((min, max)) = self.range {
                    if n < min {
                        return Err(FieldError::BelowMin { min });
                    }
                    if n > max {
                        return Err(FieldError::AboveMax { max });
                    }
                }
            }
        }

        Ok(())
    }
}

/// Only the `YYYY-MM-DD` shape a date input posts; no times, basic or signed years.
fn parse_date(value: &str) -> Result<Date, FieldError> {
    let b = value.as_bytes();
    let shaped = b.len() == 10
        && b[4] == b'-'
        && b[7] == b'-'
        && b.iter().enumerate().all(|(i, c)| i == 4 || i == 7 || c.is_ascii_digit());
    if !shaped {
        return Err(FieldError::InvalidDate);
    }
    value.parse().map_err(|_| FieldError::InvalidDate)
}

fn parse_number(value: &str) -> Result<f64, FieldError> {
    value.parse::<f64>().ok().filter(|n| n.is_finite()).ok_or(FieldError::NotANumber)
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum FieldError {
    #[error("Required field")]
    Required,
    #[error("Must have at least {min} characters (has {actual})")]
    MinLength { min: usize, actual: usize },
    #[error("Must have at most {max} characters (has {actual})")]
    MaxLength { max: usize, actual: usize },
    #[error("Must be a number")]
    NotANumber,
    #[error("Must be a valid date")]
    InvalidDate,
    #[error("Pick one of the listed genres")]
    UnknownGenre,
    #[error("Must be at least {min}")]
    BelowMin { min: f64 },
    #[error("Must be at most {max}")]
    AboveMax { max: f64 },
}

#[derive(Debug, Error, PartialEq)]
#[error("invalid fields: {}", .0.iter().map(|f| f.name()).collect::<Vec<_>>().join(", "))]
pub struct InvalidForm(pub Vec<Field>);

/// Raw field values as posted by the browser.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default)]
pub struct FormValues {
    pub title: String,
    pub photo_url: String,
    pub release_date: String,
    pub description: String,
    pub rating: String,
    pub reference_url: String,
    pub genre: String,
}

impl FormValues {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::PhotoUrl => &self.photo_url,
            Field::ReleaseDate => &self.release_date,
            Field::Description => &self.description,
            Field::Rating => &self.rating,
            Field::ReferenceUrl => &self.reference_url,
            Field::Genre => &self.genre,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Title => &mut self.title,
            Field::PhotoUrl => &mut self.photo_url,
            Field::ReleaseDate => &mut self.release_date,
            Field::Description => &mut self.description,
            Field::Rating => &mut self.rating,
            Field::ReferenceUrl => &mut self.reference_url,
            Field::Genre => &mut self.genre,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        *self.slot(field) = value.trim().to_string();
    }

    pub fn trimmed(mut self) -> Self {
        for field in Field::ALL {
            let value = std::mem::take(self.slot(field));
            self.set(field, value);
        }
        self
    }
}

impl From<&Movie> for FormValues {
    fn from(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            photo_url: movie.photo_url.clone().unwrap_or_default(),
            release_date: movie.release_date.to_string(),
            description: movie.description.clone().unwrap_or_default(),
            rating: movie.rating.to_string(),
            reference_url: movie.reference_url.clone().unwrap_or_default(),
            genre: movie.genre.label().to_string(),
        }
    }
}

/// Form state: current values, the values to reset to, and per-field touched flags.
#[derive(Clone, Debug, PartialEq)]
pub struct MovieForm {
    initial: FormValues,
    values: FormValues,
    touched: [bool; FIELD_COUNT],
}

impl MovieForm {
    pub fn new(initial: FormValues) -> Self {
        let initial = initial.trimmed();
        Self { values: initial.clone(), initial, touched: Default::default() }
    }

    pub fn blank() -> Self {
        Self::new(FormValues::default())
    }

    pub fn from_movie(movie: &Movie) -> Self {
        Self::new(FormValues::from(movie))
    }

    /// Form seeded with `initial` but currently holding `values`, as after user edits.
    pub fn with_values(initial: FormValues, values: FormValues) -> Self {
        let mut form = Self::new(initial);
        form.values = values.trimmed();
        form
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(field)
    }

    pub fn set_value(&mut self, field: Field, value: impl Into<String>) {
        self.values.set(field, value);
    }

    pub fn touch(&mut self, field: Field) {
        self.touched[field.index()] = true;
    }

    pub fn is_touched(&self, field: Field) -> bool {
        self.touched[field.index()]
    }

    pub fn mark_all_as_touched(&mut self) {
        self.touched = [true; FIELD_COUNT];
    }

    pub fn error(&self, field: Field) -> Option<FieldError> {
        field.rule().check(self.value(field)).err()
    }

    /// Error to display under the field; hidden until the field has been touched.
    pub fn visible_error(&self, field: Field) -> Option<FieldError> {
        if self.is_touched(field) { self.error(field) } else { None }
    }

    pub fn invalid_fields(&self) -> Vec<Field> {
        Field::ALL.into_iter().filter(|f| self.error(*f).is_some()).collect()
    }

    pub fn is_valid(&self) -> bool {
        self.invalid_fields().is_empty()
    }

    pub fn reset(&mut self) {
        self.values = self.initial.clone();
        self.touched = Default::default();
    }

    /// Builds a record from the current values. The identifier is left unset.
    pub fn raw_value(&self) -> Result<Movie, InvalidForm> {
        let invalid = self.invalid_fields();
        if !invalid.is_empty() {
            return Err(InvalidForm(invalid));
        }

        let v = &self.values;
        let parse_err = |field| InvalidForm(vec![field]);
        Ok(Movie {
            id: None,
            title: v.title.clone(),
            photo_url: non_empty(&v.photo_url),
            release_date: parse_date(&v.release_date).map_err(|_| parse_err(Field::ReleaseDate))?,
            description: non_empty(&v.description),
            rating: parse_number(&v.rating).map_err(|_| parse_err(Field::Rating))?,
            reference_url: non_empty(&v.reference_url),
            genre: v.genre.parse().map_err(|_| parse_err(Field::Genre))?,
        })
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}
