//! # Clinic Types
//!
//! Validated value types shared by the clinic crates.
//!
//! These types guarantee their invariants at construction time, so code that holds one
//! never has to re-check it.

/// Errors that can occur when creating validated text types.
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("Text cannot be empty")]
    Empty,
}

/// Errors that can occur when parsing a patient age.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AgeError {
    #[error("age must be a whole number, got '{0}'")]
    NotANumber(String),
    #[error("age must be between 0 and {max}, got {0}", max = PatientAge::MAX)]
    OutOfRange(u64),
}

/// A string type that guarantees non-empty content.
///
/// This type wraps a `String` and ensures it contains at least one non-whitespace character.
/// The input is automatically trimmed of leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// The input is trimmed of leading and trailing whitespace. If the trimmed
    /// result is empty, an error is returned.
    ///
    /// # Arguments
    ///
    /// * `input` - Any type that can be converted to a string reference
    ///
    /// # Returns
    ///
    /// Returns `Ok(NonEmptyText)` if the trimmed input is non-empty,
    /// or `Err(TextError::Empty)` if it's empty or contains only whitespace.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A patient age in whole years, bounded to `0..=150`.
///
/// Form input arrives as text, so the usual way in is [`PatientAge::parse`]. The
/// `Display` output is the canonical decimal form, which is what gets stored on the
/// patient record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct PatientAge(u8);

impl PatientAge {
    /// Oldest age accepted.
    pub const MAX: u8 = 150;

    /// Creates a `PatientAge` from a number of years.
    pub fn new(years: u64) -> Result<Self, AgeError> {
        if years > u64::from(Self::MAX) {
            return Err(AgeError::OutOfRange(years));
        }
        Ok(Self(years as u8))
    }

    /// Parses an age from form text.
    ///
    /// Leading and trailing whitespace is ignored. Signs, decimals, and anything else that
    /// is not a plain run of digits is rejected as `AgeError::NotANumber`.
    pub fn parse(input: &str) -> Result<Self, AgeError> {
        let trimmed = input.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AgeError::NotANumber(trimmed.to_owned()));
        }
        // Digit-only strings only fail to parse on overflow.
        let years = trimmed
            .parse::<u64>()
            .map_err(|_| AgeError::OutOfRange(u64::MAX))?;
        Self::new(years)
    }

    /// Returns the age in years.
    pub fn years(self) -> u8 {
        self.0
    }
}

impl std::fmt::Display for PatientAge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PatientAge {
    type Err = AgeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
