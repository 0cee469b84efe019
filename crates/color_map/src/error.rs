//! Error types and result alias for the crate.
//!
//! This module defines [`enum@crate::error::Error`] and the crate-wide [Result] alias. Every
//! variant is a caller contract violation (out-of-range input, empty map, aliased
//! destination, unknown registry id, invalid configuration); none are transient.
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("{what} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        what: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("empty color map has no nearest entry")]
    EmptyMap,

    #[error("output color map is the same as an input color map")]
    Alias,

    #[error("missing color map '{id}'")]
    MissingMap { id: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub(crate) fn out_of_range(what: &'static str, value: f32, min: f32, max: f32) -> Self {
        Error::OutOfRange {
            what,
            value,
            min,
            max,
        }
    }
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Other(value)
    }
}

impl From<&str> for Error {
    fn from(value: &str) -> Self {
        Error::Other(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_string_uses_other_variant() {
        let err: Error = String::from("boom").into();
        matches!(err, Error::Other(_))
            .then_some(())
            .expect("expected Other variant");
    }

    #[test]
    fn from_str_allocates_owned_message() {
        let err: Error = "issue".into();
        assert!(matches!(err, Error::Other(ref msg) if msg == "issue"));
    }

    #[test]
    fn out_of_range_message_names_the_bounds() {
        let err = Error::out_of_range("t", 1.5, 0.0, 1.0);
        assert_eq!(err.to_string(), "t = 1.5 is outside [0, 1]");
    }
}
