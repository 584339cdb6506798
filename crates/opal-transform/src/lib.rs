//! Feature table transformations.
//!
//! - [`availability`]: 0/1 presence encoding of feature columns
//! - [`validation`]: advisory comparison of columns with a dictionary

pub mod availability;
pub mod validation;

pub use availability::{EncodeOptions, encode_availability, presence_indicator};
pub use validation::{
    DICTIONARY_NAME_COLUMN, ValidationOutcome, compare_columns, validate_against_dictionary,
};
