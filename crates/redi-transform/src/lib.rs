//! REdI seed value transformation.
//!
//! This crate provides the value-level building blocks of reconciliation:
//!
//! - **encode**: raw text → typed [`Literal`](redi_model::Literal), NULL on blank or bad input
//! - **hash**: salted SHA-256 de-identification of person-level keys
//! - **normalization**: numeric and date parsing, categorical code tables

pub mod encode;
pub mod hash;
pub mod normalization;

pub use encode::{
    age_band_for_years, clock_duration_hours, encode_age_band, encode_bool, encode_date,
    encode_decimal, encode_integer, encode_text, given_name_from_full, surname_from_full,
};
pub use hash::{DEFAULT_HASH_SALT, IdentifierHasher, sha256_hex};
pub use normalization::categorical::{
    BOOKING_STATUS, CERT_STATUS, COURSE_STATUS, COURSE_TYPE, JOB_FAMILY, STREAM,
};
pub use normalization::{MissPolicy, Normalizer};
