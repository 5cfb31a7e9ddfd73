//! Error taxonomy for the booking workflow and the REST client

use chrono::NaiveDate;
use thiserror::Error;

/// Failure to retrieve movies, movie details or booked seats.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure (connection refused, timeout, ...)
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The API answered with a non-success status
    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    /// The response body did not match the expected shape
    #[error("could not decode response from {url}: {reason}")]
    Decode { url: String, reason: String },
    /// The endpoint URL could not be built from the configured base
    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] ConfigError),
}

/// A submission precondition that was not met. No request is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please select a screening date")]
    MissingDate,

    #[error("Please select a screening time")]
    MissingTime,

    #[error("Please select at least one seat")]
    NoSeats,

    #[error("{0} is not an offered screening date")]
    DateUnavailable(NaiveDate),

    #[error("A booking is already being submitted")]
    AlreadySubmitting,
}

/// Failure of the booking POST.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Transport failure, including the request timeout
    #[error("could not reach the booking service: {0}")]
    Request(#[source] reqwest::Error),

    /// The API refused the booking
    #[error("booking rejected (status {status}){}", detail_suffix(.detail))]
    Rejected { status: u16, detail: Option<String> },

    /// The confirmation body was not understood
    #[error("could not decode booking confirmation: {0}")]
    Decode(String),
    /// The endpoint URL could not be built from the configured base
    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] ConfigError),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default()
}

/// Invalid or missing startup configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("API base URL is empty")]
    MissingApiUrl,

    #[error("API base URL {url:?} is invalid: {reason}")]
    InvalidApiUrl { url: String, reason: String },

    #[error("a user email is required in production")]
    MissingIdentity,

    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Invalid seat grid dimensions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("a seat grid needs at least one row and one seat per row")]
    Empty,

    /// Row letters stop at 'Z'
    #[error("{0} rows requested, at most 26 are supported")]
    TooManyRows(u16),
}

/// A string that is not a seat identifier like "C7".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid seat identifier {0:?}")]
pub struct SeatIdError(pub String);
