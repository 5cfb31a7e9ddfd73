//! Cinema REST API client
//!
//! Thin async wrapper over the four endpoints the booking front end uses.
//! Calls return typed results; turning them into UI state is the caller's job.

use reqwest::{Client, Response, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::booking::{BookingConfirmation, BookingRequest};
use crate::config::ApiConfig;
use crate::error::{ConfigError, FetchError, SubmissionError};
use crate::screening::{MovieId, ScreeningKey};
use crate::seat::BookedSeats;

/// Entry of the now-playing list
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
}

/// Full movie record for the detail page
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct MovieDetails {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: String,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub original_language: String,
}

#[derive(Debug, Deserialize)]
struct NowPlayingResponse {
    results: Vec<MovieSummary>,
}

#[derive(Debug, Deserialize)]
struct BookedSeatsResponse {
    booked_seats: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ConfigError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(ConfigError::Client)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    fn url(&self, path: &str) -> Result<Url, ConfigError> {
        self.config.endpoint(path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        tracing::debug!(%url, "GET");
        let response = self
            .http
            .get(url.clone())
            .query(query)
            .send()
            .await
            .map_err(|source| FetchError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|e| FetchError::Decode {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    /// `GET /movies/now-playing`
    pub async fn now_playing(&self) -> Result<Vec<MovieSummary>, FetchError> {
        let url = self.url("movies/now-playing")?;
        let body: NowPlayingResponse = self.get_json(url, &[]).await?;
        Ok(body.results)
    }

    /// `GET /movies/{id}`
    pub async fn movie(&self, id: MovieId) -> Result<MovieDetails, FetchError> {
        let url = self.url(&format!("movies/{id}"))?;
        self.get_json(url, &[]).await
    }

    /// `GET /movies/{id}/seats?screening_date=&screening_time=`
    pub async fn booked_seats(&self, key: &ScreeningKey) -> Result<BookedSeats, FetchError> {
        let url = self.url(&format!("movies/{}/seats", key.movie_id))?;
        let query = [
            ("screening_date", key.date.to_string()),
            ("screening_time", key.time.as_str().to_string()),
        ];
        let body: BookedSeatsResponse = self.get_json(url, &query).await?;
        Ok(BookedSeats::from_wire(body.booked_seats))
    }

    /// `POST /bookings`
    pub async fn create_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<BookingConfirmation, SubmissionError> {
        let url = self.url("bookings")?;
        tracing::info!(
            %url,
            movie_id = request.movie_id,
            seats = request.seats.len(),
            "submitting booking"
        );
        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(SubmissionError::Request)?;

        if !response.status().is_success() {
            return Err(rejection(response).await);
        }

        response
            .json::<BookingConfirmation>()
            .await
            .map_err(|e| SubmissionError::Decode(e.to_string()))
    }
}

/// Build a rejection from a non-2xx response, keeping the server's `detail`
/// message when there is one.
async fn rejection(response: Response) -> SubmissionError {
    let status = response.status().as_u16();
    let detail = response
        .json::<ErrorBody>()
        .await
        .ok()
        .map(|body| match body.detail {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        });
    SubmissionError::Rejected { status, detail }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ApiClient {
        ApiClient::new(ApiConfig::new("http://localhost:8000/api").unwrap()).unwrap()
    }

    #[test]
    fn test_url_joins_under_base() {
        assert_eq!(
            client().url("bookings").unwrap().as_str(),
            "http://localhost:8000/api/bookings"
        );
    }

    #[test]
    fn test_bad_endpoint_is_an_error_not_the_base() {
        let err = client().url("http://[").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidApiUrl { .. }));

        let fetch: FetchError = err.into();
        assert!(fetch.to_string().starts_with("invalid endpoint"));
    }
}
