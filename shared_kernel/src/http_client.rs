use anyhow::{Context, Error};
use bytes::Bytes;
use lazy_static::lazy_static;
use reqwest::Response;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use serde::de::DeserializeOwned;
use thiserror::Error as ThisError;
use url::Url;

pub use reqwest::StatusCode;

lazy_static! {
    // Requests are never retried: a failed lookup is reported to the user as is.
    static ref CLIENT: ClientWithMiddleware = ClientBuilder::new(reqwest::Client::new())
        .with(TracingMiddleware::default())
        .build();
}

pub struct HttpClient;

#[derive(ThisError, Debug)]
pub enum HttpClientError {
    #[error(transparent)]
    ResponseError(#[from] Error),
    #[error("Request to {url} was rejected with status {status}")]
    Rejected {
        url: Url,
        status: StatusCode,
        body: Bytes,
    },
}

impl HttpClientError {
    /// Decodes the body of a rejected response. `None` for any other error.
    pub fn rejection_body<DTO: DeserializeOwned>(&self) -> Option<anyhow::Result<DTO>> {
        match self {
            HttpClientError::Rejected { body, .. } => Some(
                serde_json::from_slice::<DTO>(body)
                    .context("Failed to deserialize rejected response body"),
            ),
            HttpClientError::ResponseError(_) => None,
        }
    }
}

impl HttpClient {
    async fn get(url: Url) -> Result<Response, HttpClientError> {
        let response = CLIENT
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("Failed to fetch request from {url}"))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read rejected response from {url}"))?;
        Err(HttpClientError::Rejected { url, status, body })
    }

    pub async fn get_json<DTO: DeserializeOwned>(url: Url) -> Result<DTO, HttpClientError> {
        let response = Self::get(url).await?;
        let err_msg = format!("Failed to deserialize response {response:?}");
        response
            .json::<DTO>()
            .await
            .context(err_msg)
            .map_err(HttpClientError::ResponseError)
    }
}
