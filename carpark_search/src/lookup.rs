use crate::carpark::Carpark;
use crate::config::CarparkApiConfig;
use crate::query::SearchQuery;
use anyhow::Context;
use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::Deserialize;
use shared_kernel::http_client::{HttpClient, HttpClientError};
use thiserror::Error;
use url::Url;

const FIND_CARPARK_PATH: &str = "/find-carpark";
const RESULT_LIMIT: u32 = 10;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Carpark lookup was rejected: {}", .detail.as_deref().unwrap_or("no detail given"))]
    Rejected { detail: Option<String> },
    #[error(transparent)]
    Unavailable(#[from] anyhow::Error),
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait CarparkLookupApi: Send + Sync {
    async fn find_carparks(&self, query: &SearchQuery) -> Result<Vec<Carpark>, LookupError>;
}

/// Body of a non-2xx answer. `detail` is only trusted when it is a non-empty string.
#[derive(Deserialize, Debug)]
struct ErrorResponse {
    #[serde(default)]
    detail: Option<serde_json::Value>,
}

impl ErrorResponse {
    fn into_detail(self) -> Option<String> {
        match self.detail {
            Some(serde_json::Value::String(detail)) if !detail.trim().is_empty() => Some(detail),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct HttpCarparkLookup {
    config: CarparkApiConfig,
}

impl HttpCarparkLookup {
    pub fn new(config: CarparkApiConfig) -> Self {
        Self { config }
    }

    pub fn search_url(&self, query: &SearchQuery) -> anyhow::Result<Url> {
        let host_with_path = format!(
            "{}{}",
            self.config.host.trim_end_matches('/'),
            FIND_CARPARK_PATH
        );
        Url::parse_with_params(
            &host_with_path,
            &[
                (query.parameter().as_str(), query.text().inner()),
                ("limit", RESULT_LIMIT.to_string()),
            ],
        )
        .context("Failed to parse url")
    }
}

#[async_trait]
impl CarparkLookupApi for HttpCarparkLookup {
    #[tracing::instrument(err, skip(self), level = "info")]
    async fn find_carparks(&self, query: &SearchQuery) -> Result<Vec<Carpark>, LookupError> {
        let url = self.search_url(query)?;
        HttpClient::get_json::<Vec<Carpark>>(url)
            .await
            .map_err(|error| match error.rejection_body::<ErrorResponse>() {
                Some(Ok(body)) => LookupError::Rejected {
                    detail: body.into_detail(),
                },
                Some(Err(decode_error)) => {
                    LookupError::Unavailable(decode_error.context(error.to_string()))
                }
                None => LookupError::Unavailable(into_anyhow(error)),
            })
    }
}

fn into_anyhow(error: HttpClientError) -> anyhow::Error {
    match error {
        HttpClientError::ResponseError(error) => error,
        rejected => anyhow::Error::new(rejected),
    }
}
