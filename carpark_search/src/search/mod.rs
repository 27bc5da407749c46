use crate::carpark::Carpark;
use crate::lookup::{CarparkLookupApi, LookupError};
use crate::query::{QueryError, SearchParameter, SearchQuery};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

mod render;

pub use render::{render, submit_label, CarparkCard, SearchDisplay};

pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred. Please check your input.";
pub const CONNECTIVITY_ERROR_MESSAGE: &str = "Could not connect to the server or an unexpected error occurred. Please ensure the backend is running.";

pub fn no_suitable_carparks_message(parameter: SearchParameter) -> &'static str {
    match parameter {
        SearchParameter::Postcode => {
            "No suitable carparks found for this postcode. Please try a different one."
        }
        SearchParameter::SearchQuery => {
            "No suitable carparks found for this location. Please try a different one."
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<Carpark>,
    pub error_message: Option<String>,
    pub is_loading: bool,
    pub has_searched: bool,
}

impl SearchState {
    fn begin(&mut self, query: String) {
        self.query = query;
        self.results.clear();
        self.error_message = None;
        self.is_loading = true;
        self.has_searched = true;
    }

    fn settle(&mut self, parameter: SearchParameter, outcome: Result<Vec<Carpark>, LookupError>) {
        match outcome {
            Ok(carparks) if carparks.is_empty() => {
                self.error_message = Some(no_suitable_carparks_message(parameter).to_string());
            }
            Ok(carparks) => self.results = carparks,
            Err(LookupError::Rejected { detail }) => {
                self.error_message =
                    Some(detail.unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string()));
            }
            Err(LookupError::Unavailable(error)) => {
                tracing::error!("Carpark lookup failed: {error:?}");
                self.error_message = Some(CONNECTIVITY_ERROR_MESSAGE.to_string());
            }
        }
        self.is_loading = false;
    }
}

/// Owns the search state and publishes every change to its subscribers.
///
/// Each submission takes a sequence token; a response is only applied while its
/// token is still the latest one issued, so a slow earlier search can never
/// overwrite a newer one.
pub struct SearchView {
    api: Arc<dyn CarparkLookupApi>,
    parameter: SearchParameter,
    latest_request: AtomicU64,
    state: watch::Sender<SearchState>,
}

impl SearchView {
    pub fn new(api: Arc<dyn CarparkLookupApi>, parameter: SearchParameter) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            api,
            parameter,
            latest_request: AtomicU64::new(0),
            state,
        }
    }

    pub fn parameter(&self) -> SearchParameter {
        self.parameter
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> SearchState {
        self.state.borrow().clone()
    }

    pub fn display(&self) -> SearchDisplay {
        render(&self.state.borrow())
    }

    #[tracing::instrument(skip(self), level = "info")]
    pub async fn submit(&self, query: String) -> Result<(), QueryError> {
        let query = SearchQuery::new(self.parameter, query)?;

        let mut token = 0;
        self.state.send_modify(|state| {
            token = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
            state.begin(query.text().inner());
        });

        let outcome = self.api.find_carparks(&query).await;

        self.state.send_if_modified(|state| {
            if self.latest_request.load(Ordering::SeqCst) != token {
                tracing::debug!(token, "Discarding response of a superseded search");
                return false;
            }
            state.settle(self.parameter, outcome);
            true
        });

        Ok(())
    }
}
