use serde::Deserialize;
use shared_kernel::non_empty_string;
use thiserror::Error;

const POSTCODE_MAX_LENGTH: usize = 6;

non_empty_string!(SearchText);

/// The two front-end editions only differ in the query parameter they send.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchParameter {
    #[default]
    Postcode,
    SearchQuery,
}

impl SearchParameter {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchParameter::Postcode => "postcode",
            SearchParameter::SearchQuery => "search_query",
        }
    }

    pub fn max_length(&self) -> Option<usize> {
        match self {
            SearchParameter::Postcode => Some(POSTCODE_MAX_LENGTH),
            SearchParameter::SearchQuery => None,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum QueryError {
    #[error("Search text cannot be empty")]
    Empty,
    #[error("A {parameter} has at most {max} characters, got {actual}")]
    TooLong {
        parameter: &'static str,
        max: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    parameter: SearchParameter,
    text: SearchText,
}

impl SearchQuery {
    pub fn new(parameter: SearchParameter, text: impl Into<String>) -> Result<Self, QueryError> {
        let text: String = text.into();
        let text = SearchText::try_from(text).map_err(|_| QueryError::Empty)?;
        let actual = text.as_ref().chars().count();
        if let Some(max) = parameter.max_length().filter(|max| actual > *max) {
            return Err(QueryError::TooLong {
                parameter: parameter.as_str(),
                max,
                actual,
            });
        }
        Ok(Self { parameter, text })
    }

    pub fn parameter(&self) -> SearchParameter {
        self.parameter
    }

    pub fn text(&self) -> &SearchText {
        &self.text
    }
}
