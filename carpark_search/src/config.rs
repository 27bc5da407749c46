use crate::query::SearchParameter;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct CarparkApiConfig {
    pub host: String,
    #[serde(default)]
    pub search_parameter: SearchParameter,
}

impl CarparkApiConfig {
    pub fn new(host: impl Into<String>, search_parameter: SearchParameter) -> Self {
        Self {
            host: host.into(),
            search_parameter,
        }
    }
}
