use carpark_search::config::CarparkApiConfig;
use serde::Deserialize;
use shared_kernel::configuration::{config, config_from};
use std::path::Path;
use update_banner::config::BannerConfig;

#[derive(Deserialize, Debug)]
pub struct Settings {
    pub carpark_api: CarparkApiConfig,
    pub banner: BannerConfig,
}

impl Settings {
    pub fn parse(configuration_directory: Option<&Path>) -> anyhow::Result<Self> {
        match configuration_directory {
            Some(directory) => config_from::<Self>(directory),
            None => config::<Self>(),
        }
    }
}
