use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct BannerConfig {
    pub storage_path: PathBuf,
}
