use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::Path;

pub fn config<Settings: DeserializeOwned>() -> anyhow::Result<Settings> {
    let base_path = std::env::current_dir().context("Failed to determine the current directory")?;
    config_from(base_path.join("configuration"))
}

/// Loads `base.yaml` (`test.yaml` under test) from `configuration_directory`,
/// overlaid by `APP_` prefixed environment variables, e.g. `APP_CARPARK_API__HOST`.
pub fn config_from<Settings: DeserializeOwned>(
    configuration_directory: impl AsRef<Path>,
) -> anyhow::Result<Settings> {
    let file = if cfg!(test) { "test.yaml" } else { "base.yaml" };
    let settings = config::Config::builder()
        .add_source(config::File::from(
            configuration_directory.as_ref().join(file),
        ))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .context("Failed to build configuration")?;

    settings
        .try_deserialize::<Settings>()
        .context("Failed to deserialize settings")
}

#[cfg(test)]
mod tests {
    use super::config_from;
    use serde::Deserialize;
    use std::fs;

    #[derive(Deserialize, Debug)]
    struct Settings {
        carpark_api: ApiSettings,
    }

    #[derive(Deserialize, Debug)]
    struct ApiSettings {
        host: String,
        search_parameter: String,
    }

    #[test]
    fn test_settings_are_read_from_the_test_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("test.yaml"),
            "carpark_api:\n  host: \"http://127.0.0.1:5000\"\n  search_parameter: postcode\n",
        )
        .unwrap();

        let settings = config_from::<Settings>(dir.path()).unwrap();
        assert_eq!(settings.carpark_api.host, "http://127.0.0.1:5000");
        assert_eq!(settings.carpark_api.search_parameter, "postcode");
    }

    #[test]
    fn test_missing_configuration_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = config_from::<Settings>(dir.path());
        assert!(result.is_err());
    }
}
