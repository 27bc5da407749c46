use carpark_search::query::SearchParameter;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "carpark_finder", version, about = "Find the nearest carparks in Singapore")]
pub struct Args {
    /// Search once, print the results and exit
    #[arg(short, long)]
    pub query: Option<String>,

    /// Search by postcode or by location, overriding `carpark_api.search_parameter`
    #[arg(long, value_enum)]
    pub variant: Option<Variant>,

    /// Directory holding base.yaml, defaults to ./configuration
    #[arg(long)]
    pub config_dir: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
    Postcode,
    Location,
}

impl From<Variant> for SearchParameter {
    fn from(value: Variant) -> Self {
        match value {
            Variant::Postcode => SearchParameter::Postcode,
            Variant::Location => SearchParameter::SearchQuery,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Search(String),
    Dismiss,
    Quit,
}

impl From<&str> for Command {
    fn from(line: &str) -> Self {
        match line.trim() {
            "/dismiss" => Command::Dismiss,
            "/quit" | "/exit" => Command::Quit,
            _ => Command::Search(line.to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Args, Command, Variant};
    use carpark_search::query::SearchParameter;
    use clap::Parser;
    use rstest::rstest;

    #[rstest]
    #[case("/dismiss", Command::Dismiss)]
    #[case(" /quit ", Command::Quit)]
    #[case("/exit", Command::Quit)]
    #[case("039803", Command::Search("039803".to_string()))]
    #[case("", Command::Search(String::new()))]
    fn test_input_lines_map_to_commands(#[case] line: &str, #[case] expected: Command) {
        assert_eq!(Command::from(line), expected)
    }

    #[test]
    fn test_location_variant_sends_search_query() {
        let args = Args::parse_from(["carpark_finder", "--variant", "location", "-q", "Bugis"]);
        assert_eq!(args.variant, Some(Variant::Location));
        assert_eq!(args.query.as_deref(), Some("Bugis"));
        assert_eq!(
            SearchParameter::from(Variant::Location),
            SearchParameter::SearchQuery
        );
    }
}
