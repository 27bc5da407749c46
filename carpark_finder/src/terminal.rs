use carpark_search::query::SearchParameter;
use carpark_search::search::{CarparkCard, SearchDisplay};
use std::io::Write;

const TITLE: &str = "Nearest Carpark Finder (SG)";
const LOADING: &str = "Loading carparks...";
const RESULTS_HEADING: &str = "Found Carpark Results";

fn input_label(parameter: SearchParameter) -> &'static str {
    match parameter {
        SearchParameter::Postcode => "Enter Singapore Postcode (e.g., 039803)",
        SearchParameter::SearchQuery => "Enter a location (e.g., Marina Bay Sands)",
    }
}

pub fn write_title(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{TITLE}")?;
    writeln!(out, "Type /dismiss to hide the announcement, /quit to leave.")
}

pub fn write_banner(out: &mut impl Write, message: &str) -> std::io::Result<()> {
    writeln!(out, "*** {message} ***")
}

pub fn write_prompt(
    out: &mut impl Write,
    parameter: SearchParameter,
    submit_label: &str,
) -> std::io::Result<()> {
    write!(out, "{} [{submit_label}]> ", input_label(parameter))?;
    out.flush()
}

pub fn write_display(out: &mut impl Write, display: &SearchDisplay) -> std::io::Result<()> {
    match display {
        SearchDisplay::Idle => Ok(()),
        SearchDisplay::Loading => writeln!(out, "{LOADING}"),
        SearchDisplay::Message(message) => writeln!(out, "{message}"),
        SearchDisplay::NoResults { query } => {
            writeln!(out, "No suitable carparks found for \"{query}\".")
        }
        SearchDisplay::Results(cards) => {
            writeln!(out, "{RESULTS_HEADING}")?;
            cards.iter().try_for_each(|card| write_card(out, card))
        }
    }
}

fn write_card(out: &mut impl Write, card: &CarparkCard) -> std::io::Result<()> {
    writeln!(out)?;
    writeln!(out, "  {}", card.title)?;
    writeln!(out, "    Code: {}", card.key)?;
    writeln!(out, "    Address: {}", card.address)?;
    writeln!(out, "    Type: {}", card.carpark_type)?;
    writeln!(out, "    Available Lots: {}", card.available_lots)?;
    writeln!(out, "    Total Lots (Static): {}", card.total_lots)?;
    writeln!(out, "    Distance: {}", card.distance)?;
    writeln!(out, "    View on Google Maps: {}", card.map_link)
}
