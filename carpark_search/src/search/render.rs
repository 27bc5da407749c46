use super::SearchState;
use crate::carpark::{Carpark, CarparkNumber};
use itertools::Itertools;

const SUBMIT_LABEL: &str = "Find Carpark";
const SUBMITTING_LABEL: &str = "Searching...";

#[derive(Debug, Clone, PartialEq)]
pub enum SearchDisplay {
    Idle,
    Loading,
    Message(String),
    NoResults { query: String },
    Results(Vec<CarparkCard>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CarparkCard {
    pub key: CarparkNumber,
    pub title: String,
    pub address: String,
    pub carpark_type: String,
    pub available_lots: i64,
    pub total_lots: String,
    pub distance: String,
    pub map_link: String,
}

impl From<&Carpark> for CarparkCard {
    fn from(carpark: &Carpark) -> Self {
        Self {
            key: carpark.carpark_number.clone(),
            title: carpark.display_title(),
            address: carpark.address.clone(),
            carpark_type: carpark.carpark_type.clone(),
            available_lots: carpark.available_lots,
            total_lots: carpark.total_lots_display(),
            distance: carpark.distance_display(),
            map_link: carpark.map_link(),
        }
    }
}

pub fn render(state: &SearchState) -> SearchDisplay {
    if state.is_loading {
        return SearchDisplay::Loading;
    }
    if let Some(message) = &state.error_message {
        return SearchDisplay::Message(message.clone());
    }
    if state.results.is_empty() {
        if state.has_searched {
            return SearchDisplay::NoResults {
                query: state.query.clone(),
            };
        }
        return SearchDisplay::Idle;
    }
    SearchDisplay::Results(state.results.iter().map(CarparkCard::from).collect_vec())
}

pub fn submit_label(state: &SearchState) -> &'static str {
    if state.is_loading {
        SUBMITTING_LABEL
    } else {
        SUBMIT_LABEL
    }
}

#[cfg(test)]
mod tests {
    use super::{render, submit_label, CarparkCard, SearchDisplay};
    use crate::carpark::Carpark;
    use crate::search::SearchState;
    use serde_json::json;

    fn carpark() -> Carpark {
        serde_json::from_value(json!({
            "carpark_number": "BM29",
            "address": "BLK 21 BUKIT MERAH ROAD",
            "type": "MULTI-STOREY CAR PARK",
            "available_lots": 87,
            "total_lots_static": 540,
            "distance": 1234.0,
            "coordinates": [1.23, 103.45]
        }))
        .unwrap()
    }

    #[test]
    fn test_nothing_is_shown_before_the_first_search() {
        assert_eq!(render(&SearchState::default()), SearchDisplay::Idle);
    }

    #[test]
    fn test_loading_wins_over_everything_else() {
        let state = SearchState {
            is_loading: true,
            has_searched: true,
            error_message: Some("stale".to_string()),
            results: vec![carpark()],
            ..Default::default()
        };
        assert_eq!(render(&state), SearchDisplay::Loading);
        assert_eq!(submit_label(&state), "Searching...");
    }

    #[test]
    fn test_error_message_is_shown_when_set() {
        let state = SearchState {
            has_searched: true,
            error_message: Some("Invalid postcode format.".to_string()),
            ..Default::default()
        };
        assert_eq!(
            render(&state),
            SearchDisplay::Message("Invalid postcode format.".to_string())
        );
        assert_eq!(submit_label(&state), "Find Carpark");
    }

    #[test]
    fn test_empty_search_without_error_shows_no_results() {
        let state = SearchState {
            query: "039803".to_string(),
            has_searched: true,
            ..Default::default()
        };
        assert_eq!(
            render(&state),
            SearchDisplay::NoResults {
                query: "039803".to_string()
            }
        );
    }

    #[test]
    fn test_results_render_one_card_per_carpark() {
        let state = SearchState {
            query: "039803".to_string(),
            has_searched: true,
            results: vec![carpark()],
            ..Default::default()
        };

        let expected = CarparkCard {
            key: "BM29".into(),
            title: "BLK 21 BUKIT MERAH ROAD".to_string(),
            address: "BLK 21 BUKIT MERAH ROAD".to_string(),
            carpark_type: "MULTI-STOREY CAR PARK".to_string(),
            available_lots: 87,
            total_lots: "540".to_string(),
            distance: "1.23 km".to_string(),
            map_link: "https://www.google.com/maps/search/?api=1&query=1.23,103.45".to_string(),
        };
        assert_eq!(render(&state), SearchDisplay::Results(vec![expected]));
    }
}
