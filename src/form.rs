use chrono::NaiveDate;

use crate::model::PassengerInfo;

pub const SEARCH_URL: &str = "https://us.frenchbee.com/en?ajax_form=1";

const FORM_ID: &str = "frenchbee-amadeus-search-flights-form";

/// Which widget of the booking form "triggered" the request. The backend
/// keys its answer on this: the destination picker populates the departure
/// calendar, the departure-date picker populates the return calendar, and
/// the return-date picker yields the itinerary fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Widget {
    DepartureCalendar,
    ReturnCalendar,
    ItineraryDetail,
}

impl Widget {
    pub fn triggering_element(self) -> &'static str {
        match self {
            Self::DepartureCalendar => "visible_newsearch_flights_to",
            Self::ReturnCalendar => "visible_newsearch_flights_departure_date",
            Self::ItineraryDetail => "visible_newsearch_flights_return_date",
        }
    }
}

fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Build the vendor form payload. Field names are French Bee's contract,
/// verbatim; trip type is always round-trip. No validation happens here:
/// whatever the caller passes goes on the wire.
pub fn search_form(
    source: &str,
    destination: &str,
    passengers: &PassengerInfo,
    departure: Option<NaiveDate>,
    return_date: Option<NaiveDate>,
    widget: Widget,
) -> Vec<(String, String)> {
    let fields = [
        ("visible_newsearch_flights_travel_type", "R".to_string()),
        ("visible_newsearch_flights_from", source.to_string()),
        ("visible_newsearch_flights_to", destination.to_string()),
        ("newsearch_flights_travel_type", "R".to_string()),
        ("newsearch_flights_from", source.to_string()),
        ("newsearch_flights_to", destination.to_string()),
        ("newsearch_flights_departure_date", format_date(departure)),
        ("newsearch_flights_return_date", format_date(return_date)),
        ("adults-count", passengers.adults.to_string()),
        ("children-count", passengers.children.to_string()),
        ("infants-count", passengers.infants.to_string()),
        ("um_youth-count", "0".to_string()),
        ("form_id", FORM_ID.to_string()),
        (
            "_triggering_element_name",
            widget.triggering_element().to_string(),
        ),
    ];

    fields
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}
