use scraper::{Html, Selector};

use crate::error::FareError;
use crate::model::Location;
use crate::session::Session;

const BOOKING_PAGE: &str = "https://us.frenchbee.com/en";

pub fn parse_airports(html: &str) -> Result<Vec<Location>, FareError> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("select#edit-visible-newsearch-flights-from option")
        .expect("valid selector");

    let airports: Vec<Location> = document
        .select(&selector)
        .filter_map(|option| {
            let code = option.value().attr("value")?.trim().to_string();
            if code.is_empty() {
                return None;
            }
            let name = option.text().collect::<String>().trim().to_string();
            Some(Location {
                code,
                name: (!name.is_empty()).then_some(name),
                terminal: None,
                transport: None,
            })
        })
        .collect();

    if airports.is_empty() {
        return Err(FareError::PageShapeChanged(
            "no origin airport select box on the booking page".into(),
        ));
    }
    Ok(airports)
}

/// Scrape the airports the booking form offers as origins.
pub async fn fetch_airports(session: &Session) -> Result<Vec<Location>, FareError> {
    let html = session.get_html(BOOKING_PAGE).await?;
    parse_airports(&html)
}
