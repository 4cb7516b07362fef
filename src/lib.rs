pub mod airports;
pub mod cache;
pub mod calendar;
pub mod command;
pub mod error;
pub mod form;
pub mod itinerary;
pub mod model;
pub mod session;
pub mod table;
pub mod token;

use chrono::NaiveDate;

use command::Leg;
use error::FareError;
use form::Widget;
use model::{Availability, Flight, PassengerInfo, Trip, TripQuote};
use session::Session;

async fn leg_availability(
    session: &Session,
    source: &str,
    destination: &str,
    passengers: &PassengerInfo,
    departure: Option<NaiveDate>,
    leg: Leg,
    widget: Widget,
) -> Result<Availability, FareError> {
    let fields = form::search_form(source, destination, passengers, departure, None, widget);
    let body = session.post_form(form::SEARCH_URL, &fields).await?;
    let commands = command::parse_commands(&body)?;
    match command::calendar_payload(&commands, leg)? {
        Some(payload) => calendar::normalize(payload),
        None => Ok(Availability::new()),
    }
}

pub async fn departure_availability(
    session: &Session,
    source: &str,
    destination: &str,
    passengers: &PassengerInfo,
) -> Result<Availability, FareError> {
    leg_availability(
        session,
        source,
        destination,
        passengers,
        None,
        Leg::Departure,
        Widget::DepartureCalendar,
    )
    .await
}

/// Must run on the same session as the departure query; the backend keys
/// the return calendar on session state.
pub async fn return_availability(
    session: &Session,
    source: &str,
    destination: &str,
    passengers: &PassengerInfo,
    departure: NaiveDate,
) -> Result<Availability, FareError> {
    leg_availability(
        session,
        source,
        destination,
        passengers,
        Some(departure),
        Leg::Return,
        Widget::ReturnCalendar,
    )
    .await
}

/// `None` when the vendor published no price for that date.
pub async fn departure_fare(
    session: &Session,
    source: &str,
    destination: &str,
    passengers: &PassengerInfo,
    date: NaiveDate,
) -> Result<Option<Flight>, FareError> {
    let mut availability = departure_availability(session, source, destination, passengers).await?;
    Ok(availability.remove(&date))
}

pub async fn return_fare(
    session: &Session,
    source: &str,
    destination: &str,
    passengers: &PassengerInfo,
    departure: NaiveDate,
    date: NaiveDate,
) -> Result<Option<Flight>, FareError> {
    let mut availability =
        return_availability(session, source, destination, passengers, departure).await?;
    Ok(availability.remove(&date))
}

/// Price both legs of a trip. The return query is skipped when the
/// departure date has no fare.
pub async fn price_trip(session: &Session, trip: &Trip) -> Result<TripQuote, FareError> {
    let source = &trip.departure.location.code;
    let destination = &trip.returning.location.code;

    let outbound = departure_fare(
        session,
        source,
        destination,
        &trip.passengers,
        trip.departure.date,
    )
    .await?;

    let inbound = match &outbound {
        Some(_) => {
            return_fare(
                session,
                source,
                destination,
                &trip.passengers,
                trip.departure.date,
                trip.returning.date,
            )
            .await?
        }
        None => None,
    };

    Ok(TripQuote { outbound, inbound })
}
