//! Hits the real booking site. Run with `cargo test -- --ignored`.

use beeline::model::PassengerInfo;
use beeline::session::{Session, SessionOptions};
use chrono::{Duration, Utc};

#[tokio::test]
#[ignore = "talks to the live site"]
async fn departure_calendar_prices_ewr_to_ory() {
    let session = Session::new(&SessionOptions::default()).unwrap();
    let passengers = PassengerInfo::default();

    let availability = beeline::departure_availability(&session, "EWR", "ORY", &passengers)
        .await
        .unwrap();

    assert!(!availability.is_empty(), "no priced departure dates");
    for flight in availability.values() {
        assert!(flight.price > 0.0);
        assert!(!flight.currency.is_empty());
    }
}

#[tokio::test]
#[ignore = "talks to the live site"]
async fn return_fare_for_unpublished_date_is_none() {
    let session = Session::new(&SessionOptions::default()).unwrap();
    let passengers = PassengerInfo::default();

    let departure = (Utc::now() + Duration::days(60)).date_naive();
    // Far beyond the published calendar window.
    let unpublished = (Utc::now() + Duration::days(700)).date_naive();

    let fare = beeline::return_fare(&session, "EWR", "ORY", &passengers, departure, unpublished)
        .await
        .unwrap();
    assert!(fare.is_none());
}
