use std::collections::HashMap;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PassengerInfo {
    pub adults: u32,
    pub children: u32,
    pub infants: u32,
}

impl Default for PassengerInfo {
    fn default() -> Self {
        Self {
            adults: 1,
            children: 0,
            infants: 0,
        }
    }
}

/// An airport plus whatever display metadata the booking page exposes.
/// Equality is by code.
#[derive(Debug, Clone, Serialize)]
pub struct Location {
    pub code: String,
    pub name: Option<String>,
    pub terminal: Option<String>,
    pub transport: Option<String>,
}

impl Location {
    pub fn from_code(code: &str) -> Self {
        Self {
            code: code.to_string(),
            name: None,
            terminal: None,
            transport: None,
        }
    }
}

impl PartialEq for Location {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Location {}

#[derive(Debug, Clone, Serialize)]
pub struct DateAndLocation {
    pub date: NaiveDate,
    pub location: Location,
}

/// Flight-time detail recovered from the itinerary page.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TripTimes {
    pub outbound_departure: Option<NaiveTime>,
    pub outbound_arrival: Option<NaiveTime>,
    pub inbound_departure: Option<NaiveTime>,
    pub inbound_arrival: Option<NaiveTime>,
}

/// One round trip. `times` starts empty and is filled in by the itinerary
/// scraper.
#[derive(Debug, Clone, Serialize)]
pub struct Trip {
    pub departure: DateAndLocation,
    pub returning: DateAndLocation,
    pub passengers: PassengerInfo,
    pub times: Option<TripTimes>,
}

impl Trip {
    pub fn new(
        origin: &str,
        destination: &str,
        departure_date: NaiveDate,
        return_date: NaiveDate,
        passengers: PassengerInfo,
    ) -> Self {
        Self {
            departure: DateAndLocation {
                date: departure_date,
                location: Location::from_code(origin),
            },
            returning: DateAndLocation {
                date: return_date,
                location: Location::from_code(destination),
            },
            passengers,
            times: None,
        }
    }
}

/// A priced calendar day for one leg. `day` always equals the date the fare
/// was nested under in the vendor payload.
#[derive(Debug, Clone, Serialize)]
pub struct Flight {
    pub departure_airport: String,
    pub arrival_airport: String,
    pub currency: String,
    pub day: NaiveDate,
    pub is_offer: bool,
    pub price: f64,
    pub tax: f64,
    pub total: f64,
}

pub type Availability = HashMap<NaiveDate, Flight>;

/// Both priced legs of a trip; a leg is absent when the vendor published no
/// fare for its date.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TripQuote {
    pub outbound: Option<Flight>,
    pub inbound: Option<Flight>,
}

impl TripQuote {
    /// Combined base price, present only when both legs priced.
    pub fn total(&self) -> Option<f64> {
        match (&self.outbound, &self.inbound) {
            (Some(out), Some(ret)) => Some(out.price + ret.price),
            _ => None,
        }
    }
}
