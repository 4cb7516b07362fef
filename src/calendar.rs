use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::FareError;
use crate::model::{Availability, Flight};

/// The vendor's per-day fare record. Its own `day` string is ignored; the
/// calendar position the record was nested under is authoritative.
#[derive(Debug, Deserialize)]
struct FareRecord {
    arrival_airport: String,
    currency: String,
    departure_airport: String,
    is_offer: bool,
    price: f64,
    tax: f64,
    total: f64,
}

fn leaf_date(year: &str, month: &str, day: &str) -> Result<NaiveDate, FareError> {
    let triple = || format!("{year}-{month}-{day}");

    let y: i32 = year.parse().map_err(|_| FareError::InvalidDate(triple()))?;
    let m: u32 = month.parse().map_err(|_| FareError::InvalidDate(triple()))?;
    let d: u32 = day.parse().map_err(|_| FareError::InvalidDate(triple()))?;

    NaiveDate::from_ymd_opt(y, m, d).ok_or_else(|| FareError::InvalidDate(triple()))
}

fn as_object<'a>(value: &'a Value, context: &str) -> Result<&'a Map<String, Value>, FareError> {
    value
        .as_object()
        .ok_or_else(|| FareError::FareDecode(format!("expected an object under \"{context}\"")))
}

/// Flatten the vendor's year/month/day nesting into a date-keyed map.
/// Every leaf fare becomes exactly one entry; malformed dates and incomplete
/// fare records propagate as errors rather than being skipped.
pub fn normalize(payload: &Map<String, Value>) -> Result<Availability, FareError> {
    let mut fares = Availability::new();

    for (year, months) in payload {
        for (month, days) in as_object(months, year)? {
            for (day, fare) in as_object(days, month)? {
                let date = leaf_date(year, month, day)?;
                let record: FareRecord = serde_json::from_value(fare.clone())
                    .map_err(|e| FareError::FareDecode(format!("{date}: {e}")))?;
                fares.insert(
                    date,
                    Flight {
                        departure_airport: record.departure_airport,
                        arrival_airport: record.arrival_airport,
                        currency: record.currency,
                        day: date,
                        is_offer: record.is_offer,
                        price: record.price,
                        tax: record.tax,
                        total: record.total,
                    },
                );
            }
        }
    }

    Ok(fares)
}
