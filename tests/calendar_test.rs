use beeline::calendar::normalize;
use beeline::error::FareError;
use chrono::NaiveDate;
use serde_json::{json, Map, Value};

fn fare(price: f64) -> Value {
    json!({
        "arrival_airport": "ORY",
        "currency": "USD",
        "day": "2026-10-02",
        "departure_airport": "EWR",
        "is_offer": false,
        "price": price,
        "tax": 55.31,
        "total": price + 55.31
    })
}

fn payload(value: Value) -> Map<String, Value> {
    value.as_object().unwrap().clone()
}

#[test]
fn keys_flight_at_nested_date() {
    let input = payload(json!({"2026": {"10": {"2": fare(299.0)}}}));
    let fares = normalize(&input).unwrap();

    let date = NaiveDate::from_ymd_opt(2026, 10, 2).unwrap();
    let flight = fares.get(&date).unwrap();
    assert_eq!(flight.day, date);
    assert_eq!(flight.departure_airport, "EWR");
    assert_eq!(flight.arrival_airport, "ORY");
    assert_eq!(flight.currency, "USD");
    assert!(!flight.is_offer);
    assert_eq!(flight.price, 299.0);
    assert_eq!(flight.tax, 55.31);
}

#[test]
fn output_size_equals_leaf_count() {
    let input = payload(json!({
        "2026": {
            "10": {"2": fare(299.0), "3": fare(310.0), "4": fare(275.0)},
            "11": {"15": fare(199.0)}
        },
        "2027": {"1": {"8": fare(350.0)}}
    }));
    let fares = normalize(&input).unwrap();
    assert_eq!(fares.len(), 5);
}

#[test]
fn empty_payload_is_empty_availability() {
    let input = payload(json!({}));
    assert!(normalize(&input).unwrap().is_empty());
}

#[test]
fn month_13_is_a_date_error() {
    let input = payload(json!({"2022": {"13": {"1": fare(299.0)}}}));
    match normalize(&input) {
        Err(FareError::InvalidDate(date)) => assert_eq!(date, "2022-13-1"),
        other => panic!("expected InvalidDate, got {other:?}"),
    }
}

#[test]
fn february_30_is_a_date_error() {
    let input = payload(json!({"2026": {"2": {"30": fare(299.0)}}}));
    assert!(matches!(
        normalize(&input),
        Err(FareError::InvalidDate(_))
    ));
}

#[test]
fn non_integer_year_key_is_a_date_error() {
    let input = payload(json!({"year": {"10": {"2": fare(299.0)}}}));
    assert!(matches!(
        normalize(&input),
        Err(FareError::InvalidDate(_))
    ));
}

#[test]
fn missing_required_field_is_a_decode_error() {
    let mut record = fare(299.0);
    record.as_object_mut().unwrap().remove("price");
    let input = payload(json!({"2026": {"10": {"2": record}}}));
    assert!(matches!(normalize(&input), Err(FareError::FareDecode(_))));
}

#[test]
fn non_object_months_is_a_decode_error() {
    let input = payload(json!({"2026": "oops"}));
    assert!(matches!(normalize(&input), Err(FareError::FareDecode(_))));
}

#[test]
fn nesting_beats_the_record_day_field() {
    // The record claims another day; the calendar position is authoritative.
    let mut record = fare(299.0);
    record
        .as_object_mut()
        .unwrap()
        .insert("day".into(), json!("1999-01-01"));
    let input = payload(json!({"2026": {"10": {"6": record}}}));

    let fares = normalize(&input).unwrap();
    let date = NaiveDate::from_ymd_opt(2026, 10, 6).unwrap();
    assert_eq!(fares.get(&date).unwrap().day, date);
}

#[test]
fn offer_flag_survives() {
    let mut record = fare(199.0);
    record
        .as_object_mut()
        .unwrap()
        .insert("is_offer".into(), json!(true));
    let input = payload(json!({"2026": {"12": {"24": record}}}));

    let date = NaiveDate::from_ymd_opt(2026, 12, 24).unwrap();
    assert!(normalize(&input).unwrap().get(&date).unwrap().is_offer);
}
