use beeline::error::FareError;
use beeline::itinerary::{
    apply_schedule, extract_config_block, scrape_form, CONFIG_PREFIX, CONFIG_TRAILER,
};
use beeline::model::{PassengerInfo, Trip};
use chrono::{NaiveDate, NaiveTime};
use serde_json::json;

#[test]
fn extracts_simple_block() {
    let page = r#"<script>FlexPricer.init({"pageId":"availability"});</script>"#;
    let block = extract_config_block(page, CONFIG_PREFIX, CONFIG_TRAILER).unwrap();
    assert_eq!(block, r#"{"pageId":"availability"}"#);
}

#[test]
fn extracts_block_with_nested_braces() {
    let page = r#"junk before
        FlexPricer.init({"journey":{"outbound":{"departureTime":"10:35"}}});
        junk after"#;
    let block = extract_config_block(page, CONFIG_PREFIX, CONFIG_TRAILER).unwrap();
    let config: serde_json::Value = serde_json::from_str(block).unwrap();
    assert_eq!(config["journey"]["outbound"]["departureTime"], "10:35");
}

#[test]
fn missing_prefix_yields_none() {
    let page = r#"<script>OtherWidget.init({"a":1});</script>"#;
    assert!(extract_config_block(page, CONFIG_PREFIX, CONFIG_TRAILER).is_none());
}

#[test]
fn missing_trailer_yields_none() {
    let page = r#"FlexPricer.init({"a":1}"#;
    assert!(extract_config_block(page, CONFIG_PREFIX, CONFIG_TRAILER).is_none());
}

#[test]
fn missing_open_brace_yields_none() {
    let page = "FlexPricer.init();";
    assert!(extract_config_block(page, CONFIG_PREFIX, CONFIG_TRAILER).is_none());
}

#[test]
fn trailer_before_any_close_brace_yields_none() {
    let page = "FlexPricer.init({);";
    assert!(extract_config_block(page, CONFIG_PREFIX, CONFIG_TRAILER).is_none());
}

#[test]
fn scrapes_action_and_inputs() {
    let fragment = r#"
        <form method="post" action="https://secure.frenchbee.com/search">
            <input type="hidden" name="B_LOCATION_1" value="EWR"/>
            <input type="hidden" name="E_LOCATION_1" value="ORY"/>
            <input name="TRIP_TYPE" value="R">
        </form>"#;

    let form = scrape_form(fragment).unwrap();
    assert_eq!(form.action, "https://secure.frenchbee.com/search");
    assert_eq!(form.fields.len(), 3);
    assert!(form
        .fields
        .contains(&("B_LOCATION_1".to_string(), "EWR".to_string())));
    assert!(form
        .fields
        .contains(&("TRIP_TYPE".to_string(), "R".to_string())));
}

#[test]
fn tolerates_reversed_attribute_order() {
    let fragment = r#"<form action="/deep"><input value="2026-10-02" type="hidden" name="DATE_1"></form>"#;
    let form = scrape_form(fragment).unwrap();
    assert_eq!(form.fields, vec![("DATE_1".to_string(), "2026-10-02".to_string())]);
}

#[test]
fn unescapes_html_entities() {
    let fragment =
        r#"<form action="/go?a=1&amp;b=2"><input name="CITY" value="R&#233;union"></form>"#;
    let form = scrape_form(fragment).unwrap();
    assert_eq!(form.action, "/go?a=1&b=2");
    assert_eq!(form.fields[0].1, "Réunion");
}

#[test]
fn unnamed_inputs_are_skipped_and_valueless_submit_empty() {
    let fragment = r#"<form action="/x">
        <input type="submit" value="Search">
        <input type="hidden" name="EMPTY_ONE">
    </form>"#;
    let form = scrape_form(fragment).unwrap();
    assert_eq!(form.fields, vec![("EMPTY_ONE".to_string(), String::new())]);
}

#[test]
fn missing_action_is_a_shape_error() {
    let fragment = r#"<div><input name="A" value="1"></div>"#;
    assert!(matches!(
        scrape_form(fragment),
        Err(FareError::PageShapeChanged(_))
    ));
}

fn test_trip() -> Trip {
    Trip::new(
        "EWR",
        "ORY",
        NaiveDate::from_ymd_opt(2026, 10, 2).unwrap(),
        NaiveDate::from_ymd_opt(2026, 10, 12).unwrap(),
        PassengerInfo::default(),
    )
}

#[test]
fn apply_schedule_fills_trip_times() {
    let mut trip = test_trip();
    let config = json!({
        "pageId": "FlexPricerAvailability",
        "journey": {
            "outbound": {"departureTime": "10:35", "arrivalTime": "22:50"},
            "inbound": {"departureTime": "09:15", "arrivalTime": "12:40"}
        }
    });

    apply_schedule(&mut trip, &config);

    let times = trip.times.unwrap();
    assert_eq!(
        times.outbound_departure,
        NaiveTime::from_hms_opt(10, 35, 0)
    );
    assert_eq!(times.outbound_arrival, NaiveTime::from_hms_opt(22, 50, 0));
    assert_eq!(times.inbound_departure, NaiveTime::from_hms_opt(9, 15, 0));
    assert_eq!(times.inbound_arrival, NaiveTime::from_hms_opt(12, 40, 0));
}

#[test]
fn apply_schedule_without_journey_leaves_trip_untouched() {
    let mut trip = test_trip();
    apply_schedule(&mut trip, &json!({"pageId": "something-else"}));
    assert!(trip.times.is_none());
}

#[test]
fn apply_schedule_skips_unparseable_times() {
    let mut trip = test_trip();
    let config = json!({
        "journey": {
            "outbound": {"departureTime": "late morning", "arrivalTime": "22:50"}
        }
    });

    apply_schedule(&mut trip, &config);

    let times = trip.times.unwrap();
    assert!(times.outbound_departure.is_none());
    assert_eq!(times.outbound_arrival, NaiveTime::from_hms_opt(22, 50, 0));
    assert!(times.inbound_departure.is_none());
}
