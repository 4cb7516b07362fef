use chrono::NaiveTime;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::command::{insert_markup, parse_commands};
use crate::error::FareError;
use crate::form::{search_form, Widget, SEARCH_URL};
use crate::model::{Trip, TripTimes};
use crate::session::Session;
use crate::token::TokenProvider;

pub const ITINERARY_HOST: &str = "https://secure.frenchbee.com";

const CHALLENGE_COOKIE: &str = "datadome";

/// Markers bracketing the page's embedded config object. Everything in this
/// module hangs off string surgery around these two.
pub const CONFIG_PREFIX: &str = "FlexPricer.init(";
pub const CONFIG_TRAILER: &str = ");";

/// Form lifted out of the vendor's `insert` fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedForm {
    pub action: String,
    pub fields: Vec<(String, String)>,
}

fn unescape(raw: &str) -> String {
    html_escape::decode_html_entities(raw).into_owned()
}

/// Pull the form `action` and every named `<input>` out of a markup
/// fragment. The fragment is not trusted to be well-formed, so this matches
/// patterns instead of parsing a DOM; attribute order inside a tag does not
/// matter. Inputs without a name are skipped, inputs without a value submit
/// an empty string.
pub fn scrape_form(fragment: &str) -> Result<ScrapedForm, FareError> {
    let action_re =
        Regex::new(r#"<form\b[^>]*\baction\s*=\s*"([^"]*)""#).expect("valid action regex");
    let input_re = Regex::new(r"<input\b[^>]*>").expect("valid input regex");
    let name_re = Regex::new(r#"\bname\s*=\s*"([^"]*)""#).expect("valid name regex");
    let value_re = Regex::new(r#"\bvalue\s*=\s*"([^"]*)""#).expect("valid value regex");

    let action = action_re
        .captures(fragment)
        .map(|caps| unescape(&caps[1]))
        .ok_or_else(|| {
            FareError::PageShapeChanged("no form action in the insert fragment".into())
        })?;

    let mut fields = Vec::new();
    for tag in input_re.find_iter(fragment) {
        let tag = tag.as_str();
        let Some(name) = name_re.captures(tag) else {
            continue;
        };
        let value = value_re
            .captures(tag)
            .map(|caps| unescape(&caps[1]))
            .unwrap_or_default();
        fields.push((unescape(&name[1]), value));
    }

    Ok(ScrapedForm { action, fields })
}

/// Slice out the `{...}` block that follows `prefix`: take the first `{`
/// after the prefix, then scan backward from the first `trailer` after it
/// for the closing `}`. Returns `None` when any marker is missing.
pub fn extract_config_block<'a>(
    text: &'a str,
    prefix: &str,
    trailer: &str,
) -> Option<&'a str> {
    let after_prefix = &text[text.find(prefix)? + prefix.len()..];
    let from_open = &after_prefix[after_prefix.find('{')?..];
    let end = from_open.find(trailer)?;
    let close = from_open[..end].rfind('}')?;
    Some(&from_open[..=close])
}

/// Follow the booking flow through to the itinerary page and decode its
/// embedded config object. Any missing marker fails with a shape-changed
/// error; there are no retries.
pub async fn trip_schedule(
    session: &Session,
    trip: &Trip,
    tokens: &dyn TokenProvider,
) -> Result<Value, FareError> {
    let fields = search_form(
        &trip.departure.location.code,
        &trip.returning.location.code,
        &trip.passengers,
        Some(trip.departure.date),
        Some(trip.returning.date),
        Widget::ItineraryDetail,
    );
    let body = session.post_form(SEARCH_URL, &fields).await?;
    let commands = parse_commands(&body)?;
    let fragment = insert_markup(&commands).ok_or_else(|| {
        FareError::PageShapeChanged("no insert command in the search response".into())
    })?;

    let form = scrape_form(fragment)?;
    debug!(action = %form.action, inputs = form.fields.len(), "scraped itinerary form");

    let token = tokens.fetch_token()?;
    session.add_cookie(ITINERARY_HOST, &format!("{CHALLENGE_COOKIE}={token}"))?;

    let action = if form.action.starts_with('/') {
        format!("{ITINERARY_HOST}{}", form.action)
    } else {
        form.action
    };
    let page = session.post_form(&action, &form.fields).await?;

    let block = extract_config_block(&page, CONFIG_PREFIX, CONFIG_TRAILER).ok_or_else(|| {
        FareError::PageShapeChanged(format!(
            "no {CONFIG_PREFIX}...{CONFIG_TRAILER} block in the itinerary page"
        ))
    })?;
    serde_json::from_str(block)
        .map_err(|e| FareError::PageShapeChanged(format!("config block is not valid JSON: {e}")))
}

fn leg_time(leg: &Value, key: &str) -> Option<NaiveTime> {
    let raw = leg.get(key)?.as_str()?;
    NaiveTime::parse_from_str(raw, "%H:%M").ok()
}

/// Copy whatever flight-time detail the config carries onto the trip.
/// Unrecognized config shapes leave the trip untouched.
pub fn apply_schedule(trip: &mut Trip, config: &Value) {
    let Some(journey) = config.get("journey") else {
        return;
    };

    let mut times = TripTimes::default();
    if let Some(leg) = journey.get("outbound") {
        times.outbound_departure = leg_time(leg, "departureTime");
        times.outbound_arrival = leg_time(leg, "arrivalTime");
    }
    if let Some(leg) = journey.get("inbound") {
        times.inbound_departure = leg_time(leg, "departureTime");
        times.inbound_arrival = leg_time(leg, "arrivalTime");
    }

    let found = [
        times.outbound_departure,
        times.outbound_arrival,
        times.inbound_departure,
        times.inbound_arrival,
    ]
    .iter()
    .any(Option::is_some);

    if found {
        trip.times = Some(times);
    }
}
