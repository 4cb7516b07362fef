use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use crate::model::{Availability, Trip, TripQuote};

pub fn format_price(amount: f64, currency: &str) -> String {
    match currency {
        "USD" => format!("${amount:.2}"),
        "EUR" => format!("€{amount:.2}"),
        "GBP" => format!("£{amount:.2}"),
        _ => format!("{amount:.2} {currency}"),
    }
}

pub fn render_availability(availability: &Availability) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Date", "Route", "Price", "Tax", "Total", "Offer"]);

    let mut days: Vec<_> = availability.values().collect();
    days.sort_by_key(|flight| flight.day);

    for flight in days {
        table.add_row(vec![
            flight.day.to_string(),
            format!("{} → {}", flight.departure_airport, flight.arrival_airport),
            format_price(flight.price, &flight.currency),
            format_price(flight.tax, &flight.currency),
            format_price(flight.total, &flight.currency),
            if flight.is_offer { "yes".into() } else { String::new() },
        ]);
    }

    table.to_string()
}

pub fn render_quote(trip: &Trip, quote: &TripQuote) -> String {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Leg", "Date", "Route", "Depart", "Arrive", "Price", "Tax", "Total",
        ]);

    let times = trip.times.clone().unwrap_or_default();
    let fmt_time = |t: Option<chrono::NaiveTime>| {
        t.map(|t| t.format("%H:%M").to_string())
            .unwrap_or_else(|| "—".to_string())
    };

    if let Some(out) = &quote.outbound {
        table.add_row(vec![
            "Outbound".to_string(),
            out.day.to_string(),
            format!("{} → {}", out.departure_airport, out.arrival_airport),
            fmt_time(times.outbound_departure),
            fmt_time(times.outbound_arrival),
            format_price(out.price, &out.currency),
            format_price(out.tax, &out.currency),
            format_price(out.total, &out.currency),
        ]);
    }

    if let Some(ret) = &quote.inbound {
        table.add_row(vec![
            "Return".to_string(),
            ret.day.to_string(),
            format!("{} → {}", ret.departure_airport, ret.arrival_airport),
            fmt_time(times.inbound_departure),
            fmt_time(times.inbound_arrival),
            format_price(ret.price, &ret.currency),
            format_price(ret.tax, &ret.currency),
            format_price(ret.total, &ret.currency),
        ]);
    }

    table.to_string()
}
