use std::process;

use chrono::NaiveDate;
use clap::Parser;
use serde::Serialize;

use beeline::error::FareError;
use beeline::model::{PassengerInfo, Trip};
use beeline::session::{Session, SessionOptions};
use beeline::table;
use beeline::token::StaticToken;

#[derive(Parser)]
#[command(
    name = "beeline",
    about = "Look up French Bee fares from the terminal",
    version,
    after_help = "\
Examples:
  beeline trip EWR ORY 2026-10-02 2026-10-12
  beeline trip EWR ORY 2026-10-02 2026-10-12 --adults 2 --children 1
  beeline trip EWR ORY 2026-10-02 2026-10-12 --schedule --challenge-token TOKEN
  beeline calendar EWR ORY
  beeline calendar EWR ORY --return-leg --departure-date 2026-10-02
  beeline airports"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    #[command(
        about = "Price both legs of a round trip",
        long_about = "Price the departure and return legs of a round trip and print the \
            combined total. Dates with no published fare print as such and exit 0.",
        after_help = "\
Examples:
  Basic:        beeline trip EWR ORY 2026-10-02 2026-10-12
  Family:       beeline trip EWR ORY 2026-10-02 2026-10-12 --adults 2 --children 2
  With times:   beeline trip EWR ORY 2026-10-02 2026-10-12 --schedule --challenge-token TOKEN
  JSON output:  beeline trip EWR ORY 2026-10-02 2026-10-12 --json --pretty"
    )]
    Trip(TripArgs),
    #[command(
        about = "Show the full fare calendar for one leg",
        after_help = "\
Examples:
  Departures:   beeline calendar EWR ORY
  Returns:      beeline calendar EWR ORY --return-leg --departure-date 2026-10-02"
    )]
    Calendar(CalendarArgs),
    #[command(about = "List airports the booking form serves")]
    Airports(AirportsArgs),
}

#[derive(clap::Args)]
struct CommonArgs {
    #[arg(long, help = "Output as JSON")]
    json: bool,

    #[arg(long, help = "Output as pretty-printed JSON")]
    pretty: bool,

    #[arg(long, value_name = "URL", help = "HTTP or SOCKS5 proxy")]
    proxy: Option<String>,

    #[arg(long, default_value = "30", value_name = "SECS", help = "Request timeout")]
    timeout: u64,

    #[arg(
        long,
        value_name = "SECS",
        help = "Serve identical requests from a local cache for this long"
    )]
    cache_ttl: Option<u64>,
}

impl CommonArgs {
    fn is_json(&self) -> bool {
        self.json || self.pretty
    }

    fn session_options(&self) -> SessionOptions {
        SessionOptions {
            proxy: self.proxy.clone(),
            timeout: self.timeout,
            cache_ttl: self.cache_ttl,
        }
    }

    fn print_json<T: Serialize>(&self, value: &T) {
        let output = if self.pretty {
            serde_json::to_string_pretty(value).unwrap()
        } else {
            serde_json::to_string(value).unwrap()
        };
        println!("{output}");
    }
}

#[derive(clap::Args)]
struct PassengerArgs {
    #[arg(long, default_value = "1", value_name = "N", help = "Number of adult passengers")]
    adults: u32,

    #[arg(long, default_value = "0", value_name = "N", help = "Number of child passengers")]
    children: u32,

    #[arg(long, default_value = "0", value_name = "N", help = "Number of infant passengers")]
    infants: u32,
}

impl PassengerArgs {
    fn to_info(&self) -> PassengerInfo {
        PassengerInfo {
            adults: self.adults,
            children: self.children,
            infants: self.infants,
        }
    }
}

#[derive(clap::Args)]
struct TripArgs {
    #[arg(value_name = "ORIGIN", help = "Origin airport code (e.g. EWR)")]
    origin: String,

    #[arg(value_name = "DESTINATION", help = "Destination airport code (e.g. ORY)")]
    destination: String,

    #[arg(value_name = "DEPARTURE", help = "Departure date, YYYY-MM-DD")]
    departure_date: String,

    #[arg(value_name = "RETURN", help = "Return date, YYYY-MM-DD")]
    return_date: String,

    #[command(flatten)]
    passengers: PassengerArgs,

    #[arg(
        long,
        help = "Also scrape the itinerary page for flight times (needs --challenge-token)"
    )]
    schedule: bool,

    #[arg(
        long,
        value_name = "TOKEN",
        help = "Bot-challenge token for the itinerary subdomain"
    )]
    challenge_token: Option<String>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(clap::Args)]
struct CalendarArgs {
    #[arg(value_name = "ORIGIN", help = "Origin airport code (e.g. EWR)")]
    origin: String,

    #[arg(value_name = "DESTINATION", help = "Destination airport code (e.g. ORY)")]
    destination: String,

    #[arg(long, help = "Show the return-leg calendar instead of the departure one")]
    return_leg: bool,

    #[arg(
        long,
        value_name = "YYYY-MM-DD",
        help = "Chosen departure date (required with --return-leg)"
    )]
    departure_date: Option<String>,

    #[command(flatten)]
    passengers: PassengerArgs,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(clap::Args)]
struct AirportsArgs {
    #[command(flatten)]
    common: CommonArgs,
}

fn error_code(err: &FareError) -> i32 {
    match err {
        FareError::Validation(_) | FareError::ChallengeToken(_) => 2,
        FareError::Timeout
        | FareError::ConnectionFailed(_)
        | FareError::DnsResolution(_)
        | FareError::TlsError(_)
        | FareError::ProxyError(_) => 3,
        FareError::RateLimited | FareError::Blocked(_) => 4,
        FareError::HttpStatus(_) => 5,
        FareError::CommandDecode(_)
        | FareError::CalendarNotReady(_)
        | FareError::InvalidDate(_)
        | FareError::FareDecode(_)
        | FareError::PageShapeChanged(_) => 6,
    }
}

fn error_kind(err: &FareError) -> &'static str {
    match err {
        FareError::Validation(_) => "validation_error",
        FareError::ChallengeToken(_) => "challenge_token",
        FareError::Timeout => "timeout",
        FareError::ConnectionFailed(_) => "connection_failed",
        FareError::DnsResolution(_) => "dns_error",
        FareError::TlsError(_) => "tls_error",
        FareError::ProxyError(_) => "proxy_error",
        FareError::RateLimited => "rate_limited",
        FareError::Blocked(_) => "blocked",
        FareError::HttpStatus(_) => "http_error",
        FareError::CommandDecode(_) => "command_decode",
        FareError::CalendarNotReady(_) => "calendar_not_ready",
        FareError::InvalidDate(_) | FareError::FareDecode(_) => "fare_decode",
        FareError::PageShapeChanged(_) => "page_shape_changed",
    }
}

fn die(err: &FareError, json_mode: bool) -> ! {
    if json_mode {
        let json = serde_json::json!({
            "error": {
                "kind": error_kind(err),
                "message": err.to_string(),
            }
        });
        println!("{}", serde_json::to_string(&json).unwrap());
    } else {
        eprintln!("error: {err}");
    }
    process::exit(error_code(err));
}

fn airport_code(raw: &str, json_mode: bool) -> String {
    let code = raw.trim().to_uppercase();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        die(
            &FareError::Validation(format!(
                "invalid airport code \"{raw}\" — must be exactly 3 letters (e.g. EWR, ORY)"
            )),
            json_mode,
        );
    }
    code
}

fn parse_date(raw: &str, json_mode: bool) -> NaiveDate {
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => die(
            &FareError::Validation(format!(
                "invalid date \"{raw}\" — must be YYYY-MM-DD format (e.g. 2026-10-02)"
            )),
            json_mode,
        ),
    }
}

fn open_session(common: &CommonArgs) -> Session {
    match Session::new(&common.session_options()) {
        Ok(session) => session,
        Err(e) => die(&e, common.is_json()),
    }
}

#[derive(Serialize)]
struct TripOutput<'a> {
    trip: &'a Trip,
    quote: &'a beeline::model::TripQuote,
    total: Option<f64>,
}

async fn run_trip(args: TripArgs) {
    let json_mode = args.common.is_json();

    let origin = airport_code(&args.origin, json_mode);
    let destination = airport_code(&args.destination, json_mode);
    let departure = parse_date(&args.departure_date, json_mode);
    let return_date = parse_date(&args.return_date, json_mode);

    let mut trip = Trip::new(
        &origin,
        &destination,
        departure,
        return_date,
        args.passengers.to_info(),
    );

    let session = open_session(&args.common);
    let quote = match beeline::price_trip(&session, &trip).await {
        Ok(quote) => quote,
        Err(e) => die(&e, json_mode),
    };

    if args.schedule && quote.outbound.is_some() {
        let provider = StaticToken(args.challenge_token.clone().unwrap_or_default());
        match beeline::itinerary::trip_schedule(&session, &trip, &provider).await {
            Ok(config) => beeline::itinerary::apply_schedule(&mut trip, &config),
            Err(e) => die(&e, json_mode),
        }
    }

    if json_mode {
        args.common.print_json(&TripOutput {
            trip: &trip,
            quote: &quote,
            total: quote.total(),
        });
        return;
    }

    if quote.outbound.is_none() {
        println!("No departure fare for {departure}.");
        return;
    }

    println!("{}", table::render_quote(&trip, &quote));

    match (&quote.inbound, quote.total()) {
        (Some(inbound), Some(total)) => {
            println!(
                "Total price: {} for {departure} to {return_date} from {origin} to {destination}",
                table::format_price(total, &inbound.currency)
            );
        }
        _ => println!("No return fare for {return_date}."),
    }
}

async fn run_calendar(args: CalendarArgs) {
    let json_mode = args.common.is_json();

    let origin = airport_code(&args.origin, json_mode);
    let destination = airport_code(&args.destination, json_mode);
    let passengers = args.passengers.to_info();

    let session = open_session(&args.common);

    let availability = if args.return_leg {
        let departure = match args.departure_date.as_deref() {
            Some(raw) => parse_date(raw, json_mode),
            None => die(
                &FareError::Validation(
                    "--departure-date is required with --return-leg".into(),
                ),
                json_mode,
            ),
        };
        beeline::return_availability(&session, &origin, &destination, &passengers, departure).await
    } else {
        beeline::departure_availability(&session, &origin, &destination, &passengers).await
    };

    let availability = match availability {
        Ok(availability) => availability,
        Err(e) => die(&e, json_mode),
    };

    if json_mode {
        args.common.print_json(&availability);
    } else if availability.is_empty() {
        println!("No fares published for this leg.");
    } else {
        println!("{}", table::render_availability(&availability));
    }
}

async fn run_airports(args: AirportsArgs) {
    let json_mode = args.common.is_json();
    let session = open_session(&args.common);

    let airports = match beeline::airports::fetch_airports(&session).await {
        Ok(airports) => airports,
        Err(e) => die(&e, json_mode),
    };

    if json_mode {
        args.common.print_json(&airports);
        return;
    }
    for airport in &airports {
        match &airport.name {
            Some(name) => println!("{}  {name}", airport.code),
            None => println!("{}", airport.code),
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Trip(args) => run_trip(args).await,
        Commands::Calendar(args) => run_calendar(args).await,
        Commands::Airports(args) => run_airports(args).await,
    }
}
