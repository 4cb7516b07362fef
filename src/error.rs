use std::fmt;

#[derive(Debug)]
pub enum FareError {
    Timeout,
    ConnectionFailed(String),
    DnsResolution(String),
    ProxyError(String),
    RateLimited,
    Blocked(u16),
    HttpStatus(u16),
    TlsError(String),
    CommandDecode(String),
    CalendarNotReady(String),
    InvalidDate(String),
    FareDecode(String),
    PageShapeChanged(String),
    ChallengeToken(String),
    Validation(String),
}

impl fmt::Display for FareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(
                f,
                "request timed out — French Bee may be slow or unreachable. \
                 Try increasing --timeout or check your connection"
            ),
            Self::ConnectionFailed(detail) => write!(
                f,
                "connection failed — check your internet connection ({detail})"
            ),
            Self::DnsResolution(host) => write!(
                f,
                "DNS resolution failed for {host} — check your internet connection"
            ),
            Self::ProxyError(detail) => write!(
                f,
                "proxy error — check your --proxy URL is correct ({detail})"
            ),
            Self::RateLimited => write!(
                f,
                "rate limited by French Bee (HTTP 429) — wait a few minutes before retrying, \
                 or use --proxy to route through a different IP"
            ),
            Self::Blocked(status) => write!(
                f,
                "request blocked by French Bee (HTTP {status}) — this usually means \
                 bot detection. Try again later or use --proxy"
            ),
            Self::HttpStatus(status) => {
                write!(f, "unexpected HTTP status {status} from French Bee")
            }
            Self::TlsError(detail) => write!(
                f,
                "TLS/SSL error — connection to French Bee failed ({detail})"
            ),
            Self::CommandDecode(detail) => write!(
                f,
                "failed to decode the search response ({detail}). \
                 French Bee may have changed its AJAX protocol, or returned an error page"
            ),
            Self::CalendarNotReady(sentinel) => write!(
                f,
                "the response contains no \"{sentinel}\" command — the price calendar \
                 was not returned for this search. Check the airport codes and try again"
            ),
            Self::InvalidDate(date) => write!(
                f,
                "invalid calendar date \"{date}\" in the price payload — \
                 this indicates a French Bee format change worth reporting"
            ),
            Self::FareDecode(detail) => write!(
                f,
                "failed to decode a fare record — {detail}. \
                 This indicates a French Bee format change worth reporting"
            ),
            Self::PageShapeChanged(detail) => write!(
                f,
                "the itinerary page no longer looks as expected ({detail}) — \
                 this scrape is best-effort and the site layout has likely changed"
            ),
            Self::ChallengeToken(detail) => write!(
                f,
                "could not obtain a bot-challenge token ({detail}) — \
                 the itinerary page is unreachable without one"
            ),
            Self::Validation(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for FareError {}

pub fn from_http_error(err: wreq::Error) -> FareError {
    let msg = err.to_string();
    let lower = msg.to_lowercase();
    let contains_any = |needles: &[&str]| needles.iter().any(|n| lower.contains(n));

    if err.is_timeout() {
        return FareError::Timeout;
    }

    if err.is_connect() {
        if contains_any(&["dns", "resolve", "getaddrinfo"]) {
            return FareError::DnsResolution(msg);
        }
        return FareError::ConnectionFailed(msg);
    }

    if contains_any(&["proxy", "socks"]) {
        return FareError::ProxyError(msg);
    }

    if contains_any(&["tls", "ssl", "certificate"]) {
        return FareError::TlsError(msg);
    }

    FareError::ConnectionFailed(msg)
}
