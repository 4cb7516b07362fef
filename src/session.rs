use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::debug;
use wreq::cookie::Jar;
use wreq::Client;
use wreq_util::Emulation;

use crate::cache::{request_key, ResponseCache};
use crate::error::{self, FareError};

pub const BOOKING_HOST: &str = "https://us.frenchbee.com";

#[derive(Clone)]
pub struct SessionOptions {
    pub proxy: Option<String>,
    pub timeout: u64,
    /// Response cache TTL in seconds; `None` disables caching.
    pub cache_ttl: Option<u64>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            proxy: None,
            timeout: 30,
            cache_ttl: None,
        }
    }
}

/// One browsing session against the booking site. The backend is stateful
/// per session, so the same `Session` (and its cookie jar) must carry a trip
/// through the departure, return, and itinerary calls.
pub struct Session {
    client: Client,
    jar: Arc<Jar>,
    cache: Option<ResponseCache>,
}

impl Session {
    pub fn new(options: &SessionOptions) -> Result<Self, FareError> {
        let jar = Arc::new(Jar::default());
        let url: wreq::Uri = BOOKING_HOST.parse().expect("valid booking host");
        // Market/locale cookies the search form expects to already exist.
        jar.add("base_host=frenchbee.com", &url);
        jar.add("market_lang=en", &url);
        jar.add("site_origin=us.frenchbee.com", &url);

        let mut builder = Client::builder()
            .emulation(Emulation::Chrome137)
            .cookie_provider(jar.clone())
            .timeout(Duration::from_secs(options.timeout));

        if let Some(ref proxy) = options.proxy {
            builder = builder.proxy(wreq::Proxy::all(proxy).map_err(error::from_http_error)?);
        }

        let client = builder.build().map_err(error::from_http_error)?;
        let cache = options
            .cache_ttl
            .map(|secs| ResponseCache::new(Duration::from_secs(secs)));

        Ok(Self { client, jar, cache })
    }

    /// Attach a cookie scoped to `url`, e.g. the challenge token for the
    /// itinerary subdomain.
    pub fn add_cookie(&self, url: &str, cookie: &str) -> Result<(), FareError> {
        let uri: wreq::Uri = url
            .parse()
            .map_err(|_| FareError::Validation(format!("invalid cookie URL: {url}")))?;
        self.jar.add(cookie, &uri);
        Ok(())
    }

    pub async fn post_form(
        &self,
        url: &str,
        fields: &[(String, String)],
    ) -> Result<String, FareError> {
        let key = request_key("POST", url, fields);
        if let Some(cache) = &self.cache {
            if let Some(body) = cache.get(&key) {
                debug!(url, "response cache hit");
                return Ok(body);
            }
        }

        let started = Instant::now();
        let response = self
            .client
            .post(url)
            .header(
                "content-type",
                "application/x-www-form-urlencoded; charset=UTF-8",
            )
            .form(&fields)
            .send()
            .await
            .map_err(error::from_http_error)?;

        let status = response.status().as_u16();
        debug!(
            url,
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "POST completed"
        );
        check_status(status)?;

        let body = response.text().await.map_err(error::from_http_error)?;
        if let Some(cache) = &self.cache {
            cache.put(&key, &body);
        }
        Ok(body)
    }

    pub async fn get_html(&self, url: &str) -> Result<String, FareError> {
        let key = request_key("GET", url, &[]);
        if let Some(cache) = &self.cache {
            if let Some(body) = cache.get(&key) {
                debug!(url, "response cache hit");
                return Ok(body);
            }
        }

        let started = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(error::from_http_error)?;

        let status = response.status().as_u16();
        debug!(
            url,
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "GET completed"
        );
        check_status(status)?;

        let body = response.text().await.map_err(error::from_http_error)?;
        if let Some(cache) = &self.cache {
            cache.put(&key, &body);
        }
        Ok(body)
    }
}

fn check_status(status: u16) -> Result<(), FareError> {
    match status {
        200 => Ok(()),
        429 => Err(FareError::RateLimited),
        403 | 503 => Err(FareError::Blocked(status)),
        _ if status >= 400 => Err(FareError::HttpStatus(status)),
        _ => Ok(()),
    }
}
