use crate::error::FareError;

/// Source of the opaque bot-challenge token guarding the itinerary pages.
/// Where the token comes from is not this crate's business; it only becomes
/// a cookie value.
pub trait TokenProvider {
    fn fetch_token(&self) -> Result<String, FareError>;
}

/// A token obtained out of band, e.g. from a solver service, a browser
/// session, or the `--challenge-token` flag.
pub struct StaticToken(pub String);

impl TokenProvider for StaticToken {
    fn fetch_token(&self) -> Result<String, FareError> {
        if self.0.is_empty() {
            return Err(FareError::ChallengeToken("empty token".into()));
        }
        Ok(self.0.clone())
    }
}
