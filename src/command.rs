use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::FareError;

/// One UI-update unit from the vendor's AJAX response. The protocol is
/// undocumented and unstable: `args` is heterogeneous and only the first
/// argument says how to read the rest, so everything optional defaults
/// rather than failing the whole decode.
#[derive(Debug, Clone, Deserialize)]
pub struct VendorCommand {
    pub command: String,
    #[serde(default)]
    pub selector: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub args: Vec<Value>,
    #[serde(default)]
    pub data: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Leg {
    Departure,
    Return,
}

impl Leg {
    /// The sentinel the vendor puts in `args[0]` once this leg's calendar
    /// payload is attached.
    pub fn ready_sentinel(self) -> &'static str {
        match self {
            Self::Departure => "departureCalendarPriceIsReady",
            Self::Return => "returnCalendarPriceIsReady",
        }
    }

    fn payload_key(self) -> &'static str {
        match self {
            Self::Departure => "departure",
            Self::Return => "return",
        }
    }
}

/// A command classified by its discriminator, so callers scan for a variant
/// instead of poking at `args[0]` strings.
#[derive(Debug)]
pub enum CommandEvent<'a> {
    /// Calendar payload for a leg is ready. `None` means the vendor signaled
    /// readiness but attached no prices: a normal "no availability" answer,
    /// not a protocol violation.
    CalendarReady(Leg, Option<&'a Map<String, Value>>),
    /// Raw markup insertion; carries the fragment when present.
    Insert(Option<&'a str>),
    Other,
}

impl VendorCommand {
    pub fn event(&self) -> CommandEvent<'_> {
        if self.command == "insert" {
            return CommandEvent::Insert(self.data.as_deref());
        }

        let Some(first) = self.args.first().and_then(Value::as_str) else {
            return CommandEvent::Other;
        };

        for leg in [Leg::Departure, Leg::Return] {
            if first == leg.ready_sentinel() {
                return CommandEvent::CalendarReady(leg, self.calendar_arg(leg));
            }
        }
        CommandEvent::Other
    }

    fn calendar_arg(&self, leg: Leg) -> Option<&Map<String, Value>> {
        let payload = self
            .args
            .get(1)?
            .as_object()?
            .get(leg.payload_key())?
            .as_object()?;
        if payload.is_empty() {
            None
        } else {
            Some(payload)
        }
    }
}

pub fn parse_commands(raw: &str) -> Result<Vec<VendorCommand>, FareError> {
    serde_json::from_str(raw).map_err(|e| FareError::CommandDecode(e.to_string()))
}

/// Find the first command announcing this leg's calendar. An absent sentinel
/// is fatal; a sentinel with no attached prices is `Ok(None)`.
pub fn calendar_payload<'a>(
    commands: &'a [VendorCommand],
    leg: Leg,
) -> Result<Option<&'a Map<String, Value>>, FareError> {
    for cmd in commands {
        if let CommandEvent::CalendarReady(found, payload) = cmd.event() {
            if found == leg {
                return Ok(payload);
            }
        }
    }
    Err(FareError::CalendarNotReady(leg.ready_sentinel().to_string()))
}

/// First `insert` command carrying markup, if any.
pub fn insert_markup(commands: &[VendorCommand]) -> Option<&str> {
    commands.iter().find_map(|cmd| match cmd.event() {
        CommandEvent::Insert(data) => data,
        _ => None,
    })
}
