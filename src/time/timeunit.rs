use crate::time::error::Error;
use core::str::FromStr;
use lazy_static::*;
use regex::Regex;
use std::time::Duration;

lazy_static! {
    static ref DURATION_REGEX: Regex =
        Regex::new(r"^\s*(?P<value>\d+)\s*(?P<unit>[a-z]+)\s*$").expect("Regex compilation error");
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TimeUnit {
    Millisecond,
    Second,
    Minute,
}

impl TimeUnit {
    fn apply(self, value: u64) -> Option<Duration> {
        match self {
            TimeUnit::Millisecond => Some(Duration::from_millis(value)),
            TimeUnit::Second => Some(Duration::from_secs(value)),
            TimeUnit::Minute => value.checked_mul(60).map(Duration::from_secs),
        }
    }
}

impl FromStr for TimeUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ms" | "millis" | "milliseconds" => Ok(TimeUnit::Millisecond),
            "s" | "sec" | "secs" | "seconds" => Ok(TimeUnit::Second),
            "m" | "min" | "mins" | "minutes" => Ok(TimeUnit::Minute),
            _ => Err(Error::UnitNotSupported(s.to_owned())),
        }
    }
}

/// Parses `<number><unit>` (`250ms`, `2s`, `1m`) into a [`Duration`].
///
/// A bare number is read as seconds, which is how retry waits were always configured.
pub fn parse_duration(s: &str) -> Result<Duration, Error> {
    if let Ok(seconds) = s.trim().parse::<u64>() {
        return Ok(Duration::from_secs(seconds));
    }
    let caps = DURATION_REGEX
        .captures(s)
        .ok_or_else(|| Error::Syntax(s.to_owned()))?;
    let value: u64 = caps["value"]
        .parse()
        .map_err(|_| Error::Overflow(s.to_owned()))?;
    let unit: TimeUnit = caps["unit"].parse()?;
    unit.apply(value).ok_or_else(|| Error::Overflow(s.to_owned()))
}
