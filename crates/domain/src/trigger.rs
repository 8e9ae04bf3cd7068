use crate::window;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Minutes,
    Hours,
}

impl TimeUnit {
    fn suffix(&self) -> &'static str {
        match self {
            Self::Minutes => "m",
            Self::Hours => "h",
        }
    }

    /// Unit noun used in message bodies, singular iff `value == 1`
    pub fn noun(&self, value: f64) -> &'static str {
        let singular = value == 1.0;
        match (self, singular) {
            (Self::Minutes, true) => "minute",
            (Self::Minutes, false) => "minutes",
            (Self::Hours, true) => "hour",
            (Self::Hours, false) => "hours",
        }
    }
}

impl Display for TimeUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Minutes => write!(f, "minutes"),
            Self::Hours => write!(f, "hours"),
        }
    }
}

/// One configured reminder window: fire when an assignment is `target` units
/// away from its due date, give or take `tolerance_minutes`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerConfig {
    pub target: f64,
    pub unit: TimeUnit,
    pub tolerance_minutes: f64,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidTriggerError {
    #[error("Trigger token: `{0}` is malformed. Expected e.g. `24h` or `2m`")]
    MalformedToken(String),
    #[error("Trigger target must be a finite, non negative number, got: {0}")]
    InvalidTarget(f64),
    #[error("Trigger tolerance must be a finite, non negative number of minutes, got: {0}")]
    InvalidTolerance(f64),
}

impl TriggerConfig {
    pub fn new(target: f64, unit: TimeUnit, tolerance_minutes: f64) -> Self {
        Self {
            target,
            unit,
            tolerance_minutes,
        }
    }

    pub fn hours(target: f64, tolerance_minutes: f64) -> Self {
        Self::new(target, TimeUnit::Hours, tolerance_minutes)
    }

    pub fn minutes(target: f64, tolerance_minutes: f64) -> Self {
        Self::new(target, TimeUnit::Minutes, tolerance_minutes)
    }

    /// Stable label used in the reminder identity, e.g. `24h` or `2m`
    pub fn label(&self) -> String {
        format!("{}{}", self.target, self.unit.suffix())
    }

    pub fn validate(&self) -> Result<(), InvalidTriggerError> {
        if !self.target.is_finite() || self.target < 0.0 {
            return Err(InvalidTriggerError::InvalidTarget(self.target));
        }
        if !self.tolerance_minutes.is_finite() || self.tolerance_minutes < 0.0 {
            return Err(InvalidTriggerError::InvalidTolerance(self.tolerance_minutes));
        }
        Ok(())
    }

    pub fn matches(&self, now: i64, due: i64) -> bool {
        window::matches(now, due, self.target, self.tolerance_minutes, self.unit)
    }

    /// Parses a comma separated list of tokens like `24h,2h` or `1m, 2m` where
    /// every trigger gets the same tolerance. Malformed tokens are returned
    /// separately so that the caller decides whether to warn or reject.
    pub fn parse_list(
        tokens: &str,
        tolerance_minutes: f64,
    ) -> (Vec<TriggerConfig>, Vec<InvalidTriggerError>) {
        let mut triggers = Vec::new();
        let mut errors = Vec::new();
        for token in tokens.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            let parsed = token.parse::<TriggerOffset>().and_then(|offset| {
                let trigger = TriggerConfig::new(offset.target, offset.unit, tolerance_minutes);
                trigger.validate().map(|_| trigger)
            });
            match parsed {
                Ok(trigger) => triggers.push(trigger),
                Err(e) => errors.push(e),
            }
        }
        (triggers, errors)
    }
}

/// The `<number><h|m>` part of a trigger, without tolerance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerOffset {
    pub target: f64,
    pub unit: TimeUnit,
}

impl FromStr for TriggerOffset {
    type Err = InvalidTriggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let malformed = || InvalidTriggerError::MalformedToken(s.to_string());
        let split_at = token.len().checked_sub(1).ok_or_else(malformed)?;
        if !token.is_char_boundary(split_at) {
            return Err(malformed());
        }
        let (number, suffix) = token.split_at(split_at);
        let unit = match suffix.to_ascii_lowercase().as_str() {
            "h" => TimeUnit::Hours,
            "m" => TimeUnit::Minutes,
            _ => return Err(malformed()),
        };
        // Only plain decimals, no signs, exponents or `inf`
        let valid_number = !number.is_empty()
            && !number.starts_with('.')
            && !number.ends_with('.')
            && number.chars().all(|c| c.is_ascii_digit() || c == '.')
            && number.matches('.').count() <= 1;
        if !valid_number {
            return Err(malformed());
        }
        let target = number.parse::<f64>().map_err(|_| malformed())?;
        Ok(Self { target, unit })
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn it_creates_labels() {
        assert_eq!(TriggerConfig::hours(24.0, 10.0).label(), "24h");
        assert_eq!(TriggerConfig::minutes(2.0, 1.0).label(), "2m");
        assert_eq!(TriggerConfig::hours(1.5, 10.0).label(), "1.5h");
        assert_eq!(TriggerConfig::minutes(0.0, 1.0).label(), "0m");
    }

    #[test]
    fn it_pluralizes_nouns() {
        assert_eq!(TimeUnit::Hours.noun(1.0), "hour");
        assert_eq!(TimeUnit::Hours.noun(24.0), "hours");
        assert_eq!(TimeUnit::Minutes.noun(1.0), "minute");
        assert_eq!(TimeUnit::Minutes.noun(0.5), "minutes");
    }

    #[test]
    fn it_parses_trigger_tokens() {
        let (triggers, errors) = TriggerConfig::parse_list("24h, 2H,1.5h,30m", 10.0);
        assert!(errors.is_empty());
        assert_eq!(
            triggers,
            vec![
                TriggerConfig::hours(24.0, 10.0),
                TriggerConfig::hours(2.0, 10.0),
                TriggerConfig::hours(1.5, 10.0),
                TriggerConfig::minutes(30.0, 10.0),
            ]
        );
    }

    #[test]
    fn it_rejects_malformed_tokens() {
        let (triggers, errors) = TriggerConfig::parse_list("24,h,-2h,2d,inf h,1e3m,.5h,2.h,3m", 1.0);
        assert_eq!(triggers, vec![TriggerConfig::minutes(3.0, 1.0)]);
        assert_eq!(errors.len(), 8);
    }

    #[test]
    fn it_validates_triggers() {
        assert!(TriggerConfig::hours(0.0, 0.0).validate().is_ok());
        assert_eq!(
            TriggerConfig::hours(-1.0, 10.0).validate(),
            Err(InvalidTriggerError::InvalidTarget(-1.0))
        );
        assert_eq!(
            TriggerConfig::minutes(1.0, -0.5).validate(),
            Err(InvalidTriggerError::InvalidTolerance(-0.5))
        );
        assert!(TriggerConfig::minutes(f64::NAN, 1.0).validate().is_err());
        assert!(TriggerConfig::minutes(1.0, f64::INFINITY).validate().is_err());
        // Tolerance is validated when parsing too
        let (triggers, errors) = TriggerConfig::parse_list("2h", -1.0);
        assert!(triggers.is_empty());
        assert_eq!(errors, vec![InvalidTriggerError::InvalidTolerance(-1.0)]);
    }

    #[test]
    fn it_deserializes_trigger_config() {
        let trigger: TriggerConfig =
            serde_json::from_str(r#"{"target":60,"unit":"minutes","toleranceMinutes":2}"#).unwrap();
        assert_eq!(trigger, TriggerConfig::minutes(60.0, 2.0));
    }
}
