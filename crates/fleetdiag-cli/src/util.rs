use anyhow::{anyhow, Result};
use chrono::{DateTime, Local, Utc};
use fleetdiag_core::domain::VehicleId;
use std::str::FromStr;

pub fn now_utc() -> i64 {
    Utc::now().timestamp()
}

pub fn format_timestamp_datetime(ts: i64) -> String {
    let dt = DateTime::<Utc>::from_timestamp(ts, 0)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .with_timezone(&Local);
    dt.format("%Y-%m-%d %H:%M").to_string()
}

pub fn format_price(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

/// Parses a decimal amount such as `450` or `450.5` into cents.
pub fn parse_price(input: &str) -> Result<i64> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("price cannot be empty"));
    }
    let (whole, fraction) = match trimmed.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (trimmed, ""),
    };
    let digits_only = |part: &str| part.chars().all(|ch| ch.is_ascii_digit());
    if whole.is_empty() || !digits_only(whole) || !digits_only(fraction) || fraction.len() > 2 {
        return Err(anyhow!("invalid price: expected a non-negative amount like 450 or 450.50"));
    }

    let whole: i64 = whole
        .parse()
        .map_err(|_| anyhow!("price out of range: {trimmed}"))?;
    let fraction: i64 = match fraction.len() {
        0 => 0,
        1 => fraction.parse::<i64>()? * 10,
        _ => fraction.parse()?,
    };
    whole
        .checked_mul(100)
        .and_then(|cents| cents.checked_add(fraction))
        .ok_or_else(|| anyhow!("price out of range: {trimmed}"))
}

pub fn parse_vehicle_id(raw: &str) -> Result<VehicleId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("vehicle id cannot be empty"));
    }
    VehicleId::from_str(trimmed).map_err(|_| anyhow!("invalid vehicle id: {trimmed}"))
}

pub fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

#[cfg(test)]
mod tests {
    use super::{format_price, parse_price, parse_vehicle_id};

    #[test]
    fn parse_price_accepts_whole_and_fractional_amounts() {
        assert_eq!(parse_price("450").unwrap(), 45_000);
        assert_eq!(parse_price(" 450.5 ").unwrap(), 45_050);
        assert_eq!(parse_price("0.05").unwrap(), 5);
    }

    #[test]
    fn parse_price_rejects_malformed_amounts() {
        for raw in ["", "-5", "4.505", "abc", ".50", "1e3"] {
            assert!(parse_price(raw).is_err(), "accepted {raw:?}");
        }
    }

    #[test]
    fn format_price_pads_cents() {
        assert_eq!(format_price(45_050), "450.50");
        assert_eq!(format_price(5), "0.05");
    }

    #[test]
    fn parse_vehicle_id_requires_uuid() {
        assert!(parse_vehicle_id("5b0c7a52-93f4-4d3f-8a43-2a9f1f0c6d11").is_ok());
        assert!(parse_vehicle_id("42").is_err());
        assert!(parse_vehicle_id("  ").is_err());
    }
}
