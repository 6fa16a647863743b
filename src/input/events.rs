use crate::{core::geo::LatLng, MarkerError, Result};
use instant::Instant;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sequence number attached to a fire-and-forget command.
///
/// Pressing the same button twice produces two distinct invocations; the
/// editor never deduplicates on it, it only logs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Invocation(pub u64);

/// Hands out increasing [`Invocation`]s for one trigger source.
#[derive(Debug, Default)]
pub struct InvocationCounter {
    next: u64,
}

impl InvocationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> Invocation {
        self.next += 1;
        Invocation(self.next)
    }

    /// Last invocation handed out, if any
    pub fn current(&self) -> Option<Invocation> {
        (self.next > 0).then_some(Invocation(self.next))
    }
}

/// Coordinate of a marker clicked while delete mode was armed.
///
/// Each value is a discrete event: two clicks on the same coordinate are two
/// `PendingClick`s.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingClick {
    pub lat_lng: LatLng,
    pub received_at: Instant,
}

impl PendingClick {
    pub fn new(lat_lng: LatLng) -> Self {
        Self {
            lat_lng,
            received_at: Instant::now(),
        }
    }
}

/// Events the map surface reports back to the editor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    /// A single-point drawing finished at this coordinate
    MarkerPlaced { lat_lng: LatLng },
    /// A rendered marker was clicked while a click listener was set
    MarkerClicked { lat_lng: LatLng },
}

impl SurfaceEvent {
    pub fn lat_lng(&self) -> LatLng {
        match self {
            SurfaceEvent::MarkerPlaced { lat_lng } | SurfaceEvent::MarkerClicked { lat_lng } => {
                *lat_lng
            }
        }
    }
}

/// Parses a Leaflet-style `{"lat": .., "lng": ..}` payload.
///
/// Missing or non-numeric fields and non-finite numbers are rejected. With
/// `reject_out_of_range`, coordinates outside the valid lat/lng ranges are too.
pub fn parse_lat_lng(payload: &Value, reject_out_of_range: bool) -> Result<LatLng> {
    let field = |name: &str| -> Result<f64> {
        payload
            .get(name)
            .and_then(Value::as_f64)
            .ok_or_else(|| MarkerError::MalformedCoordinate(format!("missing or non-numeric `{name}` in {payload}")))
    };

    let lat_lng = LatLng::new(field("lat")?, field("lng")?);
    validate(lat_lng, reject_out_of_range)
}

/// Checks an already-typed coordinate with the same rules as [`parse_lat_lng`]
pub fn validate(lat_lng: LatLng, reject_out_of_range: bool) -> Result<LatLng> {
    if !lat_lng.is_finite() {
        return Err(MarkerError::MalformedCoordinate(format!(
            "non-finite coordinate ({}, {})",
            lat_lng.lat, lat_lng.lng
        )));
    }
    if reject_out_of_range && !lat_lng.is_valid() {
        return Err(MarkerError::MalformedCoordinate(format!(
            "coordinate out of range ({}, {})",
            lat_lng.lat, lat_lng.lng
        )));
    }
    Ok(lat_lng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invocations_increase() {
        let mut counter = InvocationCounter::new();
        assert_eq!(counter.current(), None);
        let first = counter.next();
        let second = counter.next();
        assert!(second > first);
        assert_eq!(counter.current(), Some(second));
    }

    #[test]
    fn test_parse_leaflet_payload() {
        let lat_lng = parse_lat_lng(&json!({"lat": -40.75, "lng": 173.03}), false).unwrap();
        assert_eq!(lat_lng, LatLng::new(-40.75, 173.03));
    }

    #[test]
    fn test_parse_integer_payload() {
        let lat_lng = parse_lat_lng(&json!({"lat": 2, "lng": 3}), false).unwrap();
        assert_eq!(lat_lng, LatLng::new(2.0, 3.0));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for payload in [
            json!({"lat": 1.0}),
            json!({"lat": "1.0", "lng": 2.0}),
            json!(""),
            json!(null),
            json!([1.0, 2.0]),
        ] {
            assert!(matches!(
                parse_lat_lng(&payload, false),
                Err(MarkerError::MalformedCoordinate(_))
            ));
        }
    }

    #[test]
    fn test_out_of_range_only_rejected_when_strict() {
        let payload = json!({"lat": 10.0, "lng": 200.0});
        assert!(parse_lat_lng(&payload, false).is_ok());
        assert!(parse_lat_lng(&payload, true).is_err());
    }

    #[test]
    fn test_validate_rejects_nan() {
        assert!(validate(LatLng::new(f64::NAN, 0.0), false).is_err());
        assert!(validate(LatLng::new(0.0, f64::INFINITY), false).is_err());
    }
}
