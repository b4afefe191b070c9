use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Canonical vehicle category. Each category keys one record collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleCategory {
    Bike,
    Car,
    Scooty,
}

impl VehicleCategory {
    pub const ALL: [VehicleCategory; 3] =
        [VehicleCategory::Bike, VehicleCategory::Car, VehicleCategory::Scooty];

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleCategory::Bike => "bike",
            VehicleCategory::Car => "car",
            VehicleCategory::Scooty => "scooty",
        }
    }

    /// Table holding the vehicles of this category.
    pub fn collection(self) -> &'static str {
        match self {
            VehicleCategory::Bike => "bikes",
            VehicleCategory::Car => "cars",
            VehicleCategory::Scooty => "scooties",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "bike" | "bikes" => Some(VehicleCategory::Bike),
            "car" | "cars" => Some(VehicleCategory::Car),
            "scooty" | "scooties" | "scooter" | "scooters" => Some(VehicleCategory::Scooty),
            _ => None,
        }
    }
}

impl fmt::Display for VehicleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleCategory {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_vehicle_type_strict(Some(s))? {
            Some(category) => Ok(category),
            None => Err(CoreError::MissingVehicleType),
        }
    }
}

/// Outcome of normalizing a non-blank vehicle type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum VehicleType {
    Canonical(VehicleCategory),
    /// Lowercased, trimmed token that matched no known spelling.
    Unrecognized(String),
}

impl VehicleType {
    pub fn as_str(&self) -> &str {
        match self {
            VehicleType::Canonical(category) => category.as_str(),
            VehicleType::Unrecognized(token) => token,
        }
    }

    pub fn category(&self) -> Option<VehicleCategory> {
        match self {
            VehicleType::Canonical(category) => Some(*category),
            VehicleType::Unrecognized(_) => None,
        }
    }

    pub fn is_canonical(&self) -> bool {
        matches!(self, VehicleType::Canonical(_))
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a free-form vehicle type onto its canonical category.
///
/// Absent and blank input yields `None`. Unknown tokens pass through
/// lowercased and trimmed, and emit a warning event carrying the token.
pub fn normalize_vehicle_type(raw: Option<&str>) -> Option<VehicleType> {
    let candidate = raw?.trim().to_lowercase();
    if candidate.is_empty() {
        return None;
    }

    match VehicleCategory::from_token(&candidate) {
        Some(category) => Some(VehicleType::Canonical(category)),
        None => {
            warn!(token = candidate.as_str(), "unrecognized vehicle type");
            Some(VehicleType::Unrecognized(candidate))
        }
    }
}

pub fn is_valid_vehicle_type(raw: Option<&str>) -> bool {
    normalize_vehicle_type(raw).is_some_and(|value| value.is_canonical())
}

/// Like [`normalize_vehicle_type`], but rejects unknown tokens.
pub fn normalize_vehicle_type_strict(
    raw: Option<&str>,
) -> Result<Option<VehicleCategory>, CoreError> {
    match normalize_vehicle_type(raw) {
        None => Ok(None),
        Some(VehicleType::Canonical(category)) => Ok(Some(category)),
        Some(VehicleType::Unrecognized(token)) => Err(CoreError::UnrecognizedVehicleType(token)),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        is_valid_vehicle_type, normalize_vehicle_type, normalize_vehicle_type_strict,
        VehicleCategory, VehicleType,
    };
    use crate::error::CoreError;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    const RECOGNIZED: [&str; 9] = [
        "bike", "bikes", "car", "cars", "scooty", "scooties", "scooter", "scooters", "Bikes",
    ];

    #[derive(Clone, Default)]
    struct WarnTokens(Arc<Mutex<Vec<String>>>);

    struct TokenVisitor(Option<String>);

    impl Visit for TokenVisitor {
        fn record_str(&mut self, field: &Field, value: &str) {
            if field.name() == "token" {
                self.0 = Some(value.to_string());
            }
        }

        fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
            if field.name() == "token" && self.0.is_none() {
                self.0 = Some(format!("{value:?}"));
            }
        }
    }

    impl<S: Subscriber> Layer<S> for WarnTokens {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() != Level::WARN {
                return;
            }
            let mut visitor = TokenVisitor(None);
            event.record(&mut visitor);
            if let Some(token) = visitor.0 {
                self.0.lock().expect("lock").push(token);
            }
        }
    }

    fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, Vec<String>) {
        let layer = WarnTokens::default();
        let seen = layer.0.clone();
        let subscriber = tracing_subscriber::registry().with(layer);
        let out = tracing::subscriber::with_default(subscriber, f);
        let tokens = seen.lock().expect("lock").clone();
        (out, tokens)
    }

    fn canonical(raw: &str) -> Option<VehicleCategory> {
        normalize_vehicle_type(Some(raw)).and_then(|value| value.category())
    }

    #[test]
    fn canonical_values_map_to_themselves() {
        for category in VehicleCategory::ALL {
            let value = normalize_vehicle_type(Some(category.as_str())).expect("value");
            assert_eq!(value, VehicleType::Canonical(category));
            assert_eq!(value.as_str(), category.as_str());
            assert!(is_valid_vehicle_type(Some(category.as_str())));
        }
    }

    #[test]
    fn plurals_and_synonyms_collapse() {
        assert_eq!(canonical("bikes"), Some(VehicleCategory::Bike));
        assert_eq!(canonical("cars"), Some(VehicleCategory::Car));
        assert_eq!(canonical("scooters"), Some(VehicleCategory::Scooty));
        assert_eq!(canonical("scooties"), Some(VehicleCategory::Scooty));
        assert_eq!(canonical("scooter"), Some(VehicleCategory::Scooty));
    }

    #[test]
    fn case_and_whitespace_are_ignored() {
        assert_eq!(canonical("Bikes"), Some(VehicleCategory::Bike));
        assert_eq!(canonical(" BIKES "), Some(VehicleCategory::Bike));
        assert_eq!(canonical("\tScooter\n"), Some(VehicleCategory::Scooty));
    }

    #[test]
    fn absent_and_blank_have_no_category() {
        assert_eq!(normalize_vehicle_type(None), None);
        assert_eq!(normalize_vehicle_type(Some("")), None);
        assert_eq!(normalize_vehicle_type(Some("   ")), None);
        assert!(!is_valid_vehicle_type(None));
        assert!(!is_valid_vehicle_type(Some("")));
    }

    #[test]
    fn unknown_token_passes_through_with_warning() {
        let ((value, valid), tokens) = capture_warnings(|| {
            (
                normalize_vehicle_type(Some("  Truck ")),
                is_valid_vehicle_type(Some("truck")),
            )
        });
        assert_eq!(value, Some(VehicleType::Unrecognized("truck".to_string())));
        assert!(!valid);
        assert_eq!(tokens, vec!["truck".to_string(), "truck".to_string()]);

        let (_, tokens) = capture_warnings(|| normalize_vehicle_type(Some("cars")));
        assert!(tokens.is_empty());
    }

    #[test]
    fn no_prefix_or_suffix_matching() {
        for raw in ["bik", "bikers", "carsharing", "scoot", "motorbike"] {
            let value = normalize_vehicle_type(Some(raw)).expect("value");
            assert_eq!(value.as_str(), raw);
            assert!(!value.is_canonical());
        }
    }

    #[test]
    fn normalization_is_idempotent() {
        for raw in RECOGNIZED.iter().chain(["truck", " Van ", "SCOOTERS"].iter()) {
            let once = normalize_vehicle_type(Some(*raw)).expect("once");
            let twice = normalize_vehicle_type(Some(once.as_str())).expect("twice");
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn validity_matches_canonical_output() {
        for raw in RECOGNIZED.iter().chain(["truck", "", " ", "Car "].iter()) {
            let canonical = normalize_vehicle_type(Some(*raw))
                .map(|value| {
                    VehicleCategory::ALL
                        .iter()
                        .any(|category| category.as_str() == value.as_str())
                })
                .unwrap_or(false);
            assert_eq!(is_valid_vehicle_type(Some(*raw)), canonical, "input {raw:?}");
        }
    }

    #[test]
    fn strict_rejects_unknown_tokens() {
        assert_eq!(
            normalize_vehicle_type_strict(Some("Scooties")),
            Ok(Some(VehicleCategory::Scooty))
        );
        assert_eq!(normalize_vehicle_type_strict(None), Ok(None));
        assert_eq!(
            normalize_vehicle_type_strict(Some("Truck")),
            Err(CoreError::UnrecognizedVehicleType("truck".to_string()))
        );
    }

    #[test]
    fn from_str_requires_a_category() {
        assert_eq!("cars".parse::<VehicleCategory>(), Ok(VehicleCategory::Car));
        assert_eq!(
            " ".parse::<VehicleCategory>(),
            Err(CoreError::MissingVehicleType)
        );
        assert!("lorry".parse::<VehicleCategory>().is_err());
    }

    #[test]
    fn collections_are_plural_tables() {
        let tables: Vec<_> = VehicleCategory::ALL.iter().map(|c| c.collection()).collect();
        assert_eq!(tables, vec!["bikes", "cars", "scooties"]);
    }
}
