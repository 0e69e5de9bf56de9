use serde::{Deserialize, Serialize};

use crate::geo::haversine_km;

/// Number of results returned by the nearby search endpoint.
pub const DEFAULT_NEARBY_LIMIT: usize = 10;

/// A single blood bank as loaded from the dataset.
///
/// `id` is the source row's `Sr No` restated as a string, so it is only stable
/// while the file keeps its row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloodBank {
    pub id: String,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Kilometres from the query origin. Only set by [`nearby`].
    #[serde(default)]
    pub distance: Option<f64>,
}

/// A user-supplied coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl BloodBank {
    #[must_use]
    pub fn distance_from(&self, origin: Location) -> f64 {
        haversine_km(
            origin.latitude,
            origin.longitude,
            self.latitude,
            self.longitude,
        )
    }
}

/// Rank `banks` by haversine distance from `origin` and keep the closest `limit`.
///
/// Every returned record has `distance` populated. Equal distances keep their
/// input order. This is a full linear scan; the dataset is small enough that no
/// spatial index is kept.
#[must_use]
pub fn nearby(banks: Vec<BloodBank>, origin: Location, limit: usize) -> Vec<BloodBank> {
    let mut ranked: Vec<BloodBank> = banks
        .into_iter()
        .map(|mut bank| {
            bank.distance = Some(bank.distance_from(origin));
            bank
        })
        .collect();

    // `sort_by` is stable.
    ranked.sort_by(|a, b| {
        let da = a.distance.unwrap_or(f64::INFINITY);
        let db = b.distance.unwrap_or(f64::INFINITY);
        da.total_cmp(&db)
    });
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bank(id: &str, latitude: f64, longitude: f64) -> BloodBank {
        BloodBank {
            id: id.to_string(),
            name: format!("Bank {id}"),
            address: String::new(),
            city: String::new(),
            state: "Delhi".to_string(),
            latitude,
            longitude,
            distance: None,
        }
    }

    const ORIGIN: Location = Location {
        latitude: 0.0,
        longitude: 0.0,
    };

    /// Degrees of longitude along the equator for roughly `km` kilometres.
    fn lon_for_km(km: f64) -> f64 {
        km / 111.195
    }

    #[test]
    fn orders_by_ascending_distance() {
        let banks = vec![
            bank("5km", 0.0, lon_for_km(5.0)),
            bank("1km", 0.0, lon_for_km(1.0)),
            bank("3km", 0.0, lon_for_km(3.0)),
        ];

        let ranked = nearby(banks, ORIGIN, DEFAULT_NEARBY_LIMIT);

        let ids: Vec<&str> = ranked.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["1km", "3km", "5km"]);
        let d = ranked[0].distance.expect("distance populated");
        assert!((d - 1.0).abs() < 0.01, "got {d}");
    }

    #[test]
    fn truncates_to_limit() {
        let banks: Vec<BloodBank> = (0..25)
            .map(|i| bank(&i.to_string(), 0.0, f64::from(i) * 0.01))
            .collect();

        let ranked = nearby(banks, ORIGIN, DEFAULT_NEARBY_LIMIT);

        assert_eq!(ranked.len(), 10);
        assert!(ranked
            .windows(2)
            .all(|w| w[0].distance.unwrap() <= w[1].distance.unwrap()));
        assert!(ranked.iter().all(|b| b.distance.is_some()));
    }

    #[test]
    fn returns_everything_when_fewer_than_limit() {
        let banks = vec![bank("a", 1.0, 1.0), bank("b", 2.0, 2.0)];
        assert_eq!(nearby(banks, ORIGIN, DEFAULT_NEARBY_LIMIT).len(), 2);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(nearby(Vec::new(), ORIGIN, DEFAULT_NEARBY_LIMIT).is_empty());
    }

    #[test]
    fn ties_keep_input_order() {
        let banks = vec![
            bank("first", 0.0, 0.5),
            bank("second", 0.0, -0.5),
            bank("third", 0.5, 0.0),
            bank("closest", 0.0, 0.1),
        ];

        let ranked = nearby(banks, ORIGIN, DEFAULT_NEARBY_LIMIT);

        let ids: Vec<&str> = ranked.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["closest", "first", "second", "third"]);
    }

    #[test]
    fn serializes_missing_distance_as_null() {
        let json = serde_json::to_value(bank("7", 12.5, 77.1)).expect("serialize");
        assert!(json["distance"].is_null());
        assert_eq!(json["id"], "7");
        assert_eq!(json["latitude"], 12.5);
    }
}
