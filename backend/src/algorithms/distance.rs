//! Great-circle distances and per-collection-point depot rankings.

use crate::models::{CollectionPoint, CpDepotDistance, Depot, GeoPoint};

/// Mean Earth radius in statute miles.
pub const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Haversine distance between two points, in miles.
pub fn haversine_miles(from: GeoPoint, to: GeoPoint) -> f64 {
    let (lat1, lon1) = (from.latitude.to_radians(), from.longitude.to_radians());
    let (lat2, lon2) = (to.latitude.to_radians(), to.longitude.to_radians());
    let dlat = lat2 - lat1;
    let dlon = lon2 - lon1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_MILES * c
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rank every active depot by distance from `point`.
///
/// The sort is stable, so depots at equal distance keep their input order and
/// the first one encountered gets the lower rank. Distances are rounded to two
/// decimals after ranking. Ranks run 1..=N without gaps.
pub fn rank_depots(point: &CollectionPoint, depots: &[Depot]) -> Vec<CpDepotDistance> {
    let mut measured: Vec<(&Depot, f64)> = depots
        .iter()
        .filter(|d| d.is_active)
        .map(|d| (d, haversine_miles(point.location, d.location)))
        .collect();

    measured.sort_by(|a, b| a.1.total_cmp(&b.1));

    measured
        .into_iter()
        .enumerate()
        .map(|(idx, (depot, miles))| CpDepotDistance {
            collection_point_id: point.id.clone(),
            depot_id: depot.id.clone(),
            distance_miles: round_to_hundredths(miles),
            rank: idx as u32 + 1,
        })
        .collect()
}

/// Rank depots for every collection point, in collection point order.
pub fn rank_all(points: &[CollectionPoint], depots: &[Depot]) -> Vec<CpDepotDistance> {
    points
        .iter()
        .flat_map(|cp| rank_depots(cp, depots))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CollectionPointId, DepotId, SortationWindow};
    use proptest::prelude::*;

    fn cp(lat: f64, lon: f64) -> CollectionPoint {
        CollectionPoint {
            id: CollectionPointId::new("CP001"),
            name: "Origin".into(),
            location: GeoPoint::new(lat, lon),
            is_active: true,
        }
    }

    fn depot(id: &str, lat: f64, lon: f64) -> Depot {
        Depot {
            id: DepotId::new(id),
            name: id.to_string(),
            location: GeoPoint::new(lat, lon),
            daily_capacity: 1000,
            window: SortationWindow::default(),
            is_active: true,
        }
    }

    #[test]
    fn test_haversine_known_distance() {
        // London to Manchester, roughly 163 miles as the crow flies.
        let london = GeoPoint::new(51.5074, -0.1278);
        let manchester = GeoPoint::new(53.4808, -2.2426);
        let miles = haversine_miles(london, manchester);
        assert!((miles - 163.0).abs() < 2.0, "got {miles}");
        assert_eq!(haversine_miles(london, london), 0.0);
    }

    #[test]
    fn test_rank_orders_by_distance() {
        let depots = vec![
            depot("FAR", 55.0, 0.0),
            depot("NEAR", 51.1, 0.0),
            depot("MID", 52.0, 0.0),
        ];
        let ranked = rank_depots(&cp(51.0, 0.0), &depots);
        let ids: Vec<&str> = ranked.iter().map(|r| r.depot_id.as_str()).collect();
        assert_eq!(ids, vec!["NEAR", "MID", "FAR"]);
        assert_eq!(ranked.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let depots = vec![depot("B", 52.0, 0.0), depot("A", 52.0, 0.0)];
        let ranked = rank_depots(&cp(51.0, 0.0), &depots);
        assert_eq!(ranked[0].depot_id.as_str(), "B");
        assert_eq!(ranked[1].depot_id.as_str(), "A");
    }

    #[test]
    fn test_inactive_depots_excluded() {
        let mut closed = depot("CLOSED", 51.0, 0.0);
        closed.is_active = false;
        let ranked = rank_depots(&cp(51.0, 0.0), &[closed, depot("OPEN", 53.0, 0.0)]);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].depot_id.as_str(), "OPEN");
        assert_eq!(ranked[0].rank, 1);
    }

    proptest! {
        #[test]
        fn prop_ranks_contiguous_and_sorted(
            coords in prop::collection::vec((-60.0f64..60.0, -10.0f64..10.0), 0..25)
        ) {
            let depots: Vec<Depot> = coords
                .iter()
                .enumerate()
                .map(|(i, (lat, lon))| depot(&format!("D{i:03}"), *lat, *lon))
                .collect();
            let ranked = rank_depots(&cp(50.0, 0.0), &depots);

            prop_assert_eq!(ranked.len(), depots.len());
            for (idx, row) in ranked.iter().enumerate() {
                prop_assert_eq!(row.rank as usize, idx + 1);
            }
            prop_assert!(ranked.windows(2).all(|w| w[0].distance_miles <= w[1].distance_miles));
        }
    }
}
