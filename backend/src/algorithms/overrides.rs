//! Date-scoped lookup of manual trailer overrides and depot capacity overrides.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::models::{CapacityOverride, CollectionPointId, Depot, DepotId, ManualOverride, TimeOfDay};

/// Composite key of a manual override within one date.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrailerKey {
    pub collection_point_id: CollectionPointId,
    pub trailer_number: u32,
    pub collection_time: TimeOfDay,
}

impl TrailerKey {
    pub fn new(
        collection_point_id: CollectionPointId,
        trailer_number: u32,
        collection_time: TimeOfDay,
    ) -> Self {
        Self {
            collection_point_id,
            trailer_number,
            collection_time,
        }
    }
}

/// Overrides in force on one date.
#[derive(Debug, Clone, Default)]
pub struct OverrideSet {
    trailers: HashMap<TrailerKey, DepotId>,
    capacities: HashMap<DepotId, i64>,
}

impl OverrideSet {
    /// Index the overrides dated `date`; rows for other dates are ignored.
    /// When two rows share a key the later one wins.
    pub fn for_date(
        date: NaiveDate,
        manual: &[ManualOverride],
        capacity: &[CapacityOverride],
    ) -> Self {
        let trailers = manual
            .iter()
            .filter(|o| o.date == date)
            .map(|o| {
                (
                    TrailerKey::new(
                        o.collection_point_id.clone(),
                        o.trailer_number,
                        o.collection_time,
                    ),
                    o.to_depot_id.clone(),
                )
            })
            .collect();

        let capacities = capacity
            .iter()
            .filter(|o| o.date == date)
            .map(|o| (o.depot_id.clone(), o.capacity))
            .collect();

        Self {
            trailers,
            capacities,
        }
    }

    pub fn forced_depot(&self, key: &TrailerKey) -> Option<&DepotId> {
        self.trailers.get(key)
    }

    pub fn has_capacity_override(&self, depot_id: &DepotId) -> bool {
        self.capacities.contains_key(depot_id)
    }

    /// Capacity override for the date, else the depot's base daily capacity.
    pub fn effective_capacity(&self, depot: &Depot) -> i64 {
        self.capacities
            .get(&depot.id)
            .copied()
            .unwrap_or(depot.daily_capacity)
    }

    pub fn manual_count(&self) -> usize {
        self.trailers.len()
    }

    pub fn capacity_count(&self) -> usize {
        self.capacities.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeoPoint, SortationWindow};

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
    }

    fn manual(day: u32, cp: &str, trailer: u32, time: &str, depot: &str) -> ManualOverride {
        ManualOverride {
            id: None,
            date: date(day),
            collection_point_id: cp.into(),
            trailer_number: trailer,
            collection_time: time.parse().unwrap(),
            to_depot_id: depot.into(),
        }
    }

    fn depot(id: &str, capacity: i64) -> Depot {
        Depot {
            id: id.into(),
            name: id.into(),
            location: GeoPoint::new(0.0, 0.0),
            daily_capacity: capacity,
            window: SortationWindow::default(),
            is_active: true,
        }
    }

    #[test]
    fn test_manual_lookup_matches_full_key() {
        let set = OverrideSet::for_date(
            date(7),
            &[manual(7, "CP001", 2, "09:00", "D009")],
            &[],
        );
        let hit = TrailerKey::new("CP001".into(), 2, "09:00".parse().unwrap());
        let other_time = TrailerKey::new("CP001".into(), 2, "10:00".parse().unwrap());
        let other_trailer = TrailerKey::new("CP001".into(), 1, "09:00".parse().unwrap());

        assert_eq!(set.forced_depot(&hit).map(DepotId::as_str), Some("D009"));
        assert!(set.forced_depot(&other_time).is_none());
        assert!(set.forced_depot(&other_trailer).is_none());
    }

    #[test]
    fn test_other_dates_ignored() {
        let set = OverrideSet::for_date(
            date(7),
            &[manual(8, "CP001", 1, "09:00", "D009")],
            &[CapacityOverride {
                id: None,
                date: date(8),
                depot_id: "D001".into(),
                capacity: 0,
                reason: String::new(),
            }],
        );
        assert_eq!(set.manual_count(), 0);
        assert_eq!(set.capacity_count(), 0);
        assert_eq!(set.effective_capacity(&depot("D001", 2000)), 2000);
    }

    #[test]
    fn test_capacity_override_replaces_base() {
        let set = OverrideSet::for_date(
            date(7),
            &[],
            &[CapacityOverride {
                id: None,
                date: date(7),
                depot_id: "D001".into(),
                capacity: 0,
                reason: "flood".into(),
            }],
        );
        assert!(set.has_capacity_override(&"D001".into()));
        assert_eq!(set.effective_capacity(&depot("D001", 2000)), 0);
        assert_eq!(set.effective_capacity(&depot("D002", 1500)), 1500);
    }
}
