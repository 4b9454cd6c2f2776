//! Property tests for distances and occurrence confidence.

use praven_core::models::{OccurrenceRecords, RecentOccurrence};
use praven_geographic::{haversine_km, occurrence_confidence};
use proptest::prelude::*;

fn arb_recent() -> impl Strategy<Value = Option<RecentOccurrence>> {
    prop::option::of((any::<bool>(), prop::option::of(-1.0f64..2.0), 0u32..100).prop_map(
        |(expected, frequency, recent_count)| RecentOccurrence {
            expected,
            frequency,
            recent_count,
        },
    ))
}

fn arb_records() -> impl Strategy<Value = Option<OccurrenceRecords>> {
    prop::option::of(
        (any::<bool>(), 0u32..1000, prop::option::of(0.0f64..500.0)).prop_map(
            |(present, count, closest_distance_km)| OccurrenceRecords {
                present,
                count,
                closest_distance_km,
                months_recorded: Vec::new(),
            },
        ),
    )
}

proptest! {
    #[test]
    fn confidence_is_bounded(recent in arb_recent(), records in arb_records()) {
        let c = occurrence_confidence(recent.as_ref(), records.as_ref());
        prop_assert!((0.0..=1.0).contains(&c));
    }

    #[test]
    fn confirmation_never_lowers_confidence(records in arb_records()) {
        let confirmed = RecentOccurrence { expected: true, frequency: None, recent_count: 1 };
        let with = occurrence_confidence(Some(&confirmed), records.as_ref());
        let without = occurrence_confidence(None, records.as_ref());
        prop_assert!(with >= without);
    }

    #[test]
    fn distance_is_symmetric_and_non_negative(
        lat1 in -90.0f64..=90.0,
        lon1 in -180.0f64..=180.0,
        lat2 in -90.0f64..=90.0,
        lon2 in -180.0f64..=180.0,
    ) {
        let a = haversine_km(lat1, lon1, lat2, lon2);
        let b = haversine_km(lat2, lon2, lat1, lon1);
        prop_assert!(a >= 0.0);
        prop_assert!((a - b).abs() < 1e-6);
        prop_assert!(a <= std::f64::consts::PI * 6371.0 + 1e-6);
    }
}
