use chrono::NaiveDate;
use praven_core::models::Habitat;
use praven_core::WeatherConditions;
use praven_knowledge::KnowledgeBase;
use praven_rules::{diel_period, evaluate_habitat, evaluate_temporal, predict_activity_score, DielPeriod};
use proptest::prelude::*;

fn date(month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, month, 1).unwrap()
}

fn habitat() -> impl Strategy<Value = Habitat> {
    proptest::sample::select(Habitat::ALL.to_vec())
}

proptest! {
    /// A diurnal-only species fails exactly in the night period.
    #[test]
    fn diurnal_only_fails_only_at_night(hour in 0u32..24, month in 1u32..=12) {
        let kb = KnowledgeBase::bundled().unwrap();
        let r = evaluate_temporal(&kb, "Great Tit", hour, date(month)).unwrap();
        let night = diel_period(hour).unwrap() == DielPeriod::Night;
        prop_assert_eq!(r.valid, !night);
    }

    /// Crepuscular species are never hard-rejected, in any hour or month.
    #[test]
    fn crepuscular_never_rejected(hour in 0u32..24, month in 1u32..=12) {
        let kb = KnowledgeBase::bundled().unwrap();
        for species in ["Great Snipe", "Eurasian Eagle-Owl", "Common Nighthawk"] {
            let r = evaluate_temporal(&kb, species, hour, date(month)).unwrap();
            prop_assert!(r.valid, "{} rejected at {}", species, hour);
        }
    }

    /// A pelagic specialist fails in every non-oceanic habitat, unknown included,
    /// whatever the threshold.
    #[test]
    fn pelagic_specialist_rejected_off_sea(h in habitat(), threshold in 0.0f64..=1.0) {
        prop_assume!(h != Habitat::Oceanic);
        let kb = KnowledgeBase::bundled().unwrap();
        let r = evaluate_habitat(&kb, "European Storm-Petrel", h, threshold);
        prop_assert!(!r.valid);
    }

    /// Habitat scores stay in [0, 1].
    #[test]
    fn habitat_score_in_unit_interval(h in habitat(), threshold in 0.0f64..=1.0) {
        let kb = KnowledgeBase::bundled().unwrap();
        for species in ["Mallard", "Great Tit", "Xyzzy Bird", "Common Tern"] {
            let r = evaluate_habitat(&kb, species, h, threshold);
            prop_assert!((0.0..=1.0).contains(&r.score));
        }
    }

    /// The activity heuristic stays in [0, 1] for any readings.
    #[test]
    fn activity_score_in_unit_interval(
        rain in 0.0f64..=1.0,
        fog in 0.0f64..=1.0,
        temp in proptest::option::of(-30.0f64..45.0),
        wind in proptest::option::of(0.0f64..40.0),
    ) {
        let weather = WeatherConditions {
            rain,
            fog,
            temperature_c: temp,
            wind_speed: wind,
            cloud_cover: 0.5,
        };
        let resilient = vec!["Mallard".to_string()];
        for species in ["Mallard", "Great Snipe"] {
            let score = predict_activity_score(species, &weather, &resilient);
            prop_assert!((0.0..=1.0).contains(&score));
        }
    }
}
