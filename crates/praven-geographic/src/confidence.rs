use praven_core::constants::NEUTRAL_SCORE;
use praven_core::models::{OccurrenceRecords, RecentOccurrence};

/// Occurrence confidence from whatever the services answered.
///
/// ```text
/// 0.5
///   + 0.3 (+0.1·frequency)      recent service says expected
///   + 0.2 (+0.1 >10 | +0.05 >5) records present, by count
///   + 0.05 | −0.1               closest record <10 km | >40 km
/// ```
///
/// Clamped to [0, 1].
pub fn occurrence_confidence(
    recent: Option<&RecentOccurrence>,
    records: Option<&OccurrenceRecords>,
) -> f64 {
    let mut score = NEUTRAL_SCORE;

    if let Some(recent) = recent.filter(|r| r.expected) {
        score += 0.3;
        if let Some(frequency) = recent.frequency {
            score += 0.1 * frequency.clamp(0.0, 1.0);
        }
    }

    if let Some(records) = records {
        if records.present {
            score += 0.2;
            if records.count > 10 {
                score += 0.1;
            } else if records.count > 5 {
                score += 0.05;
            }
        }
        match records.closest_distance_km {
            Some(d) if d < 10.0 => score += 0.05,
            Some(d) if d > 40.0 => score -= 0.1,
            _ => {}
        }
    }

    score.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recent(expected: bool, frequency: Option<f64>) -> RecentOccurrence {
        RecentOccurrence {
            expected,
            frequency,
            recent_count: 4,
        }
    }

    fn records(count: u32, closest: Option<f64>) -> OccurrenceRecords {
        OccurrenceRecords {
            present: count > 0,
            count,
            closest_distance_km: closest,
            months_recorded: vec![5],
        }
    }

    #[test]
    fn nothing_answered_is_neutral() {
        assert_eq!(occurrence_confidence(None, None), 0.5);
    }

    #[test]
    fn full_evidence_saturates() {
        let c = occurrence_confidence(
            Some(&recent(true, Some(1.0))),
            Some(&records(25, Some(3.0))),
        );
        assert_eq!(c, 1.0);
    }

    #[test]
    fn partial_evidence() {
        // 0.5 + 0.3 + 0.05
        let c = occurrence_confidence(Some(&recent(true, Some(0.5))), None);
        assert!((c - 0.85).abs() < 1e-9);

        // 0.5 + 0.2 + 0.05 - 0.1
        let c = occurrence_confidence(Some(&recent(false, None)), Some(&records(7, Some(45.0))));
        assert!((c - 0.65).abs() < 1e-9);
    }
}
