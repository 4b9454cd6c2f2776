//! Batch orchestration: order-preserving parallel evaluation with per-item
//! isolation, and the summary statistics of a finished batch.

use std::any::Any;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};

use praven_core::traits::IValidator;
use praven_core::{Detection, ValidationContext, ValidationResult, ValidationStatus};
use praven_observability::batch_span;
use praven_observability::tracing_setup::events;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::ValidationEngine;

impl ValidationEngine {
    /// Validate every detection against one shared context.
    ///
    /// Output is 1:1 with input and in input order. A detection whose
    /// evaluation panics becomes a REVIEW record; the rest of the batch is
    /// unaffected.
    pub fn validate_batch(
        &self,
        detections: &[Detection],
        ctx: &ValidationContext,
    ) -> Vec<ValidationResult> {
        let batch_id = Uuid::new_v4().to_string();
        let span = batch_span!(batch_id, detections.len());
        let _guard = span.enter();
        events::batch_started(&batch_id, detections.len());

        let results: Vec<ValidationResult> = detections
            .par_iter()
            .map(|detection| self.validate_isolated(detection, ctx))
            .collect();

        let stats = BatchStats::from_results(&results);
        events::batch_completed(&batch_id, stats.accepted, stats.rejected, stats.review);
        results
    }

    fn validate_isolated(
        &self,
        detection: &Detection,
        ctx: &ValidationContext,
    ) -> ValidationResult {
        match panic::catch_unwind(AssertUnwindSafe(|| self.validate_one(detection, ctx))) {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                events::evaluation_failed(&detection.species_common_name, &message);
                ValidationResult::review_only(detection, format!("Evaluation failed: {message}"))
            }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Counts and rates for one batch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BatchStats {
    pub total: usize,
    pub accepted: usize,
    pub rejected: usize,
    pub review: usize,
    pub auto_pass_rate: f64,
    pub auto_reject_rate: f64,
    pub review_rate: f64,
    /// Occurrences of each individual rejection reason.
    pub rejection_reasons: BTreeMap<String, usize>,
}

impl BatchStats {
    pub fn from_results(results: &[ValidationResult]) -> Self {
        let mut stats = Self {
            total: results.len(),
            ..Self::default()
        };
        for result in results {
            match result.status {
                ValidationStatus::Accept => stats.accepted += 1,
                ValidationStatus::Reject => stats.rejected += 1,
                ValidationStatus::Review => stats.review += 1,
            }
            if let Some(reasons) = &result.rejection_reason {
                for reason in reasons.split("; ") {
                    *stats.rejection_reasons.entry(reason.to_string()).or_insert(0) += 1;
                }
            }
        }
        if stats.total > 0 {
            let total = stats.total as f64;
            stats.auto_pass_rate = stats.accepted as f64 / total;
            stats.auto_reject_rate = stats.rejected as f64 / total;
            stats.review_rate = stats.review as f64 / total;
        }
        stats
    }

    /// Share of the batch decided without a human.
    pub fn automation_rate(&self) -> f64 {
        self.auto_pass_rate + self.auto_reject_rate
    }
}
