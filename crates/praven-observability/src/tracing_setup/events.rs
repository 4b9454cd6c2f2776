//! Structured log events for key operations.

/// Log the start of a batch.
pub fn batch_started(batch_id: &str, size: usize) {
    tracing::info!(
        event = "batch_started",
        batch_id = %batch_id,
        size = size,
        "batch started"
    );
}

/// Log a batch summary.
pub fn batch_completed(batch_id: &str, accepted: usize, rejected: usize, review: usize) {
    tracing::info!(
        event = "batch_completed",
        batch_id = %batch_id,
        accepted = accepted,
        rejected = rejected,
        review = review,
        "batch completed"
    );
}

/// Log a degraded external signal.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

/// Log a component answering again after a degradation.
pub fn degradation_recovered(component: &str) {
    tracing::info!(
        event = "degradation_recovered",
        component = %component,
        "degradation recovered"
    );
}

/// Log a detection whose evaluation failed and was routed to review.
pub fn evaluation_failed(species: &str, reason: &str) {
    tracing::error!(
        event = "evaluation_failed",
        species = %species,
        reason = %reason,
        "evaluation failed, routed to review"
    );
}
