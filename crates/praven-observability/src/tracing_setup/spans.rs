//! Span definitions per operation: validation, batch, geographic lookup, cache.

/// Create a span around one detection's evaluation.
#[macro_export]
macro_rules! validation_span {
    ($species:expr, $timestamp:expr) => {
        tracing::info_span!("praven.validation", species = %$species, timestamp = %$timestamp)
    };
}

/// Create a span around a batch.
#[macro_export]
macro_rules! batch_span {
    ($batch_id:expr, $size:expr) => {
        tracing::info_span!("praven.batch", batch_id = %$batch_id, size = $size)
    };
}

/// Create a span around an occurrence lookup.
#[macro_export]
macro_rules! geographic_span {
    ($species:expr) => {
        tracing::debug_span!("praven.geographic", species = %$species)
    };
}

/// Create a span around a cache operation.
#[macro_export]
macro_rules! cache_span {
    ($operation:expr) => {
        tracing::trace_span!("praven.cache", operation = %$operation)
    };
}
