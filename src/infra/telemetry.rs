use std::sync::Once;

use metrics::{Unit, describe_counter};
use tracing_error::ErrorLayer;
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingSettings};

use super::error::InfraError;

static METRIC_DESCRIPTIONS: Once = Once::new();

/// Install the global tracing subscriber described by `logging`.
pub fn init(logging: &LoggingSettings) -> Result<(), InfraError> {
    describe_metrics();

    let env_filter = EnvFilter::builder()
        .with_default_directive(logging.level.into())
        .from_env_lossy();

    let fmt_layer = match logging.format {
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .boxed(),
        LogFormat::Compact => fmt::layer().compact().with_target(true).boxed(),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(ErrorLayer::default())
        .with(fmt_layer)
        .try_init()
        .map_err(|err| InfraError::telemetry(format!("failed to install subscriber: {err}")))
}

fn describe_metrics() {
    METRIC_DESCRIPTIONS.call_once(|| {
        describe_counter!(
            "nazim_contact_submissions_total",
            Unit::Count,
            "Contact form messages stored in the inbox."
        );
        describe_counter!(
            "nazim_fatwa_questions_total",
            Unit::Count,
            "Questions submitted to the fatwa desk."
        );
        describe_counter!(
            "nazim_inbox_status_changes_total",
            Unit::Count,
            "Inbox status transitions, labelled by target status."
        );
        describe_counter!(
            "nazim_public_cache_hit_total",
            Unit::Count,
            "Public responses served from the response cache."
        );
        describe_counter!(
            "nazim_public_cache_miss_total",
            Unit::Count,
            "Public responses rendered because the cache had no fresh entry."
        );
        describe_counter!(
            "nazim_public_cache_evictions_total",
            Unit::Count,
            "Cached public responses evicted to stay within cache.max_entries."
        );
        describe_counter!(
            "nazim_rate_limited_total",
            Unit::Count,
            "Public submissions rejected by the rate limiter."
        );
    });
}
