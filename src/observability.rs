use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("aura.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("aura.client.request_errors");
pub(crate) static CLIENT_MISSING_REPLY: Counter = Counter::new("aura.client.missing_reply_field");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("aura.client.request_duration_seconds");

pub(crate) static HISTORY_LOAD_FALLBACKS: Counter = Counter::new("aura.history.load_fallbacks");
pub(crate) static HISTORY_SAVE_FAILURES: Counter = Counter::new("aura.history.save_failures");
pub(crate) static HISTORY_EVICTIONS: Counter = Counter::new("aura.history.evictions");

pub(crate) static SESSION_TURNS: Counter = Counter::new("aura.session.turns");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_counter(&CLIENT_MISSING_REPLY);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&HISTORY_LOAD_FALLBACKS);
    collector.register_counter(&HISTORY_SAVE_FAILURES);
    collector.register_counter(&HISTORY_EVICTIONS);

    collector.register_counter(&SESSION_TURNS);
}
