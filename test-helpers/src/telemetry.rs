use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

/// Build a subscriber honoring RUST_LOG, falling back to `env_filter`.
///
/// Output goes through the test writer so it is captured per test.
pub fn get_subscriber(env_filter: String) -> impl Subscriber + Sync + Send {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(env_filter));
    let stderr = fmt::Layer::new().with_test_writer().compact();
    Registry::default().with(env_filter).with(stderr)
}
