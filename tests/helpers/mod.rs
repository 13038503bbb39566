//! Mock ntfy and IFTTT servers shared by the integration tests.

#![allow(dead_code)]

use dietcoke::config::Config;
use std::time::Duration;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOPIC: &str = "dc-test-topic";
pub const KEY: &str = "test-key";

/// A running pair of mock services and a config pointing at them.
pub struct MockServices {
    pub ntfy: MockServer,
    pub ifttt: MockServer,
}

impl MockServices {
    pub async fn start() -> Self {
        Self {
            ntfy: MockServer::start().await,
            ifttt: MockServer::start().await,
        }
    }

    /// A config with both channels enabled, credentials set, and the given timeout.
    pub fn config(&self, timeout: Duration) -> Config {
        let mut config = Config::default();
        config.dispatch.timeout_ms = timeout.as_millis() as u64;
        config.ntfy.base_url = self.ntfy.uri();
        config.ntfy.topic = Some(TOPIC.to_string());
        config.ifttt.base_url = self.ifttt.uri();
        config.ifttt.key = Some(KEY.to_string());
        config
    }

    /// The ntfy topic answers with `status` after `delay`.
    pub async fn ntfy_responds(&self, status: u16, delay: Duration) {
        Mock::given(method("POST"))
            .and(path(format!("/{}", TOPIC)))
            .respond_with(ResponseTemplate::new(status).set_delay(delay))
            .mount(&self.ntfy)
            .await;
    }

    /// Any IFTTT trigger answers with `status` after `delay`.
    pub async fn ifttt_responds(&self, status: u16, delay: Duration) {
        Mock::given(method("POST"))
            .and(path_regex(r"^/trigger/[^/]+/with/key/[^/]+$"))
            .respond_with(ResponseTemplate::new(status).set_delay(delay))
            .mount(&self.ifttt)
            .await;
    }

    /// Fails the test on drop if the IFTTT server receives any request.
    pub async fn ifttt_expects_no_calls(&self) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&self.ifttt)
            .await;
    }
}

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}
