//! Health probing of the hosted application.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::status::Signal;

/// What a single health request observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// 2xx response.
    Healthy,
    /// Any other HTTP status.
    Unavailable(u16),
    /// Connection refused, DNS failure, timeout, ...
    Unreachable(String),
}

impl ProbeOutcome {
    pub fn signal(&self) -> Signal {
        match self {
            ProbeOutcome::Healthy => Signal::ProbeHealthy,
            ProbeOutcome::Unavailable(_) => Signal::ProbeUnavailable,
            ProbeOutcome::Unreachable(_) => Signal::ProbeUnreachable,
        }
    }
}

/// Issues one health request. Failures are outcomes, never errors.
#[async_trait]
pub trait HealthProbe: Send + Sync {
    async fn check(&self, url: &str) -> ProbeOutcome;
}

/// Plain HTTP GET probe.
pub struct HttpHealthProbe {
    http: reqwest::Client,
}

impl HttpHealthProbe {
    /// Build a probe whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .user_agent(concat!("ragchat-embed/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }

    /// Share an existing client (and its connection pool).
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl HealthProbe for HttpHealthProbe {
    async fn check(&self, url: &str) -> ProbeOutcome {
        match self.http.get(url).send().await {
            Ok(response) if response.status().is_success() => ProbeOutcome::Healthy,
            Ok(response) => ProbeOutcome::Unavailable(response.status().as_u16()),
            Err(e) => {
                debug!(url, error = %e, "health request failed");
                ProbeOutcome::Unreachable(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe() -> HttpHealthProbe {
        HttpHealthProbe::new(Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn outcomes_map_to_signals() {
        assert_eq!(ProbeOutcome::Healthy.signal(), Signal::ProbeHealthy);
        assert_eq!(
            ProbeOutcome::Unavailable(503).signal(),
            Signal::ProbeUnavailable
        );
        assert_eq!(
            ProbeOutcome::Unreachable("refused".into()).signal(),
            Signal::ProbeUnreachable
        );
    }

    #[tokio::test]
    async fn ok_response_is_healthy() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/_stcore/health")
            .with_status(200)
            .with_body("ok")
            .create_async()
            .await;

        let url = format!("{}/_stcore/health", server.url());
        assert_eq!(probe().check(&url).await, ProbeOutcome::Healthy);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn no_content_is_healthy() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/_stcore/health")
            .with_status(204)
            .create_async()
            .await;

        let url = format!("{}/_stcore/health", server.url());
        assert_eq!(probe().check(&url).await, ProbeOutcome::Healthy);
    }

    #[tokio::test]
    async fn service_unavailable_is_reported_with_status() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/_stcore/health")
            .with_status(503)
            .create_async()
            .await;

        let url = format!("{}/_stcore/health", server.url());
        assert_eq!(probe().check(&url).await, ProbeOutcome::Unavailable(503));
    }

    #[tokio::test]
    async fn refused_connection_is_unreachable() {
        // Port 1 is reserved and nothing listens there.
        let outcome = probe().check("http://127.0.0.1:1/_stcore/health").await;
        assert!(matches!(outcome, ProbeOutcome::Unreachable(_)));
    }
}
