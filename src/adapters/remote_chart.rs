use crate::domain::model::{CanonicalInstant, Classification};
use crate::domain::ports::{ChartEngine, ChartSession, ConfigProvider};
use crate::utils::error::{HdError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ChartRequest<'a> {
    utc_instant: String,
    ephemeris: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChartReply {
    #[serde(rename = "type")]
    hd_type: String,
}

/// 透過 HTTP 呼叫外部星盤計算服務
///
/// `POST {endpoint}`，body 為 `{"utcInstant": ..., "ephemeris": ...}`，
/// 回應 `{"type": ...}`。
#[derive(Debug, Clone)]
pub struct RemoteChartEngine {
    client: Client,
    endpoint: String,
    ephemeris: String,
    active_sessions: Arc<AtomicUsize>,
}

impl RemoteChartEngine {
    pub fn new(
        endpoint: impl Into<String>,
        timeout: Duration,
        ephemeris: impl Into<String>,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            ephemeris: ephemeris.into(),
            active_sessions: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.chart_endpoint(),
            config.chart_timeout(),
            config.ephemeris(),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// 目前尚未釋放的 session 數
    pub fn active_sessions(&self) -> usize {
        self.active_sessions.load(Ordering::SeqCst)
    }
}

impl ChartEngine for RemoteChartEngine {
    fn open_session(&self) -> Result<Box<dyn ChartSession>> {
        let guard = SessionGuard::acquire(Arc::clone(&self.active_sessions));
        Ok(Box::new(RemoteChartSession {
            client: self.client.clone(),
            endpoint: self.endpoint.clone(),
            ephemeris: self.ephemeris.clone(),
            _guard: guard,
        }))
    }

    fn name(&self) -> &str {
        "remote"
    }
}

struct SessionGuard(Arc<AtomicUsize>);

impl SessionGuard {
    fn acquire(counter: Arc<AtomicUsize>) -> Self {
        let active = counter.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!("Chart session opened ({} active)", active);
        Self(counter)
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let active = self.0.fetch_sub(1, Ordering::SeqCst) - 1;
        tracing::debug!("Chart session released ({} active)", active);
    }
}

pub struct RemoteChartSession {
    client: Client,
    endpoint: String,
    ephemeris: String,
    _guard: SessionGuard,
}

#[async_trait]
impl ChartSession for RemoteChartSession {
    async fn classify(&mut self, instant: &CanonicalInstant) -> Result<Classification> {
        let payload = ChartRequest {
            utc_instant: instant.to_rfc3339(),
            ephemeris: &self.ephemeris,
        };

        tracing::debug!("Making chart request to: {}", self.endpoint);
        let response = self.client.post(&self.endpoint).json(&payload).send().await?;
        let status = response.status();
        tracing::debug!("Chart response status: {}", status);

        let body = response.text().await?;
        if !status.is_success() {
            return Err(HdError::ChartError {
                message: format!("chart engine returned {}: {}", status, body.trim()),
            });
        }

        let reply: ChartReply = serde_json::from_str(&body).map_err(|e| HdError::ChartError {
            message: format!("unexpected chart engine response: {}", e),
        })?;

        if reply.hd_type.trim().is_empty() {
            return Err(HdError::ChartError {
                message: "chart engine returned an empty type".to_string(),
            });
        }

        Ok(Classification::new(reply.hd_type))
    }
}
