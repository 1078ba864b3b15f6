use crate::domain::model::{CanonicalInstant, Classification};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// 外部星盤計算服務
///
/// 每個請求開一個 session，用完即丟；session 在 drop 時釋放資源，
/// 錯誤路徑也一樣。
pub trait ChartEngine: Send + Sync {
    fn open_session(&self) -> Result<Box<dyn ChartSession>>;

    fn name(&self) -> &str;
}

#[async_trait]
pub trait ChartSession: Send {
    async fn classify(&mut self, instant: &CanonicalInstant) -> Result<Classification>;
}

pub trait ConfigProvider: Send + Sync {
    fn chart_endpoint(&self) -> &str;
    fn chart_timeout(&self) -> Duration;
    fn ephemeris(&self) -> &str;
}
