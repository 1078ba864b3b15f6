use crate::core::{normalizer, validator};
use crate::domain::model::{BirthRequest, CanonicalInstant, Classification};
use crate::domain::ports::ChartEngine;
use crate::utils::error::Result;
use std::sync::Arc;

/// 驗證 → 正規化 → 星盤分類
///
/// 本身不持有跨請求的可變狀態，可同時處理任意多個請求。
#[derive(Clone)]
pub struct HdTypeEngine {
    chart: Arc<dyn ChartEngine>,
}

impl HdTypeEngine {
    pub fn new(chart: Arc<dyn ChartEngine>) -> Self {
        Self { chart }
    }

    pub fn chart_engine_name(&self) -> &str {
        self.chart.name()
    }

    /// 只做驗證與正規化，不呼叫星盤服務
    pub fn resolve_instant(&self, request: &BirthRequest) -> Result<CanonicalInstant> {
        let (moment, offset) = validator::validate(request)?;
        let instant = normalizer::to_utc(&moment, &offset);
        tracing::debug!(
            "Normalized {} with offset {} to {}",
            moment.naive(),
            offset,
            instant
        );
        Ok(instant)
    }

    pub async fn run(&self, request: &BirthRequest) -> Result<Classification> {
        let instant = self.resolve_instant(request)?;

        // session 在離開此函式時 drop，失敗路徑也會釋放
        let mut session = self.chart.open_session()?;
        let classification = session.classify(&instant).await?;

        tracing::info!(
            "🔮 Classified {} as {} via {}",
            instant,
            classification,
            self.chart.name()
        );
        Ok(classification)
    }
}
