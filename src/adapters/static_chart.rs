use crate::domain::model::{CanonicalInstant, Classification};
use crate::domain::ports::{ChartEngine, ChartSession};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 固定回傳同一個分類，用於離線煙霧測試與本機開發
#[derive(Debug, Clone)]
pub struct StaticChartEngine {
    label: Classification,
}

impl StaticChartEngine {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: Classification::new(label),
        }
    }
}

impl ChartEngine for StaticChartEngine {
    fn open_session(&self) -> Result<Box<dyn ChartSession>> {
        Ok(Box::new(StaticChartSession {
            label: self.label.clone(),
        }))
    }

    fn name(&self) -> &str {
        "static"
    }
}

struct StaticChartSession {
    label: Classification,
}

#[async_trait]
impl ChartSession for StaticChartSession {
    async fn classify(&mut self, instant: &CanonicalInstant) -> Result<Classification> {
        tracing::debug!("Static chart engine answering for {}", instant);
        Ok(self.label.clone())
    }
}
