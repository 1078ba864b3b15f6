// Adapters layer: concrete chart engines behind the ChartEngine port.

pub mod remote_chart;
pub mod static_chart;

pub use remote_chart::RemoteChartEngine;
pub use static_chart::StaticChartEngine;
