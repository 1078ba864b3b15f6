// Domain layer: request/instant models and ports to the chart engine.
// No HTTP or config types leak in here.

pub mod model;
pub mod ports;
