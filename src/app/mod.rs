pub mod http;
pub mod server;

pub use http::{router, AppState, HD_TYPE_PATH};
pub use server::{build_chart_engine, build_router, serve};
