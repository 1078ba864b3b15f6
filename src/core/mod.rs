pub mod engine;
pub mod normalizer;
pub mod validator;

pub use crate::domain::model::{
    BirthRequest, CanonicalInstant, Classification, ParsedLocalMoment, UtcOffsetValue,
};
pub use crate::domain::ports::{ChartEngine, ChartSession, ConfigProvider};
pub use crate::utils::error::Result;
