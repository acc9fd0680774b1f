pub mod aggregate;
pub mod builder;
pub mod dataset;
pub mod etl;
pub mod fee;
pub mod pipeline;
pub mod query;
pub mod relevance;
pub mod table;

pub use crate::domain::model::{RawEntry, Record};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
