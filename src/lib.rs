pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use core::{
    aggregate::{summarize, FeeStats, Summary},
    builder::{build_dataset, RecordBuilder},
    dataset::{Dataset, SharedDataset},
    etl::{EtlEngine, EtlRun},
    fee::parse_fee,
    pipeline::TuitionPipeline,
    query::{run_query, FeeRange, Query, QueryResult, SelectionMode, SELECTION_LIMIT},
    relevance::{is_relevant, RelevanceFilter},
    table::{dataset_from_csv, dataset_to_csv},
};
pub use domain::model::{RawEntry, Record};
pub use utils::error::{EtlError, Result};
