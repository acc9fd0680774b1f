use crate::core::aggregate::{summarize, Summary};
use crate::core::dataset::Dataset;
use crate::domain::model::Record;
use serde::Serialize;
use std::cmp::Reverse;

/// Size of the top/bottom selections.
pub const SELECTION_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    #[default]
    All,
    #[cfg_attr(feature = "cli", value(name = "top"))]
    TopN,
    #[cfg_attr(feature = "cli", value(name = "bottom"))]
    BottomN,
}

impl SelectionMode {
    pub fn title(&self) -> String {
        match self {
            SelectionMode::All => "All tuition fees per semester".to_string(),
            SelectionMode::TopN => format!("Top {} most expensive", SELECTION_LIMIT),
            SelectionMode::BottomN => format!("Top {} least expensive", SELECTION_LIMIT),
        }
    }
}

/// Inclusive fee bounds. `low > high` is allowed and matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeeRange {
    pub low: u64,
    pub high: u64,
}

impl FeeRange {
    pub fn new(low: u64, high: u64) -> Self {
        Self { low, high }
    }

    pub fn contains(&self, fee: u64) -> bool {
        self.low <= fee && fee <= self.high
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    pub faculty: Option<String>,
    pub range: Option<FeeRange>,
    pub mode: SelectionMode,
}

impl Query {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_faculty(mut self, faculty: impl Into<String>) -> Self {
        self.faculty = Some(faculty.into());
        self
    }

    pub fn with_range(mut self, low: u64, high: u64) -> Self {
        self.range = Some(FeeRange::new(low, high));
        self
    }

    pub fn with_mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Answer to one query.
///
/// `filtered` is the facet + range population and is what `summary` describes.
/// `display` is the mode-reduced, fee-descending subset meant for tables and
/// charts. The two are kept apart on purpose: stats never shrink to the top 10.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult<'a> {
    pub filtered: Vec<&'a Record>,
    pub display: Vec<&'a Record>,
    pub summary: Summary,
}

pub fn filter_records<'a>(
    dataset: &'a Dataset,
    faculty: Option<&str>,
    range: Option<FeeRange>,
) -> Vec<&'a Record> {
    dataset
        .records()
        .iter()
        .filter(|r| faculty.map_or(true, |f| r.faculty == f))
        .filter(|r| range.map_or(true, |range| range.contains(r.tuition_fee_numeric)))
        .collect()
}

/// Derives the display set from a filtered set.
///
/// Top/bottom selections are stable: among equal fees the record appearing
/// first in `filtered` wins the cutoff. The result is always sorted by fee
/// descending, ties in `filtered` order.
pub fn select_display<'a>(filtered: &[&'a Record], mode: SelectionMode) -> Vec<&'a Record> {
    let mut ranked: Vec<(usize, &'a Record)> = filtered.iter().copied().enumerate().collect();

    match mode {
        SelectionMode::All => {}
        SelectionMode::TopN => {
            ranked.sort_by_key(|(_, r)| Reverse(r.tuition_fee_numeric));
            ranked.truncate(SELECTION_LIMIT);
        }
        SelectionMode::BottomN => {
            ranked.sort_by_key(|(_, r)| r.tuition_fee_numeric);
            ranked.truncate(SELECTION_LIMIT);
        }
    }

    ranked.sort_by_key(|(pos, r)| (Reverse(r.tuition_fee_numeric), *pos));
    ranked.into_iter().map(|(_, r)| r).collect()
}

pub fn run_query<'a>(dataset: &'a Dataset, query: &Query) -> QueryResult<'a> {
    let filtered = filter_records(dataset, query.faculty.as_deref(), query.range);
    let display_set = select_display(&filtered, query.mode);
    let summary = summarize(&filtered);

    tracing::debug!(
        "Query {:?}: {} filtered, {} displayed",
        query,
        filtered.len(),
        display_set.len()
    );

    QueryResult {
        filtered,
        display: display_set,
        summary,
    }
}
