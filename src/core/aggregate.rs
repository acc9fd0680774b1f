use crate::domain::model::Record;
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeStats {
    pub count: usize,
    pub mean_fee: f64,
    pub max_fee: u64,
    pub min_fee: u64,
    pub distinct_university_count: usize,
}

/// Statistics over a filtered set. An empty set is `NoData`, never zeroed stats.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "stats", rename_all = "snake_case")]
pub enum Summary {
    NoData,
    Stats(FeeStats),
}

impl Summary {
    pub fn stats(&self) -> Option<&FeeStats> {
        match self {
            Summary::Stats(stats) => Some(stats),
            Summary::NoData => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, Summary::NoData)
    }
}

pub fn summarize(records: &[&Record]) -> Summary {
    let Some(first) = records.first() else {
        return Summary::NoData;
    };

    let mut total: u128 = 0;
    let mut max_fee = first.tuition_fee_numeric;
    let mut min_fee = first.tuition_fee_numeric;
    let mut universities = HashSet::new();

    for record in records {
        let fee = record.tuition_fee_numeric;
        total += u128::from(fee);
        max_fee = max_fee.max(fee);
        min_fee = min_fee.min(fee);
        universities.insert(record.university.as_str());
    }

    Summary::Stats(FeeStats {
        count: records.len(),
        mean_fee: total as f64 / records.len() as f64,
        max_fee,
        min_fee,
        distinct_university_count: universities.len(),
    })
}
