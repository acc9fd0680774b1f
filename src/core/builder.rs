use crate::core::dataset::Dataset;
use crate::core::fee::parse_fee;
use crate::core::relevance::RelevanceFilter;
use crate::domain::model::{RawEntry, Record};
use url::Url;

/// Maps catalogue entries to fee records.
///
/// Entries whose program is not relevant, or whose cost text has no parseable
/// fee, are skipped and logged; a bad entry never fails the build.
#[derive(Debug, Clone, Default)]
pub struct RecordBuilder {
    filter: RelevanceFilter,
}

impl RecordBuilder {
    pub fn new(filter: RelevanceFilter) -> Self {
        Self { filter }
    }

    pub fn build(&self, entries: &[RawEntry]) -> Dataset {
        let mut records = Vec::new();
        let mut irrelevant = 0usize;
        let mut unparsed = 0usize;

        for entry in entries {
            if !self.filter.is_relevant(&entry.program_name_th) {
                irrelevant += 1;
                continue;
            }

            let Some(fee) = parse_fee(&entry.cost) else {
                unparsed += 1;
                tracing::debug!(
                    "Skipping '{}' at {}: no fee in {:?}",
                    entry.program_name_th,
                    entry.university_name_th,
                    entry.cost
                );
                continue;
            };

            records.push(to_record(entry, fee));
        }

        tracing::info!(
            "🔎 Kept {} of {} catalogue entries ({} not relevant, {} without a parseable fee)",
            records.len(),
            entries.len(),
            irrelevant,
            unparsed
        );

        Dataset::new(records)
    }
}

fn to_record(entry: &RawEntry, fee: u64) -> Record {
    Record {
        university: entry.university_name_th.clone(),
        faculty: entry.faculty_name_th.clone(),
        program: entry.program_name_th.clone(),
        campus: entry.campus_name_th.clone(),
        tuition_fee_text: entry.cost.clone(),
        tuition_fee_numeric: fee,
        more_info_url: more_info_url(&entry.cost),
    }
}

/// Trailing whitespace-delimited token of the fee text, if it is an HTTP(S) URL.
pub fn more_info_url(fee_text: &str) -> String {
    fee_text
        .split_whitespace()
        .last()
        .filter(|token| {
            Url::parse(token)
                .map(|url| matches!(url.scheme(), "http" | "https"))
                .unwrap_or(false)
        })
        .map(str::to_string)
        .unwrap_or_default()
}

pub fn build_dataset(entries: &[RawEntry]) -> Dataset {
    RecordBuilder::default().build(entries)
}
