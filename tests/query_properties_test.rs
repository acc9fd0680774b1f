use tuition_etl::{
    build_dataset, parse_fee, run_query, summarize, Dataset, Query, RawEntry, Record,
    SelectionMode, SELECTION_LIMIT,
};

const FACULTIES: [&str; 3] = ["วิศวกรรมศาสตร์", "วิทยาศาสตร์", "เทคโนโลยีสารสนเทศ"];

/// Small deterministic generator so the datasets are reproducible.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }
}

fn generated_dataset(seed: u64, size: usize) -> Dataset {
    let mut rng = Lcg(seed);
    let records = (0..size)
        .map(|i| {
            // 少量離散值，確保有大量同額
            let fee = (rng.next() % 8) * 5_000 + 15_000;
            Record {
                university: format!("มหาวิทยาลัย {}", rng.next() % 7),
                faculty: FACULTIES[(rng.next() % 3) as usize].to_string(),
                program: format!("วิศวกรรมคอมพิวเตอร์ {}", i),
                campus: String::new(),
                tuition_fee_text: format!("{} บาท", fee),
                tuition_fee_numeric: fee,
                more_info_url: String::new(),
            }
        })
        .collect();
    Dataset::new(records)
}

fn queries() -> Vec<Query> {
    let mut queries = Vec::new();
    for mode in [SelectionMode::All, SelectionMode::TopN, SelectionMode::BottomN] {
        queries.push(Query::all().with_mode(mode));
        queries.push(Query::all().with_mode(mode).with_range(20_000, 40_000));
        for faculty in FACULTIES {
            queries.push(Query::all().with_mode(mode).with_faculty(faculty));
        }
        queries.push(
            Query::all()
                .with_mode(mode)
                .with_faculty(FACULTIES[0])
                .with_range(25_000, 25_000),
        );
    }
    queries
}

fn position(dataset: &Dataset, record: &Record) -> usize {
    dataset
        .records()
        .iter()
        .position(|r| std::ptr::eq(r, record))
        .unwrap()
}

#[test]
fn test_summary_matches_filtered_set() {
    for seed in 1..=20 {
        let dataset = generated_dataset(seed, (seed as usize) * 3);
        for query in queries() {
            let result = run_query(&dataset, &query);

            match result.summary.stats() {
                None => assert!(result.filtered.is_empty()),
                Some(stats) => {
                    assert_eq!(stats.count, result.filtered.len());
                    assert!(stats.min_fee as f64 <= stats.mean_fee);
                    assert!(stats.mean_fee <= stats.max_fee as f64);
                }
            }
            assert_eq!(result.summary, summarize(&result.filtered));
        }
    }
}

#[test]
fn test_display_sorted_descending_with_stable_ties() {
    for seed in 1..=20 {
        let dataset = generated_dataset(seed, 40);
        for query in queries() {
            let result = run_query(&dataset, &query);

            for pair in result.display.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                assert!(a.tuition_fee_numeric >= b.tuition_fee_numeric);
                if a.tuition_fee_numeric == b.tuition_fee_numeric {
                    assert!(position(&dataset, a) < position(&dataset, b));
                }
            }
        }
    }
}

#[test]
fn test_top_and_bottom_sizes_and_cutoffs() {
    for seed in 1..=20 {
        let dataset = generated_dataset(seed, (seed as usize) * 2);
        for query in queries() {
            let result = run_query(&dataset, &query);
            let hidden: Vec<&Record> = result
                .filtered
                .iter()
                .copied()
                .filter(|r| !result.display.iter().any(|d| std::ptr::eq(*d, *r)))
                .collect();

            match query.mode {
                SelectionMode::All => {
                    assert_eq!(result.display.len(), result.filtered.len());
                }
                SelectionMode::TopN => {
                    assert_eq!(
                        result.display.len(),
                        SELECTION_LIMIT.min(result.filtered.len())
                    );
                    for shown in &result.display {
                        for other in &hidden {
                            assert!(shown.tuition_fee_numeric >= other.tuition_fee_numeric);
                            // 同額時較早出現者勝出
                            if shown.tuition_fee_numeric == other.tuition_fee_numeric {
                                assert!(position(&dataset, shown) < position(&dataset, other));
                            }
                        }
                    }
                }
                SelectionMode::BottomN => {
                    assert_eq!(
                        result.display.len(),
                        SELECTION_LIMIT.min(result.filtered.len())
                    );
                    for shown in &result.display {
                        for other in &hidden {
                            assert!(shown.tuition_fee_numeric <= other.tuition_fee_numeric);
                            if shown.tuition_fee_numeric == other.tuition_fee_numeric {
                                assert!(position(&dataset, shown) < position(&dataset, other));
                            }
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn test_out_of_range_query_is_empty_not_error() {
    let dataset = generated_dataset(7, 30);
    for mode in [SelectionMode::All, SelectionMode::TopN, SelectionMode::BottomN] {
        let result = run_query(
            &dataset,
            &Query::all()
                .with_mode(mode)
                .with_range(10_000_000, 20_000_000),
        );
        assert!(result.filtered.is_empty());
        assert!(result.display.is_empty());
        assert!(result.summary.is_no_data());
    }
}

#[test]
fn test_fee_text_without_marker_never_parses() {
    let texts = [
        "",
        "เรียนฟรี",
        "12,500",
        "12,500 ต่อภาคการศึกษา",
        "Baht 12,500",
        "บาท 12,500",
        "https://example.ac.th/fees",
    ];
    for text in texts {
        assert_eq!(parse_fee(text), None, "{:?}", text);
    }
}

#[test]
fn test_thai_numeral_fee_builds_record() {
    let entries = vec![RawEntry {
        program_name_th: "วิศวกรรมคอมพิวเตอร์".to_string(),
        university_name_th: "มหาวิทยาลัย ก".to_string(),
        faculty_name_th: FACULTIES[0].to_string(),
        campus_name_th: String::new(),
        cost: "ค่าเทอม ๑๒,๕๐๐ บาท".to_string(),
    }];

    let dataset = build_dataset(&entries);
    assert_eq!(dataset.len(), 1);
    assert_eq!(dataset.records()[0].tuition_fee_numeric, 12500);
}

#[test]
fn test_build_dataset_repeatable() {
    let entries: Vec<RawEntry> = (0..50)
        .map(|i| RawEntry {
            program_name_th: if i % 3 == 0 {
                "วิศวกรรมโยธา".to_string()
            } else {
                "วิศวกรรมคอมพิวเตอร์".to_string()
            },
            university_name_th: format!("มหาวิทยาลัย {}", i),
            faculty_name_th: FACULTIES[i % 3].to_string(),
            campus_name_th: String::new(),
            cost: if i % 5 == 0 {
                "ไม่ระบุ".to_string()
            } else {
                format!("{},000 บาท", 10 + i)
            },
        })
        .collect();

    let first = build_dataset(&entries);
    let second = build_dataset(&entries);

    assert_eq!(first.records(), second.records());

    let expected: Vec<String> = (0..50)
        .filter(|i| i % 3 != 0 && i % 5 != 0)
        .map(|i| format!("มหาวิทยาลัย {}", i))
        .collect();
    let kept: Vec<String> = first
        .records()
        .iter()
        .map(|r| r.university.clone())
        .collect();
    assert_eq!(kept, expected);
}
