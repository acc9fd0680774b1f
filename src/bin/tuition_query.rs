use anyhow::{Context, Result};
use clap::Parser;
use tuition_etl::utils::logger;
use tuition_etl::{dataset_from_csv, run_query, Dataset, Query, QueryResult, SelectionMode, Summary};

/// Rows printed from the display set.
const TABLE_ROW_LIMIT: usize = 20;

#[derive(Parser)]
#[command(name = "tuition-query")]
#[command(about = "Query a tuition fee dataset by faculty, fee range and ranking")]
struct Args {
    /// Dataset table written by tuition-etl
    #[arg(short, long, default_value = "./output/tuition_fees.csv")]
    dataset: String,

    /// Exact faculty name to filter on
    #[arg(short, long)]
    faculty: Option<String>,

    /// Lowest fee to include (Baht)
    #[arg(long)]
    min: Option<u64>,

    /// Highest fee to include (Baht)
    #[arg(long)]
    max: Option<u64>,

    #[arg(short, long, value_enum, default_value_t = SelectionMode::All)]
    mode: SelectionMode,

    /// Print the available faculties and exit
    #[arg(long)]
    list_faculties: bool,

    /// Print the result as JSON instead of a table
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    verbose: bool,
}

fn build_query(args: &Args, dataset: &Dataset) -> Query {
    let mut query = Query::all().with_mode(args.mode);

    // 空白的學院選項等同不篩選
    if let Some(faculty) = args.faculty.as_deref().filter(|f| !f.trim().is_empty()) {
        query = query.with_faculty(faculty);
    }

    // 只給一端時，另一端用整個資料集的範圍
    if args.min.is_some() || args.max.is_some() {
        let low = args.min.unwrap_or(0);
        let high = args.max.or(dataset.max_fee()).unwrap_or(0);
        query = query.with_range(low, high);
    }

    query
}

fn format_baht(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn print_result(query: &Query, result: &QueryResult<'_>) {
    println!("{}", query.mode.title());
    println!();

    match &result.summary {
        Summary::NoData => {
            println!("No programs match the selected filters.");
            return;
        }
        Summary::Stats(stats) => {
            println!("  Programs:      {}", format_baht(stats.count as u64));
            println!("  Mean fee:      {}", format_baht(stats.mean_fee.round() as u64));
            println!("  Highest fee:   {}", format_baht(stats.max_fee));
            println!("  Lowest fee:    {}", format_baht(stats.min_fee));
            println!(
                "  Universities:  {}",
                format_baht(stats.distinct_university_count as u64)
            );
        }
    }

    println!();
    for record in result.display.iter().take(TABLE_ROW_LIMIT) {
        println!(
            "{:>12}  {} | {} | {} | {}",
            format_baht(record.tuition_fee_numeric),
            record.university,
            record.faculty,
            record.program,
            record.campus
        );
    }

    if result.display.len() > TABLE_ROW_LIMIT {
        println!(
            "… {} more rows not shown",
            result.display.len() - TABLE_ROW_LIMIT
        );
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let data = std::fs::read(&args.dataset)
        .with_context(|| format!("failed to read dataset '{}'", args.dataset))?;
    let dataset = dataset_from_csv(&data).context("dataset table is malformed")?;
    tracing::debug!(
        "Loaded {} records built at {}",
        dataset.len(),
        dataset.built_at()
    );

    if args.list_faculties {
        for faculty in dataset.faculties() {
            println!("{}", faculty);
        }
        return Ok(());
    }

    let query = build_query(&args, &dataset);
    let result = run_query(&dataset, &query);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&query, &result);
    }

    Ok(())
}
