use clap::Args;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use univera::catalog::{export_colleges_csv, CatalogSnapshot, College};
use univera::error::AppError;
use univera::listing::{view, CollegeSearchParams, SortKey};

#[derive(Args, Debug)]
pub(crate) struct CatalogSearchArgs {
    /// Catalog snapshot (JSON) to search
    #[arg(long)]
    pub(crate) catalog: PathBuf,
    /// Free text matched against name, location and state
    #[arg(long)]
    pub(crate) query: Option<String>,
    #[arg(long)]
    pub(crate) state: Option<String>,
    /// Branch category, e.g. Engineering
    #[arg(long)]
    pub(crate) branch: Option<String>,
    /// Government, Private or Deemed
    #[arg(long = "type")]
    pub(crate) college_type: Option<String>,
    #[arg(long)]
    pub(crate) rating_min: Option<f64>,
    /// Lower bound on the cheapest annual branch fee (INR)
    #[arg(long)]
    pub(crate) fee_min: Option<f64>,
    /// Upper bound on the cheapest annual branch fee (INR)
    #[arg(long)]
    pub(crate) fee_max: Option<f64>,
    /// rating, fees or ranking (defaults to rating)
    #[arg(long, value_parser = parse_sort_key)]
    pub(crate) sort: Option<SortKey>,
}

impl From<&CatalogSearchArgs> for CollegeSearchParams {
    fn from(args: &CatalogSearchArgs) -> Self {
        Self {
            q: args.query.clone(),
            state: args.state.clone(),
            branch: args.branch.clone(),
            college_type: args.college_type.clone(),
            rating_min: args.rating_min,
            fee_min: args.fee_min,
            fee_max: args.fee_max,
            sort: args.sort,
        }
    }
}

#[derive(Args, Debug)]
pub(crate) struct CatalogExportArgs {
    /// Catalog snapshot (JSON) to export
    #[arg(long)]
    pub(crate) catalog: PathBuf,
    /// Destination CSV file. Writes to stdout when omitted.
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) fn parse_sort_key(raw: &str) -> Result<SortKey, String> {
    serde_json::from_value(serde_json::Value::String(raw.trim().to_ascii_lowercase()))
        .map_err(|_| format!("unknown sort key '{raw}', expected rating, fees or ranking"))
}

pub(crate) fn run_catalog_search(args: CatalogSearchArgs) -> Result<(), AppError> {
    let snapshot = CatalogSnapshot::from_path(&args.catalog)?;
    let params = CollegeSearchParams::from(&args);
    let results = view(&snapshot.colleges, &params.to_query(), params.sort_key());

    println!(
        "{} of {} colleges match (sorted by {:?})",
        results.count,
        snapshot.colleges.len(),
        params.sort_key()
    );
    for (position, college) in results.items.iter().enumerate() {
        println!("{:>3}. {}", position + 1, describe_college(college));
    }

    Ok(())
}

pub(crate) fn run_catalog_export(args: CatalogExportArgs) -> Result<(), AppError> {
    let snapshot = CatalogSnapshot::from_path(&args.catalog)?;

    match args.output {
        Some(path) => {
            let writer = BufWriter::new(File::create(&path)?);
            let rows = export_colleges_csv(&snapshot.colleges, writer)?;
            println!("Exported {rows} colleges to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            export_colleges_csv(&snapshot.colleges, &mut handle)?;
            handle.flush()?;
        }
    }

    Ok(())
}

fn describe_college(college: &College) -> String {
    let mut line = format!(
        "{} ({}, {}) [{}]",
        college.name,
        college.location,
        college.state,
        college.college_type.label()
    );
    if let Some(rating) = college.rating {
        line.push_str(&format!(" rating {rating:.1}"));
    }
    if let Some(fee) = college.min_annual_fee() {
        line.push_str(&format!(" from ₹{fee:.0}/yr"));
    }
    if let Some(rank) = college.nirf_ranking {
        line.push_str(&format!(" NIRF #{rank}"));
    }
    line
}
