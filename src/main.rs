// Entry point and CLI flow.
//
// Interactive mode keeps the loaded rows and the current filter/focus
// settings for the whole session:
// - [1] loads and normalizes the CSV export,
// - [2] sets the search term and branch filter,
// - [3] sets the product-focus slots,
// - [4] recomputes every view, previews it and writes the report files.
// `--batch` does load + generate once and exits.
use clap::Parser;
use once_cell::sync::Lazy;
use sales_report::config::FileConfig;
use sales_report::dashboard::{Dashboard, DashboardConfig};
use sales_report::dates::DayOrder;
use sales_report::filter::{BranchFilter, ALL_BRANCHES};
use sales_report::focus::{FocusSlots, FOCUS_SLOT_COUNT};
use sales_report::types::SalesRow;
use sales_report::{loader, output, report, util};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Parser, Debug)]
#[command(name = "sales_report", version, about = "Daily sales tracking reports from CSV exports")]
struct Args {
    /// Sales export (CSV with a header row).
    #[arg(long, short, value_name = "FILE", default_value = "sales.csv")]
    input: PathBuf,

    /// JSON settings file; flags given on the command line win.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Case-insensitive search on invoice, sales and outlet codes.
    #[arg(long)]
    search: Option<String>,

    /// Branch code, or `All`.
    #[arg(long)]
    branch: Option<String>,

    /// Focus product code; repeat for up to 8 slots.
    #[arg(long = "focus", value_name = "SKU")]
    focus: Vec<String>,

    /// Read `NN/NN/YYYY` dates as month first.
    #[arg(long)]
    month_first: bool,

    /// Directory for report files.
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Load and generate once, without the menu.
    #[arg(long)]
    batch: bool,
}

struct AppState {
    input: PathBuf,
    out_dir: PathBuf,
    data: Option<Vec<SalesRow>>,
    config: DashboardConfig,
}

static APP_STATE: Lazy<Mutex<AppState>> = Lazy::new(|| {
    Mutex::new(AppState {
        input: PathBuf::from("sales.csv"),
        out_dir: PathBuf::from("reports"),
        data: None,
        config: DashboardConfig::default(),
    })
});

fn state() -> MutexGuard<'static, AppState> {
    APP_STATE.lock().unwrap_or_else(PoisonError::into_inner)
}

fn prompt(label: &str) -> String {
    print!("{}", label);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

fn read_choice() -> String {
    prompt("Enter choice: ")
}

/// Returns `true` if the user chose `Y`, `false` if they chose `N`.
fn prompt_back_to_menu() -> bool {
    loop {
        match prompt("Back to Report Selection (Y/N): ").to_uppercase().as_str() {
            "Y" => return true,
            "N" => return false,
            _ => println!("Invalid choice. Please enter Y or N."),
        }
    }
}

/// Merge the settings file (if any) with command-line flags.
fn resolve_settings(args: &Args) -> sales_report::error::Result<(DashboardConfig, PathBuf)> {
    let file = match &args.config {
        Some(p) => FileConfig::load(p)?,
        None => FileConfig::default(),
    };
    let mut config = file.dashboard_config()?;
    if let Some(s) = &args.search {
        config.filter.search = s.clone();
    }
    if let Some(b) = &args.branch {
        config.filter.branch = BranchFilter::parse(b);
    }
    if !args.focus.is_empty() {
        config.focus = FocusSlots::from_codes(&args.focus[..])?;
    }
    if args.month_first {
        config.day_order = DayOrder::MonthFirst;
    }
    let out_dir = args
        .out_dir
        .clone()
        .or(file.out_dir)
        .unwrap_or_else(|| PathBuf::from("reports"));
    Ok((config, out_dir))
}

fn handle_load() -> bool {
    let path = state().input.clone();
    match loader::load_csv(&path) {
        Ok((data, load_report)) => {
            println!(
                "Processing dataset... ({} rows read, {} loaded)",
                util::format_int(load_report.total_rows),
                util::format_int(load_report.loaded_rows)
            );
            if load_report.parse_errors > 0 {
                println!(
                    "Note: {} rows skipped because they could not be decoded.",
                    util::format_int(load_report.parse_errors)
                );
            }
            println!();
            state().data = Some(data);
            true
        }
        Err(e) => {
            eprintln!("Failed to load {}: {}\n", path.display(), e);
            false
        }
    }
}

fn handle_filters() {
    let branches = match &state().data {
        Some(rows) => sales_report::filter::branch_options(rows),
        None => Vec::new(),
    };
    let search = prompt("Search (invoice / sales / outlet, empty for none): ");
    if !branches.is_empty() {
        println!("Branches: {}", branches.join(", "));
    }
    let branch = prompt(&format!("Branch ({} for every branch): ", ALL_BRANCHES));
    let mut st = state();
    st.config.filter.search = search;
    st.config.filter.branch = if branch.is_empty() {
        BranchFilter::All
    } else {
        BranchFilter::parse(&branch)
    };
    println!();
}

fn handle_focus() {
    let skus = match &state().data {
        Some(rows) => sales_report::filter::sku_options(rows),
        None => Vec::new(),
    };
    if !skus.is_empty() {
        let sample: Vec<&str> = skus.iter().take(10).map(String::as_str).collect();
        println!("{} product codes available, e.g. {}", skus.len(), sample.join(", "));
    }
    let slot = prompt(&format!("Slot (1-{}): ", FOCUS_SLOT_COUNT));
    let Ok(slot) = slot.parse::<usize>() else {
        println!("Invalid slot.\n");
        return;
    };
    let code = prompt("Product code (empty to clear): ");
    let result = state().config.focus.set(slot.wrapping_sub(1), &code);
    match result {
        Ok(()) => println!(),
        Err(e) => println!("{}\n", e),
    }
}

/// Recompute, preview and export every report.
fn handle_generate_reports() -> bool {
    let (data, config, out_dir) = {
        let st = state();
        (st.data.clone(), st.config.clone(), st.out_dir.clone())
    };
    let Some(data) = data else {
        println!("Error: No data loaded. Please load the CSV file first (option 1).\n");
        return false;
    };

    println!("Generating reports...\n");
    let d = Dashboard::compute(&data, &config);

    println!("Key Figures\n");
    output::preview_table_rows(&report::kpi_rows(&d.kpi), 6);

    println!("Sales Performance (Net Omset)\n");
    output::preview_table_rows(&report::team_rows(&d.team), 10);

    println!("Top {} Products\n", d.products.len());
    output::preview_table_rows(&report::product_rows(&d.products), 5);

    println!("Outlet Pareto (80/20)");
    println!(
        "({} of {} outlets carry the first 80% of revenue)\n",
        d.pareto.iter().filter(|o| o.is_top80).count(),
        d.pareto.len()
    );
    output::preview_table_rows(&report::pareto_rows(&d.pareto), 5);

    println!("Daily Net Omset\n");
    output::preview_table_rows(&report::daily_rows(&d.daily), 7);

    if !config.focus.is_empty() {
        println!("OA Product Focus\n");
        let (header, body) = report::focus_table(&d.focus_grid, &config.focus);
        output::preview_records(&header, &body, 10);
    }

    match output::export_reports(&d, &config.focus, &out_dir) {
        Ok(files) => {
            println!("(Full tables exported to {})\n", out_dir.display());
            for f in files {
                println!("  {}", f.display());
            }
            println!();
            true
        }
        Err(e) => {
            eprintln!("Write error: {}\n", e);
            false
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let (config, out_dir) = match resolve_settings(&args) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Invalid settings: {}", e);
            return ExitCode::FAILURE;
        }
    };
    {
        let mut st = state();
        st.input = args.input.clone();
        st.out_dir = out_dir;
        st.config = config;
    }

    if args.batch {
        let ok = handle_load() && handle_generate_reports();
        return if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE };
    }

    loop {
        println!("Daily Sales Tracking:");
        println!("[1] Load the file");
        println!("[2] Set search / branch filter");
        println!("[3] Set product focus codes");
        println!("[4] Generate Reports\n");
        match read_choice().as_str() {
            "1" => {
                handle_load();
            }
            "2" => handle_filters(),
            "3" => handle_focus(),
            "4" => {
                println!();
                handle_generate_reports();
                if !prompt_back_to_menu() {
                    println!("Exiting the program.");
                    break;
                }
            }
            _ => {
                println!("Invalid choice. Please enter 1 to 4.\n");
            }
        }
    }
    ExitCode::SUCCESS
}
