use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::env;
use std::path::PathBuf;
use tracing::{debug, info, warn, Level};
use tracing_subscriber::EnvFilter;
use texdist::{
    build_distribution, create_provider, AppConfig, DistributionReport, ExtensionPolicy,
    FileCopyConfig, ProviderKind,
};

fn main() -> Result<()> {
    // Parse command line arguments
    let matches = Command::new("texdist")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Copy all files used in a main LaTeX file to a given directory")
        .long_about(
            "Copy all files used in a main LaTeX file to a given directory.\n\n\
             Sources are searched with `git grep`, so only tracked content is seen.\n\
             Figures need to be included as \\includegraphics[...]{\\figdir/<filename>}\n\
             with \\def\\figdir{<dirname>} defined in the main file.",
        )
        .arg(
            Arg::new("main-tex-file")
                .value_name("MAIN_TEX_FILE")
                .help("Main LaTeX document, relative to the project root")
                .required(true),
        )
        .arg(
            Arg::new("output-dir")
                .value_name("OUTPUT_DIR")
                .help("Directory receiving the copied files")
                .required(true),
        )
        .arg(
            Arg::new("root")
                .long("root")
                .value_name("DIR")
                .help("Project root the document paths are relative to")
                .default_value("."),
        )
        .arg(
            Arg::new("working-tree")
                .long("working-tree")
                .help("Scan files on disk instead of asking git")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .help("Report what would be copied without copying")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the scan and copy report as JSON on stdout")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Set the log level (trace, debug, info, warn, error)")
                .default_value("info"),
        )
        .get_matches();

    // Initialize configuration from command line arguments
    let mut config = create_app_config(&matches)?;

    // Initialize logging
    initialize_logging(&config.log_level)?;

    // Load environment overrides
    load_environment_variables(&mut config);

    run_application(config)
}

/// Create application configuration from CLI arguments
fn create_app_config(matches: &ArgMatches) -> Result<AppConfig> {
    let required = |name: &str| -> Result<PathBuf> {
        matches
            .get_one::<String>(name)
            .map(PathBuf::from)
            .with_context(|| format!("Missing argument {name}"))
    };

    let log_level = matches
        .get_one::<String>("log-level")
        .cloned()
        .unwrap_or_else(|| "info".to_string());

    let provider = if matches.get_flag("working-tree") {
        ProviderKind::WorkingTree
    } else {
        ProviderKind::Git
    };

    Ok(AppConfig {
        root: required("root")?,
        main_document: required("main-tex-file")?,
        output_dir: required("output-dir")?,
        provider,
        git_program: None,
        extensions: ExtensionPolicy::default(),
        copy: FileCopyConfig {
            dry_run: matches.get_flag("dry-run"),
        },
        log_level,
        json: matches.get_flag("json"),
    })
}

/// Initialize structured logging on stderr, keeping stdout for reports
fn initialize_logging(log_level: &str) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    Ok(())
}

/// Apply overrides from the environment and an optional .env file
fn load_environment_variables(config: &mut AppConfig) {
    if dotenvy::dotenv().is_err() {
        debug!("No .env file found, using system environment variables");
    }

    config.apply_overrides(|name| env::var(name).ok());
}

/// Main application logic
fn run_application(config: AppConfig) -> Result<()> {
    info!("Starting texdist");
    debug!("Configuration: {:#?}", config);

    let provider = create_provider(config.provider, &config.root, config.git_program.as_deref());
    let report = build_distribution(&config, provider.as_ref())?;

    if config.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{json}");
    }

    print_scan_report(&report);
    print_copy_report(&report);

    Ok(())
}

/// Print the scan results
fn print_scan_report(report: &DistributionReport) {
    let scan = &report.scan;
    info!("=== SCAN REPORT ===");
    info!("Main document: {}", scan.main_document.path.display());
    info!("Figure directory: {:?}", scan.figure_dir);
    info!("Inputs: {}", scan.inputs.len());
    info!("Extras: {}", scan.extras.len());
    info!("Figures: {}", scan.figures.len());
    if !scan.missing_figures.is_empty() {
        warn!("Missing figures: {}", scan.missing_figures.len());
    }
}

/// Print the copy results
fn print_copy_report(report: &DistributionReport) {
    let copy = &report.copy;
    info!("=== FILE COPY REPORT ===");
    info!("Total references processed: {}", copy.total_processed());
    info!("Successfully copied: {}", copy.copied);
    info!("Skipped (not in project): {}", copy.skipped);
    info!("Copy failures: {}", copy.failed);
    info!("Success rate: {:.2}%", copy.success_rate() * 100.0);

    for reference in copy.skipped_references() {
        debug!("  not found in project: {}", reference);
    }
}
