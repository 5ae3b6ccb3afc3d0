use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use scout::{AgeFilter, PipelineConfig, ZeroOverallPolicy};
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    #[arg(short = 'i', long = "input", value_name = "FILE")]
    input: std::path::PathBuf,

    #[arg(short = 'o', long = "output", value_name = "DIR")]
    output: std::path::PathBuf,

    /// 1 keeps only players under 23, 0 keeps everyone
    #[arg(short = 'a', long = "age-filter", default_value_t = 0, allow_negative_numbers = true)]
    age_filter: i64,

    /// null or fail
    #[arg(long = "on-zero-overall", default_value = "null")]
    zero_overall: ZeroOverallPolicy,

    #[arg(long, default_value_t = 100)]
    preview_rows: usize,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set the default level based on verbosity
    let default_level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let config = ConfigBuilder::new().add_filter_allow_str("scout").build();
    TermLogger::init(
        default_level,
        config,
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )?;

    log::trace!("Args {:#?}", args);

    let config = PipelineConfig::new(args.input, args.output)
        .age_filter(AgeFilter::try_from(args.age_filter)?)
        .zero_overall(args.zero_overall)
        .preview_rows(args.preview_rows);

    let summary = scout::run(&config)?;
    println!(
        "{} of {} players written to {} ({} partitions)",
        summary.rows_written,
        summary.rows_read,
        config.output.display(),
        summary.partitions.len()
    );

    Ok(())
}
