use clap::Parser as ClapParser;
use slinky::{log_error_card, log_social_card, setup_logging, LogConfig, Parser, ParserConfig};
use std::process::ExitCode;

/// Recognize social media profile URLs.
#[derive(ClapParser, Debug)]
#[command(name = "parse_cli")]
struct Args {
    /// URLs to parse
    #[arg(required = true)]
    urls: Vec<String>,

    /// How many leading host labels may be matched by wildcards
    #[arg(long, default_value_t = slinky::DEFAULT_MAX_WILDCARDS)]
    max_wildcards: usize,

    /// Print results as JSON lines on stdout instead of log cards
    #[arg(long)]
    json: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let args = Args::parse();

    setup_logging(LogConfig {
        log_level: args.log_level.clone(),
        file_output: false,
        ..LogConfig::default()
    });

    let parser = Parser::with_config(ParserConfig::new().with_max_wildcards(args.max_wildcards));
    let mut failed = false;

    for url in &args.urls {
        match parser.parse(url) {
            Ok(parsed) if args.json => match serde_json::to_string(&parsed) {
                Ok(line) => println!("{line}"),
                Err(e) => {
                    eprintln!("{url}: {e}");
                    failed = true;
                }
            },
            Ok(parsed) => log_social_card(&parsed),
            Err(e) => {
                log_error_card(url, &e);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
