use anyhow::{Context, Result};
use bingram::cli::{Cli, OutputFormat};
use bingram::config::BingramConfig;
use bingram::corpus::{CollectLimits, Corpus};
use bingram::csv_output::CsvOutput;
use bingram::engine;
use bingram::json_output::JsonOutput;
use bingram::report::Report;
use bingram::text_output;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Log filter: a valid `RUST_LOG` is used as given, otherwise warnings
/// (debug with `--verbose`)
fn log_filter(verbose: bool, rust_log: Option<&str>) -> EnvFilter {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    match rust_log.map(EnvFilter::try_new) {
        Some(Ok(filter)) => filter,
        _ => EnvFilter::new(level.as_str()),
    }
}

/// Initialize tracing subscriber for diagnostics on stderr
fn init_tracing(verbose: bool) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose, rust_log.as_deref()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Defaults, then the config file, then command-line flags
fn resolve_config(args: &Cli) -> Result<BingramConfig> {
    let base = match &args.config {
        Some(path) => BingramConfig::from_toml(path)?,
        None => BingramConfig::default(),
    };
    let config = args.apply_to(base);
    config.validate()?;
    Ok(config)
}

fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(text_output::render(report)),
        OutputFormat::Json => {
            let mut json = JsonOutput::new(report).to_json()?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Csv => Ok(CsvOutput::new(report).to_csv()),
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let config = resolve_config(&args)?;
    tracing::debug!(?config, "configuration");

    let corpus = Corpus::collect(
        args.paths.as_slice(),
        CollectLimits {
            buffer_size: config.buffer_size,
            max_files: config.max_files,
            histogram: config.histogram,
        },
    );
    if corpus.is_empty() {
        anyhow::bail!(
            "No input files loaded ({} rejected). Check paths and the -b/-f limits.",
            corpus.rejected().len()
        );
    }

    let analysis = engine::analyze(&corpus, &config);
    let report = Report::build(&analysis, &config);
    let rendered = render(&report, args.format)?;

    match &args.output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("Failed to write report: {}", path.display()))?,
        None => print!("{}", rendered),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn test_log_filter_defaults() {
        assert_eq!(log_filter(false, None).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter(true, None).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_log_filter_rust_log_wins_without_verbose() {
        assert_eq!(
            log_filter(false, Some("trace")).max_level_hint(),
            Some(LevelFilter::TRACE)
        );
        assert_eq!(
            log_filter(false, Some("error")).max_level_hint(),
            Some(LevelFilter::ERROR)
        );
    }

    #[test]
    fn test_log_filter_rust_log_wins_with_verbose() {
        assert_eq!(
            log_filter(true, Some("error")).max_level_hint(),
            Some(LevelFilter::ERROR)
        );
    }

    #[test]
    fn test_log_filter_invalid_rust_log_falls_back() {
        assert_eq!(
            log_filter(false, Some("bingram=loud")).max_level_hint(),
            Some(LevelFilter::WARN)
        );
    }
}
