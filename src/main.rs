//! m3u-catalog - converts an M3U/M3U8 playlist into channels.json

// Use mimalloc for faster memory allocation (Linux, macOS)
#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use m3u_catalog::browse::{group_by_category, sorted_categories};
use m3u_catalog::{
    category_counts, parse_m3u, read_playlist, write_catalog, CatalogConfig, CatalogError,
    Channel,
};

#[derive(Parser, Debug)]
#[command(name = "m3u-catalog")]
#[command(about = "Convert an M3U/M3U8 playlist into a JSON channel catalog")]
#[command(version)]
struct Cli {
    /// Playlist to convert (.m3u, .m3u8, optionally gzip compressed)
    input: PathBuf,

    /// Catalog to write [default: public/channels.json]
    output: Option<PathBuf>,

    /// Write compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,

    /// List categories in configured priority order instead of first-seen order
    #[arg(long)]
    sort: bool,

    /// Read settings from this file instead of the user config directory
    #[arg(long)]
    config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Output path and pretty-printing after applying CLI overrides to the config
#[derive(Debug, PartialEq)]
struct Settings {
    output: PathBuf,
    pretty: bool,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> CatalogConfig {
    match &cli.config {
        Some(path) => CatalogConfig::load_from(path),
        None => CatalogConfig::load(),
    }
}

fn resolve(cli: &Cli, config: &CatalogConfig) -> Settings {
    Settings {
        output: cli.output.clone().unwrap_or_else(|| config.output_path.clone()),
        pretty: config.pretty && !cli.compact,
    }
}

/// Per-category counts, first-seen order unless `priority` is given
fn report_categories(
    out: &mut impl Write,
    channels: &[Channel],
    priority: Option<&[String]>,
) -> io::Result<()> {
    writeln!(out, "Categories found:")?;

    let counts = match priority {
        Some(priority) => {
            let groups = group_by_category(channels);
            sorted_categories(&groups, priority)
                .into_iter()
                .map(|cat| {
                    let n = groups[&cat].len();
                    (cat, n)
                })
                .collect()
        }
        None => category_counts(channels),
    };

    for (category, count) in counts {
        writeln!(out, "  - {}: {} channels", category, count)?;
    }
    Ok(())
}

fn run(cli: &Cli, config: &CatalogConfig, out: &mut impl Write) -> Result<()> {
    let settings = resolve(cli, config);

    if !cli.input.exists() {
        return Err(CatalogError::InputNotFound(cli.input.clone()).into());
    }

    writeln!(out, "Reading M3U file: {}", cli.input.display())?;
    let content = read_playlist(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;

    writeln!(out, "Parsing channels...")?;
    let channels = parse_m3u(&content);

    writeln!(out, "Writing {} channels to: {}", channels.len(), settings.output.display())?;
    write_catalog(&settings.output, &channels, settings.pretty)
        .with_context(|| format!("writing {}", settings.output.display()))?;

    writeln!(out, "Done!")?;
    writeln!(out)?;
    let priority = cli.sort.then_some(config.category_priority.as_slice());
    report_categories(out, &channels, priority)?;

    Ok(())
}

fn exit_status(result: &Result<()>) -> u8 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            1
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(&cli);
    let result = run(&cli, &config, &mut io::stdout().lock());
    ExitCode::from(exit_status(&result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const PLAYLIST: &str = r#"#EXTM3U
#EXTINF:-1 group-title="Music",Radio Nova
http://example.com/nova
#EXTINF:-1 group-title="News",CNN
http://example.com/cnn
#EXTINF:-1 group-title="News",BBC
http://example.com/bbc
"#;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("m3u-catalog").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_missing_input_argument_rejected() {
        assert!(Cli::try_parse_from(["m3u-catalog"]).is_err());
    }

    #[test]
    fn test_resolve_uses_config_defaults() {
        let config = CatalogConfig::default();
        let settings = resolve(&cli(&["in.m3u"]), &config);
        assert_eq!(
            settings,
            Settings { output: PathBuf::from("public/channels.json"), pretty: true }
        );
    }

    #[test]
    fn test_resolve_output_and_compact_override() {
        let config = CatalogConfig::default();
        let settings = resolve(&cli(&["in.m3u", "out/list.json", "--compact"]), &config);
        assert_eq!(settings, Settings { output: PathBuf::from("out/list.json"), pretty: false });
    }

    #[test]
    fn test_config_flag_selects_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, r#"{"output_path": "site/ch.json", "pretty": false}"#).unwrap();

        let cli = cli(&["in.m3u", "--config", path.to_str().unwrap()]);
        let settings = resolve(&cli, &load_config(&cli));
        assert_eq!(settings, Settings { output: PathBuf::from("site/ch.json"), pretty: false });
    }

    #[test]
    fn test_run_writes_catalog_and_report() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("playlist.m3u");
        let output = dir.path().join("public").join("channels.json");
        fs::write(&input, PLAYLIST).unwrap();

        let cli = cli(&[input.to_str().unwrap(), output.to_str().unwrap(), "--compact"]);
        let mut out = Vec::new();
        run(&cli, &CatalogConfig::default(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], format!("Reading M3U file: {}", input.display()));
        assert_eq!(lines[1], "Parsing channels...");
        assert_eq!(lines[2], format!("Writing 3 channels to: {}", output.display()));
        assert_eq!(
            &lines[3..],
            &["Done!", "", "Categories found:", "  - Music: 1 channels", "  - News: 2 channels"]
        );

        let written = fs::read_to_string(&output).unwrap();
        assert!(!written.contains('\n'));
        assert_eq!(serde_json::from_str::<Vec<Channel>>(&written).unwrap().len(), 3);
    }

    #[test]
    fn test_run_sorted_report_uses_priority() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("playlist.m3u");
        let output = dir.path().join("channels.json");
        fs::write(&input, PLAYLIST).unwrap();

        let cli = cli(&[input.to_str().unwrap(), output.to_str().unwrap(), "--sort"]);
        let mut out = Vec::new();
        run(&cli, &CatalogConfig::default(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let report: Vec<&str> = text.lines().skip_while(|l| *l != "Categories found:").collect();
        assert_eq!(
            report,
            vec!["Categories found:", "  - News: 2 channels", "  - Music: 1 channels"]
        );
    }

    #[test]
    fn test_missing_input_fails_before_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing.m3u");
        let output = dir.path().join("channels.json");

        let cli = cli(&[input.to_str().unwrap(), output.to_str().unwrap()]);
        let mut out = Vec::new();
        let result = run(&cli, &CatalogConfig::default(), &mut out);

        assert!(out.is_empty());
        assert!(!output.exists());
        assert!(format!("{:#}", result.as_ref().unwrap_err()).contains("not found"));
        assert_eq!(exit_status(&result), 1);
        assert_eq!(exit_status(&Ok(())), 0);
    }
}
