use anyhow::Context;
use memocho::config::{AppConfig, CliOptions};
use memocho::{error, logging, TuiApplication};

const USAGE: &str = "\
Usage: memocho [OPTIONS]

Options:
  --config <PATH>        read settings from PATH instead of the default config file
  --debug-log [PATH]     write debug logs to PATH (default: data dir/memocho/debug.log)
  -h, --help             print this help
  -V, --version          print version";

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = CliOptions::parse(&args).context("invalid command line")?;

    if options.show_help {
        println!("{}", USAGE);
        return Ok(());
    }
    if options.show_version {
        println!("memocho {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let config = AppConfig::load_or_default(options.config_path.as_deref())
        .context("failed to load configuration")?
        .merged_with(&options);

    logging::init(config.log_level, config.log_file.as_deref())
        .context("failed to initialize logging")?;
    error::setup_panic_handler();

    let mut app = TuiApplication::new(config)?;
    app.run()?;

    Ok(())
}
