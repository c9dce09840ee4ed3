use adss_cli::cli::{self, Cli};
use adss_cli::config::CliConfig;
use adss_cli::format::print_error;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let config = match CliConfig::resolve(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            print_error(&e.to_string(), Some("check the file passed with --config"));
            std::process::exit(1);
        }
    };

    // RUST_LOG wins, then --log-level, then the config file. Logs go to
    // stderr so stdout only carries command output.
    let level = cli.log_level.as_deref().unwrap_or(&config.logging.level);
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(level))
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli::run(cli, config) {
        tracing::debug!(error = ?e, "command failed");
        print_error(&e.to_string(), None);
        std::process::exit(1);
    }
}
