use std::path::PathBuf;

use clap::Parser;

use version_lens::config::log_path;
use version_lens::lsp::server::{LogFormat, run_server};

#[derive(Parser)]
#[command(name = "version-lens")]
#[command(
    version,
    about = "Language Server that annotates dependency manifests with latest versions"
)]
struct Cli {
    /// Log file path (defaults to the data directory)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log file format
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let log_file = cli.log_file.unwrap_or_else(log_path);

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?
        .block_on(run_server(&log_file, cli.log_format))
}
