use banter::core::config;
use banter::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "banter", about = "Terminal chat client for the Gemini API")]
struct Args {
    /// Model to talk to (overrides config and BANTER_MODEL)
    #[arg(short, long)]
    model: Option<String>,

    /// Override the Gemini API base URL (e.g. a local proxy)
    #[arg(long)]
    provider_url: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to banter.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("banter.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()));
        }
    };
    let resolved = config::resolve(
        &file_config,
        args.model.as_deref(),
        args.provider_url.as_deref(),
    );

    log::info!(
        "Banter starting up: model={}, base_url={}",
        resolved.model_name,
        resolved.gemini_base_url
    );

    tui::run(resolved)
}
