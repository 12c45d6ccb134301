use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use element_explorer::View;
use element_explorer::core::config::{self, CliOverrides};
use element_explorer::core::element;
use element_explorer::tui;
use simplelog::{ConfigBuilder, WriteLogger};

#[derive(Parser)]
#[command(name = "element-explorer", about = "Periodic table explorer and element quiz")]
struct Args {
    /// Element dataset (JSON array). Defaults to the bundled table.
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Start in the quiz view
    #[arg(short, long)]
    quiz: bool,

    /// Never call the lookup backend
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = config::load_config().unwrap_or_else(|e| {
        eprintln!("Ignoring config file: {e}");
        config::ExplorerConfig::default()
    });
    let overrides = CliOverrides {
        dataset: args.dataset,
        view: args.quiz.then_some(View::Quiz),
        offline: args.offline,
    };
    let resolved = config::resolve(&file_config, &overrides);

    // Initialize file logger - writes to element-explorer.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create("element-explorer.log") {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!(
        "Element Explorer starting up (view={:?}, offline={}, dataset={:?})",
        resolved.start_view,
        resolved.offline,
        resolved.dataset_file
    );

    let elements = element::load(resolved.dataset_file.as_deref())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    log::info!("Loaded {} elements", elements.len());

    tui::run(elements, resolved)
}
