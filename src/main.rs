use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};

use dirmap::app::App;
use dirmap::config::AppConfig;
use dirmap::scanner::FsSource;
use dirmap::ui::tooltip::format_size;

fn main() -> Result<()> {
    let config = AppConfig::default();

    // Initialize logging; stdout carries command output, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(config.log_directive.parse()?),
        )
        .init();

    // Parse command line: optional path argument, defaults to the working directory
    let root_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    tracing::info!("dirmap starting, root path: {:?}", root_path);

    let mut app = App::load(&root_path, &FsSource::new(), config)
        .with_context(|| format!("building tree for {}", root_path.display()))?;

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    if stdin.is_terminal() {
        println!(
            "{}: {} files, {} dirs, {} in {} ms; viewport {}x{}. Type 'help' for commands.",
            app.stats.root.display(),
            app.stats.total_files,
            app.stats.total_dirs,
            format_size(app.stats.total_bytes),
            app.stats.elapsed_ms,
            app.viewport_width,
            app.viewport_height
        );
    }

    app.run(stdin.lock(), &mut stdout)
}
