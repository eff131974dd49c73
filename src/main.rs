#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;

use clap::Parser;
use gantt_task_view::app::GanttApp;
use gantt_task_view::config::ChartConfig;

#[derive(Debug, Parser)]
#[command(name = "gantt-task-view", version, about = "Interactive Gantt chart demo")]
struct Args {
    /// Settings file (defaults to the OS config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Lay the time axis out right to left.
    #[arg(long)]
    rtl: bool,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn init_logging(level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let mut config = ChartConfig::load_or_default(args.config.as_deref());
    config.rtl |= args.rtl;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Gantt Task View"),
        ..Default::default()
    };

    eframe::run_native(
        "Gantt Task View",
        options,
        Box::new(|cc| Ok(Box::new(GanttApp::new(cc, config).with_settings_path(args.config)))),
    )
}
