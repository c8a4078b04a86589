mod action;
mod app;
mod event;
mod ui;

use std::path::PathBuf;
use std::time::Duration;

use app::App;
use clap::{Parser, ValueEnum};
use color_eyre::Result;
use event::{Event, EventHandler};
use pcmanager::config::{self, load_config, load_config_from_path};
use pcmanager::logging;
use pcmanager::report::Report;
use pcmanager::system::collector::Collector;
use pcmanager::system::sampler::Sampler;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "pcmanager",
    about = "System information, process manager, resource monitor and memory optimizer"
)]
struct Cli {
    /// Path to config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pause between resource samples in milliseconds
    #[arg(long)]
    sample_interval: Option<u64>,

    /// Memory to free when optimizing, in megabytes
    #[arg(long)]
    target_mb: Option<u64>,

    /// Write JSON-lines logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print a one-shot report instead of starting the interactive UI
    #[arg(long, value_enum, num_args = 0..=1, default_missing_value = "text")]
    report: Option<ReportFormat>,

    /// Number of processes listed by --report
    #[arg(long, default_value_t = 10)]
    top: usize,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    let config = load_config_for_cli(&cli);

    if let Some(path) = &config.general.log_file {
        logging::init_tracing_json(path)?;
    }

    if let Some(format) = cli.report {
        return print_report(&config, format, cli.top);
    }

    let mut terminal = ratatui::init();
    let result = run(&mut terminal, config).await;
    ratatui::restore();

    result
}

async fn run(terminal: &mut ratatui::DefaultTerminal, config: config::Config) -> Result<()> {
    let sample_interval = Duration::from_millis(config.general.sample_interval_ms);
    let sampler = Sampler::new(Duration::from_millis(config.general.measurement_window_ms));
    let mut app = App::new(config);
    let mut events = EventHandler::new(sampler, sample_interval);

    terminal.draw(|frame| ui::draw(frame, &app))?;

    while app.running {
        let Some(event) = events.next().await else {
            break;
        };
        match event {
            Event::Key(key) => {
                if key.kind != crossterm::event::KeyEventKind::Press {
                    continue;
                }
                let action = app.map_key(key);
                app.dispatch(action);
            }
            Event::Sample(result) => app.on_sample(result),
            Event::Resize => {}
        }
        terminal.draw(|frame| ui::draw(frame, &app))?;
    }

    Ok(())
}

fn load_config_for_cli(cli: &Cli) -> config::Config {
    let mut config = match &cli.config {
        Some(path) => load_config_from_path(path),
        None => load_config(),
    };

    if let Some(interval) = cli.sample_interval {
        config.general.sample_interval_ms = interval;
    }
    if let Some(target) = cli.target_mb {
        config.optimizer.target_mb = target;
    }
    if let Some(ref path) = cli.log_file {
        config.general.log_file = Some(path.clone());
    }

    config
}

fn print_report(config: &config::Config, format: ReportFormat, top: usize) -> Result<()> {
    let mut collector = Collector::new();
    let mut sampler = Sampler::new(Duration::from_millis(config.general.measurement_window_ms));
    let report = Report::collect(&mut collector, &mut sampler, top);

    match format {
        ReportFormat::Text => print!("{}", report.render_text()),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_flag_defaults_to_text() {
        let cli = Cli::try_parse_from(["pcmanager", "--report"]).unwrap();
        assert_eq!(cli.report, Some(ReportFormat::Text));
        assert_eq!(cli.top, 10);

        let cli = Cli::try_parse_from(["pcmanager", "--report", "json", "--top", "3"]).unwrap();
        assert_eq!(cli.report, Some(ReportFormat::Json));
        assert_eq!(cli.top, 3);
    }

    #[test]
    fn cli_overrides_config_file() {
        let cli = Cli::try_parse_from([
            "pcmanager",
            "--config",
            "/nonexistent/pcmanager.toml",
            "--sample-interval",
            "250",
            "--target-mb",
            "64",
        ])
        .unwrap();
        let config = load_config_for_cli(&cli);
        assert_eq!(config.general.sample_interval_ms, 250);
        assert_eq!(config.optimizer.target_bytes(), 64 * 1024 * 1024);
        assert!(config.general.log_file.is_none());
    }

    #[test]
    fn bad_report_format_is_rejected() {
        assert!(Cli::try_parse_from(["pcmanager", "--report", "xml"]).is_err());
    }
}
