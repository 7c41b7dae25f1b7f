mod history;
mod logging;
mod tui;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use pinkfit_core::{
    config, today, FileRecordRepository, HistoryPeriod, HistoryUseCase, Metric, RecordService, SaveOutcome,
};

#[derive(Parser)]
#[command(name = "pinkfit")]
#[command(about = "Track daily weight and body fat", long_about = None)]
struct Cli {
    /// Directory holding the record file [default: ~/.pinkfit]
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Save today's values (usage: log --weight 70.5 --body-fat 21)
    Log {
        /// Weight in kg
        #[arg(long, short)]
        weight: Option<String>,
        /// Body fat in %
        #[arg(long, short = 'f')]
        body_fat: Option<String>,
    },
    /// Show today's record
    Show,
    /// Print stats and entries for a trailing period
    History {
        /// One of 7d, 14d, 1m, 6m, 1y
        #[arg(long, short, default_value = "7d")]
        period: HistoryPeriod,
        /// weight or bodyfat
        #[arg(long, short, default_value = "weight")]
        metric: Metric,
    },
    /// Open the Terminal User Interface
    Tui,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let data_dir = config::data_dir(cli.data_dir)?;

    let command = cli.command.unwrap_or(Commands::Tui);
    // The TUI owns stdout/stderr, so it logs to a file
    let _guard = match command {
        Commands::Tui => {
            std::fs::create_dir_all(&data_dir)?;
            Some(logging::init_file(&data_dir))
        }
        _ => {
            logging::init_stderr();
            None
        }
    };

    let repo = FileRecordRepository::open(Some(data_dir))?;
    let service = RecordService::new(repo);

    match command {
        Commands::Log { weight, body_fat } => {
            let weight = weight.unwrap_or_default();
            let body_fat = body_fat.unwrap_or_default();
            match service.save_today(weight.trim(), body_fat.trim())? {
                SaveOutcome::Skipped => {
                    println!("Nothing to save: pass --weight and/or --body-fat.");
                    return Ok(());
                }
                outcome => println!("{}", outcome.message()),
            }
            let date = today();
            let saved = service.get_record(date)?;
            history::show_record(date, saved.as_ref());
        },
        Commands::Show => {
            let date = today();
            let record = service.get_record(date)?;
            history::show_record(date, record.as_ref());
        },
        Commands::History { period, metric } => {
            let usecase = HistoryUseCase::new(service.repository());
            let report = usecase.report_for_today(period, metric)?;
            history::show_history(&report);
        },
        Commands::Tui => {
            tui::run(service)?;
        },
    }
    Ok(())
}
