use anyhow::Context;
use clap::Parser;
use colored::*;
use dialoguer::{theme::ColorfulTheme, Select};
use irrigation_report::cli::{self, App, Cli, OutputFormat};
use irrigation_report::config::AppConfig;
use irrigation_report::logging::init_logging;
use irrigation_report::models::ManualFlags;
use tracing::{error, info};

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let config = AppConfig::from_env()
        .context("reading environment")?
        .with_stations_file(args.stations.clone());

    let _log_guard = init_logging(args.log_json, config.log_dir.as_deref());

    info!("Initializing irrigation report extractor...");

    let app = match App::new(&config) {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {:?}", e);
            println!(
                "{}",
                "Error: Failed to load the station table. Check logs.".red()
            );
            return Err(e).context("loading station table");
        },
    };

    match args.command {
        Some(command) => app.run(command).context("running command"),
        None => interactive(&app),
    }
}

fn interactive(app: &App) -> anyhow::Result<()> {
    println!(
        "{}",
        "Welcome to the daily irrigation report extractor!".cyan().bold()
    );

    loop {
        let options = &[
            "Paste a report",
            "Load a report from file",
            "Show station table",
            "Exit",
        ];

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("What would you like to do?")
            .items(options)
            .default(0)
            .interact_opt()?
            .unwrap_or(options.len() - 1);

        println!("\n---\n");

        let text = match selection {
            0 => cli::prompt_report_text(),
            1 => cli::prompt_report_path().and_then(|p| cli::read_input(Some(&p))),
            2 => {
                println!("{}", cli::display::stations_table(app.table()));
                continue;
            },
            3 => {
                println!("{}", "Exiting application. Goodbye!".green());
                break;
            },
            _ => unreachable!(),
        };

        let result = text.and_then(|text| {
            let over = match app.table().primary() {
                Some(primary) => cli::prompt_override(primary)?,
                None => None,
            };
            let manual = ManualFlags {
                reservoir: cli::prompt_flag("อ่างเก็บน้ำ")?,
                flood: cli::prompt_flag("สถานการณ์อุทกภัย")?,
            };
            let record = app.extract(&text, over.as_ref(), manual);
            app.render(&record, OutputFormat::Table)
        });

        match result {
            Ok(out) => println!("{}", out),
            Err(e) => {
                error!("Extraction failed: {:?}", e);
                println!("{} {}", "Error:".red(), e.to_string().red());
            },
        }

        println!("\n---\n");
    }

    Ok(())
}
