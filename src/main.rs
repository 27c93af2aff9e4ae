// src/main.rs
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;

use medtui::api::query::{parse_symptoms, HospitalQuery};
use medtui::api::{ApiClient, HospitalSearch};
use medtui::intake::PatientIntake;
use medtui::ui::hospitals::{place_cells, COLUMNS};
use medtui::utils::formatter::{format_json, maps_search_url, render_colored, truncate};
use medtui::{logging, tui, AppConfig, Highlighter, Strategy};

#[derive(Parser, Debug)]
#[command(name = "medtui", about = "Medical report assistant for the terminal")]
struct Cli {
    /// Path to config file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Backend base URL, overrides config and environment
    #[arg(long, global = true)]
    backend: Option<String>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Highlight keywords in a local text file.
    Highlight {
        /// Text file to highlight
        #[arg(long)]
        file: PathBuf,
        /// Keyword to highlight; repeatable
        #[arg(long = "keyword", short = 'k', required = true)]
        keywords: Vec<String>,
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,
        /// Print plain text with the configured markers instead of colors
        #[arg(long)]
        marked: bool,
    },

    /// Upload a PDF and print the highlighted text and detected conditions.
    Extract {
        pdf: PathBuf,
        /// Print the raw result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Search hospitals by city or coordinates.
    Hospitals {
        /// Comma separated symptoms
        #[arg(long)]
        symptoms: String,
        #[arg(long, conflicts_with_all = ["lat", "lng"])]
        city: Option<String>,
        #[arg(long, requires = "lng", allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lng: Option<f64>,
        #[arg(long)]
        json: bool,
    },

    /// Submit a saved intake form and print the generated summary.
    Intake { form: PathBuf },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    Merged,
    Sequential,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Merged => Strategy::Merged,
            StrategyArg::Sequential => Strategy::Sequential,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(url) = &cli.backend {
        config.override_backend(url)?;
    }

    match cli.command {
        None => {
            if let Some(path) = config.log_path() {
                logging::init_file(&path)?;
            }
            tui::run(&config).await?;
        }
        Some(command) => {
            logging::init_stderr();
            run_command(command, &config).await?;
        }
    }

    Ok(())
}

async fn run_command(command: Commands, config: &AppConfig) -> anyhow::Result<()> {
    match command {
        Commands::Highlight { file, keywords, strategy, marked } => cmd_highlight(config, &file, &keywords, strategy, marked),
        Commands::Extract { pdf, json } => cmd_extract(config, &pdf, json).await,
        Commands::Hospitals { symptoms, city, lat, lng, json } => {
            let symptoms = parse_symptoms(&symptoms);
            let query = match (city, lat, lng, config.default_location) {
                (Some(city), _, _, _) => HospitalQuery::city(&city, symptoms)?,
                (None, Some(lat), Some(lng), _) => HospitalQuery::nearby(lat, lng, symptoms)?,
                (None, _, _, Some(loc)) => HospitalQuery::nearby(loc.latitude, loc.longitude, symptoms)?,
                _ => bail!("pass --city, or --lat and --lng (or set default_location in the config)"),
            };
            cmd_hospitals(config, &query, json).await
        }
        Commands::Intake { form } => cmd_intake(config, &form).await,
    }
}

fn cmd_highlight(
    config: &AppConfig,
    file: &Path,
    keywords: &[String],
    strategy: Option<StrategyArg>,
    marked: bool,
) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let mut highlighter = Highlighter::from_config(&config.highlight);
    if let Some(strategy) = strategy {
        highlighter = highlighter.with_strategy(strategy.into());
    }

    if marked {
        println!("{}", highlighter.render_marked(&text, keywords));
    } else {
        let highlighted = highlighter.highlight(&text, keywords);
        tracing::info!(matches = highlighted.match_count(), "highlighted {}", file.display());
        println!("{}", render_colored(&highlighted));
    }
    Ok(())
}

async fn cmd_extract(config: &AppConfig, pdf: &Path, json: bool) -> anyhow::Result<()> {
    let client = ApiClient::new(config)?;
    let result = client.extract_diseases(pdf).await?;

    if json {
        println!("{}", format_json(&result).map_err(anyhow::Error::msg)?);
        return Ok(());
    }

    let highlighted = Highlighter::from_config(&config.highlight).highlight(&result.source_text, &result.keywords);
    println!("{}", render_colored(&highlighted));
    println!();

    let conditions = result.distinct_keywords();
    if conditions.is_empty() {
        println!("No medical conditions identified in the document.");
    } else {
        println!("{}", "Identified Medical Conditions".bold());
        for condition in conditions {
            println!("  • {}", condition);
        }
    }
    Ok(())
}

async fn cmd_hospitals(config: &AppConfig, query: &HospitalQuery, json: bool) -> anyhow::Result<()> {
    let client = ApiClient::new(config)?;
    let search = client.search_hospitals(query).await?;

    if json {
        println!("{}", format_json(&search).map_err(anyhow::Error::msg)?);
        return Ok(());
    }
    print_hospitals(&search, query);
    Ok(())
}

fn print_hospitals(search: &HospitalSearch, query: &HospitalQuery) {
    if let Some(message) = &search.message {
        println!("{}", message.green());
    }
    if search.places.is_empty() {
        println!("No hospitals found.");
        return;
    }

    println!("{} hospital(s) {}", search.places.len(), query.describe());
    println!(
        "{}",
        format!("{:<32} {:<20} {:<6} {}", COLUMNS[0], COLUMNS[1], COLUMNS[2], COLUMNS[3]).bold()
    );
    for place in &search.places {
        let [name, specialization, rating, address] = place_cells(place);
        println!(
            "{:<32} {:<20} {:<6} {}",
            truncate(&name, 32),
            truncate(&specialization, 20),
            rating,
            address
        );
        println!("{:<60} {}", "", maps_search_url(&place.address).dimmed());
    }
    if let Some(map) = &search.map_url {
        println!("\nMap view: {}", map.cyan());
    }
}

async fn cmd_intake(config: &AppConfig, form: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(form).with_context(|| format!("reading {}", form.display()))?;
    let intake = PatientIntake::from_json(&content)?;
    let client = ApiClient::new(config)?;
    let summary = client.generate_summary(&intake).await?;
    println!("{}", summary);
    Ok(())
}
