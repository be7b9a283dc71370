//! Match agent: command-line client for the resume job-matching service

mod api;
mod cli;
mod config;
mod error;
mod store;

use api::matching::RecommendationResponse;
use api::ApiClient;
use clap::Parser;
use cli::{Cli, Commands, ConfigAction};
use colored::Colorize;
use config::Config;
use error::Result;
use indicatif::{ProgressBar, ProgressStyle};
use log::error;
use serde_json::Value;
use std::process;
use std::time::Duration;
use store::SessionStore;

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // Load configuration
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Execute command
    if let Err(e) = run_command(cli.command, config).await {
        eprintln!("{} {}", "✗".red(), e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Upload { file } => {
            let mut store = open_store(&config)?;

            println!("📄 Resume: {}", file.display());
            let spinner = spinner("Uploading resume...");
            let result = store.upload(&file).await;
            spinner.finish_and_clear();
            let payload = result?;
            store.save(&Config::session_path())?;

            println!("{} Resume uploaded", "✓".green());
            if let Some(filename) = payload.get("filename").and_then(Value::as_str) {
                println!("  • File: {}", filename);
            }
            if let Some(resume_file) = store.resume_file() {
                println!("  • Resume id: {}", resume_file);
            }
        }

        Commands::Recommend { top } => {
            let mut store = open_store(&config)?;

            let spinner = spinner("Fetching job recommendations...");
            let result = store.fetch_recommendations(top).await;
            spinner.finish_and_clear();
            // A failed fetch clears the stored list and summary; persist
            // that before surfacing the error.
            store.save(&Config::session_path())?;
            let response = result?;

            print_recommendations(&response);
        }

        Commands::Report { job_id } => {
            let mut store = open_store(&config)?;

            // A cache hit resolves without any request, so only show the
            // spinner when the report actually has to be fetched.
            let cached = store.cached_report(&job_id).is_some();
            let result = if cached {
                store.fetch_report(&job_id).await
            } else {
                let spinner = spinner("Fetching match report...");
                let result = store.fetch_report(&job_id).await;
                spinner.finish_and_clear();
                result
            };
            let report = result?;
            if !cached {
                store.save(&Config::session_path())?;
            }

            print_report(&job_id, &report, cached);
        }

        Commands::Session => {
            let store = open_store(&config)?;
            print_session(&store);
        }

        Commands::Reset => {
            let mut store = open_store(&config)?;
            store.reset();
            std::fs::remove_file(Config::session_path()).ok();
            println!("{} Session cleared", "✓".green());
        }

        Commands::Config { action } => match action.unwrap_or(ConfigAction::Show) {
            ConfigAction::Show => {
                println!("{}", "Configuration".bold());
                println!("  • Locale: {}", config.locale);
                println!("  • API base URL: {}", config.api.base_url);
                println!("  • Request timeout: {} ms", config.api.timeout_ms);
            }
            ConfigAction::SetLocale { locale } => {
                let mut config = config;
                config.locale = locale;
                config.save()?;
                println!("{} Locale set to {}", "✓".green(), config.locale);
            }
            ConfigAction::Reset => {
                Config::default().save()?;
                println!("{} Configuration reset to defaults", "✓".green());
            }
        },
    }

    Ok(())
}

fn open_store(config: &Config) -> Result<SessionStore<ApiClient>> {
    let service = ApiClient::new(&config.api)?;
    SessionStore::load(service, &Config::session_path())
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or(ProgressStyle::default_spinner()),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

fn print_recommendations(response: &RecommendationResponse) {
    if let Some(name) = &response.resume_name {
        println!("👤 Candidate: {}", name);
    }

    println!("\n{}", "Recommended jobs".bold());
    if response.recommendations.is_empty() {
        println!("  (no matching jobs found)");
    }
    for (index, job) in response.recommendations.iter().enumerate() {
        let title = job.title.as_deref().unwrap_or("(untitled)");
        let score = format!("{:.1}%", job.score * 100.0);
        println!("  {}. {} — {}", index + 1, title.bold(), score.green());

        if let Some(company) = &job.company {
            println!("     🏢 {}", company);
        }
        if let Some(location) = &job.location {
            println!("     📍 {}", location);
        }
        if let Some(deadline) = &job.deadline {
            println!("     📅 Apply by {}", deadline);
        }
        if let Some(job_id) = &job.job_id {
            println!("     🔖 Job id: {}", job_id);
        }
        if let Some(snippet) = &job.snippet {
            println!("     {}", snippet.dimmed());
        }
    }

    if !response.summary.is_empty() {
        println!("\n{}", "Summary".bold());
        println!("{}", response.summary);
    }
}

fn print_report(job_id: &str, report: &Value, cached: bool) {
    println!("{} (job {})", "Match report".bold(), job_id);
    if cached {
        println!("{}", "(served from session cache)".dimmed());
    }

    match report.as_object() {
        Some(fields) => {
            if let Some(title) = fields.get("job_title").and_then(Value::as_str) {
                println!("  • Position: {}", title);
            }
            if let Some(company) = fields.get("company").and_then(Value::as_str) {
                println!("  • Company: {}", company);
            }
            if let Some(location) = fields.get("location").and_then(Value::as_str) {
                println!("  • Location: {}", location);
            }
            if let Some(score) = fields.get("similarity_score").and_then(Value::as_f64) {
                println!("  • Similarity: {:.1}%", score * 100.0);
            }
            if let Some(analysis) = fields.get("analysis").and_then(Value::as_str) {
                println!("\n{}", "Analysis".bold());
                println!("{}", analysis);
            }
        }
        None => {
            println!("{}", serde_json::to_string_pretty(report).unwrap_or_default());
        }
    }
}

fn print_session(store: &SessionStore<ApiClient>) {
    println!("{}", "Session".bold());
    match store.resume_file() {
        Some(resume_file) => println!("  • Resume: {}", resume_file),
        None => println!("  • Resume: (none uploaded)"),
    }
    println!(
        "  • Recommendations: {} cached",
        store.recommendations().len()
    );
    println!("  • Match reports: {} cached", store.report_cache_len());
}
