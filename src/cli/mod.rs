use crate::{
    config::PlannerConfig,
    core::generator::{SampleGenerator, TextGenerator},
    services::{budget::CostSummary, gemini_client::GeminiClient},
    types::{Itinerary, PlanOutcome, TripExport, TripRequest, DEFAULT_CURRENCY},
    TripPlanner,
};
use anyhow::{bail, Context};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::{path::PathBuf, sync::Arc, time::Duration};
use tracing::{error, info};

fn command() -> Command {
    Command::new("trip-planner")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Plan a budget-friendly student trip with Gemini")
        .arg(
            Arg::new("destination")
                .help("Where you want to go (e.g. \"Paris\", \"Tokyo\")")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("days")
                .short('d')
                .long("days")
                .value_name("DAYS")
                .help("Number of days for the trip")
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(i64))
                .default_value("3"),
        )
        .arg(
            Arg::new("budget")
                .short('b')
                .long("budget")
                .value_name("AMOUNT")
                .help("Total budget in the chosen currency")
                .allow_negative_numbers(true)
                .value_parser(clap::value_parser!(f64))
                .default_value("200"),
        )
        .arg(
            Arg::new("interests")
                .short('i')
                .long("interests")
                .value_name("TAGS")
                .help("Comma-separated interests (history, food, nature, ...)")
                .value_delimiter(',')
                .action(ArgAction::Append)
                .default_values(["history", "food"]),
        )
        .arg(
            Arg::new("transport")
                .long("transport")
                .value_name("MODE")
                .help("Preferred transport")
                .default_value("metro/subway"),
        )
        .arg(
            Arg::new("stay")
                .long("stay")
                .value_name("TYPE")
                .help("Accommodation type")
                .default_value("hostel"),
        )
        .arg(
            Arg::new("currency")
                .short('c')
                .long("currency")
                .value_name("CODE")
                .help("Currency code for budget and costs")
                .default_value(DEFAULT_CURRENCY),
        )
        .arg(
            Arg::new("demo")
                .long("demo")
                .help("Use the built-in sample itinerary instead of calling Gemini")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("api-key")
                .short('k')
                .long("api-key")
                .value_name("KEY")
                .help("Gemini API key (or set GEMINI_API_KEY env var)"),
        )
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .value_name("MODEL")
                .help("Gemini model (or set GEMINI_MODEL env var)"),
        )
        .arg(
            Arg::new("base-url")
                .short('u')
                .long("base-url")
                .value_name("URL")
                .help("Gemini API base URL (or set GEMINI_BASE_URL env var)"),
        )
        .arg(
            Arg::new("timeout")
                .short('t')
                .long("timeout")
                .value_name("SECONDS")
                .help("Request timeout in seconds")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PATH")
                .help("Write the itinerary as JSON to this file (a directory gets a generated name)")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("raw")
                .long("raw")
                .help("Print the itinerary JSON as returned by the backend")
                .action(ArgAction::SetTrue),
        )
}

fn build_config(matches: &ArgMatches) -> anyhow::Result<PlannerConfig> {
    let mut config = PlannerConfig::from_env()?;

    if let Some(api_key) = matches.get_one::<String>("api-key") {
        config = config.with_api_key(api_key.as_str());
    }
    if let Some(model) = matches.get_one::<String>("model") {
        config = config.with_model(model.as_str());
    }
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config = config.with_base_url(base_url.as_str());
    }
    if let Some(timeout) = matches.get_one::<u64>("timeout") {
        config = config.with_timeout(Duration::from_secs(*timeout));
    }

    Ok(config)
}

fn build_request(matches: &ArgMatches) -> anyhow::Result<TripRequest> {
    let destination = matches
        .get_one::<String>("destination")
        .context("destination is required")?;
    let days = *matches.get_one::<i64>("days").context("days has a default")?;
    let budget = *matches
        .get_one::<f64>("budget")
        .context("budget has a default")?;
    let interests: Vec<String> = matches
        .get_many::<String>("interests")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();
    let transport = matches
        .get_one::<String>("transport")
        .context("transport has a default")?;
    let stay = matches
        .get_one::<String>("stay")
        .context("stay has a default")?;
    let currency = matches
        .get_one::<String>("currency")
        .context("currency has a default")?;

    Ok(TripRequest::new(
        destination.as_str(),
        days,
        budget,
        interests,
        transport.as_str(),
        stay.as_str(),
        currency.as_str(),
    )?)
}

/// Print the plan; returns `false` when the itinerary failed structural validation.
fn print_itinerary(request: &TripRequest, itinerary: &Itinerary, summary: &str, raw: bool) -> bool {
    let currency = request.currency();

    println!("\nTrip Summary:\n  {}", summary);

    if !itinerary.is_valid() {
        println!("\nInvalid itinerary format received from the backend:");
        for violation in crate::schemas::itinerary_violations(itinerary.as_value()) {
            println!("  - {}", violation);
        }
        println!("{:#}", itinerary.as_value());
        return false;
    }

    let costs = CostSummary::for_itinerary(request.budget(), itinerary);
    println!("\nCost Breakdown:");
    println!("  Total Estimated Cost: {} {}", currency, costs.total);
    println!("  Budget: {} {}", currency, costs.budget);
    println!("  Remaining Budget: {} {}", currency, costs.remaining);
    if let Some(average) = costs.average_daily {
        println!("  Average Daily Cost: {} {:.1}", currency, average);
    }
    if !costs.within_budget() {
        println!("  Warning: the plan exceeds your budget");
    }

    match itinerary.day_plans() {
        Ok(days) => {
            println!("\nDaily Itinerary:");
            for day in days {
                println!("\n  Day {} - {} {}", day.day, currency, day.cost);
                println!("  Transport: {}", day.transport);
                for activity in &day.activities {
                    println!("    * {}", activity);
                }
                if !day.notes.is_empty() {
                    println!("  Tips: {}", day.notes);
                }
            }
        }
        Err(err) => {
            error!("Could not render itinerary: {}", err);
            println!("{:#}", itinerary.as_value());
        }
    }

    if raw {
        println!("\nRaw itinerary:\n{:#}", itinerary.as_value());
    }
    true
}

/// Export document for a planned trip whose itinerary passed validation.
fn export_for(outcome: &PlanOutcome, request: &TripRequest) -> anyhow::Result<TripExport> {
    let itinerary = outcome.itinerary().context("no itinerary to export")?;
    if !itinerary.is_valid() {
        bail!("refusing to export an invalid itinerary");
    }
    outcome.export(request).context("no itinerary to export")
}

/// CLI entry point for the trip-planner tool
pub async fn run() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let matches = command().get_matches();

    let request = build_request(&matches)?;
    let config = build_config(&matches)?;
    let demo = matches.get_flag("demo");

    let generator: Arc<dyn TextGenerator> = if demo {
        Arc::new(SampleGenerator::new())
    } else {
        Arc::new(GeminiClient::new(config.clone())?)
    };
    let planner = TripPlanner::new(generator);

    info!("Planning trip to {}", request.destination());
    info!("Provider: {} ({})", config.provider(), config.provider_status().as_str());
    if demo {
        info!("Demo mode: using sample itinerary");
    }

    let outcome = planner.plan_trip(&request).await?;
    match &outcome {
        PlanOutcome::Planned { itinerary, summary } => {
            if !print_itinerary(&request, itinerary, summary, matches.get_flag("raw")) {
                bail!("backend returned an invalid itinerary");
            }
        }
        PlanOutcome::Failed { record, summary } => {
            error!("Itinerary generation failed: {}", record.error);
            eprintln!("\n{}\n{}", summary, record.suggestion);
            bail!("itinerary generation failed");
        }
    }

    if let Some(path) = matches.get_one::<PathBuf>("output") {
        let export = export_for(&outcome, &request)?;
        let target = if path.is_dir() {
            path.join(export.file_name())
        } else {
            path.clone()
        };
        std::fs::write(&target, export.to_json_pretty()?)
            .with_context(|| format!("failed to write {}", target.display()))?;
        println!("\nSaved itinerary to {}", target.display());
    }

    Ok(())
}
