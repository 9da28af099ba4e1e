//! Developer CLI for running restaurant searches from the terminal.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::sync::Arc;

use discovery::ai::GeminiClient;
use discovery::fetch::HttpPageFetcher;
use discovery::pipeline::SearchPipeline;
use discovery::places::{GooglePlacesClient, NoopPlaceSearch};
use discovery::traits::PlaceSearch;
use discovery::types::{BudgetTier, SearchFilters};

#[derive(Parser)]
#[command(name = "discover", about = "Run a restaurant discovery search")]
struct Args {
    /// Location to search, e.g. "San Francisco, CA"
    location: String,

    /// Budget tiers to accept ($, $$, $$$, $$$$); repeatable
    #[arg(short, long)]
    budget: Vec<String>,

    /// Dietary restrictions, e.g. Vegetarian; repeatable
    #[arg(short, long)]
    dietary: Vec<String>,

    /// Cuisine types, e.g. Italian; repeatable
    #[arg(short, long)]
    cuisine: Vec<String>,

    /// Service types needed, e.g. Dine-in; repeatable
    #[arg(short, long)]
    service: Vec<String>,

    /// Accessibility requirements; repeatable
    #[arg(short, long)]
    accessibility: Vec<String>,

    /// Operating-time tags, e.g. "Open Late"; repeatable
    #[arg(short, long)]
    operational: Vec<String>,

    /// Minimum acceptable rating (0-5)
    #[arg(short = 'r', long, default_value_t = 0.0)]
    min_rating: f32,

    /// Gemini model id override
    #[arg(long)]
    model: Option<String>,

    /// Print the full result as JSON instead of a formatted list
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "discovery=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut budget = Vec::new();
    for symbol in &args.budget {
        let tier = BudgetTier::parse(symbol)
            .with_context(|| format!("unknown budget tier {symbol:?} (use $ .. $$$$)"))?;
        budget.push(tier);
    }

    let filters = SearchFilters {
        budget,
        dietary: args.dietary,
        cuisines: args.cuisine,
        service_type: args.service,
        accessibility: args.accessibility,
        operational: args.operational,
        min_rating: args.min_rating,
    };

    let mut model = GeminiClient::from_env().context("GEMINI_API_KEY must be set")?;
    if let Some(id) = args.model {
        model = model.with_model(id);
    }

    let places: Arc<dyn PlaceSearch> = match std::env::var("GOOGLE_MAPS_API_KEY") {
        Ok(key) if !key.trim().is_empty() => Arc::new(GooglePlacesClient::new(key)?),
        _ => {
            eprintln!(
                "{}",
                "GOOGLE_MAPS_API_KEY not set; skipping place-photo lookups".yellow()
            );
            Arc::new(NoopPlaceSearch)
        }
    };

    let pipeline = SearchPipeline::new(Arc::new(model), places, Arc::new(HttpPageFetcher::new()?));
    let result = pipeline.run(&args.location, filters).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!();
    println!(
        "{} {}",
        format!("{} restaurants found in", result.total_found).bold(),
        result.location.bold()
    );
    println!("{}", result.search_summary.dimmed());
    println!();

    for (idx, r) in result.restaurants.iter().enumerate() {
        let score = r
            .match_score
            .map(|s| format!(" [{s}/100]"))
            .unwrap_or_default();
        println!(
            "{}. {}{} {}",
            idx + 1,
            r.name.bright_green().bold(),
            score.cyan(),
            r.budget
        );
        if !r.address.is_empty() {
            println!("   {}", r.address);
        }
        if !r.cuisines.is_empty() {
            println!("   {} | rating {:.1}", r.cuisines.join(", "), r.rating);
        }
        if let Some(why) = &r.why_it_matches {
            println!("   {}", why.italic());
        }
        if let Some(confidence) = r.dietary_match_confidence {
            let notes = r.validation_notes.as_deref().unwrap_or("");
            println!("   {} {}", format!("dietary {confidence}/100").magenta(), notes.dimmed());
        }
        if !r.matching_items.is_empty() {
            println!("   menu: {}", r.matching_items.join(", "));
        }
        if let Some(image) = &r.image {
            println!("   {}", image.blue().underline());
        }
        println!();
    }

    Ok(())
}
