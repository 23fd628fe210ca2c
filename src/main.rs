use anyhow::Result;
use clap::Parser;
use hotel_scout::config::Config;
use hotel_scout::models::{HotelRecord, Money};
use hotel_scout::pipeline::currency::currency_for_country;
use hotel_scout::pipeline::filter::display_price;
use hotel_scout::pipeline::{format_price, normalize_all, ExchangeRates, RefineQuery, Refiner, SortKey};
use hotel_scout::sources::{
    ApiFilterState, HotelSource, HttpRates, RateProvider, SessionFileSource,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Filter and sort the hotels of a stored search session
#[derive(Parser, Debug)]
#[command(name = "hotel-scout", version)]
struct Cli {
    /// TOML configuration file
    #[arg(long, default_value = "hotel-scout.toml")]
    config: PathBuf,

    /// Session storage file (overrides config)
    #[arg(long)]
    session: Option<PathBuf>,

    /// best-match, price-low, price-high, rating, reviews, distance
    #[arg(long)]
    sort: Option<String>,

    /// Case-insensitive hotel name search
    #[arg(long, default_value = "")]
    search: String,

    /// Display currency code
    #[arg(long)]
    currency: Option<String>,

    #[arg(long)]
    min_price: Option<f64>,

    #[arg(long)]
    max_price: Option<f64>,

    /// Star classes to keep, e.g. 4,5
    #[arg(long, value_delimiter = ',')]
    stars: Vec<u8>,

    /// Review tiers (1-5) to keep
    #[arg(long, value_delimiter = ',')]
    tiers: Vec<u8>,

    #[arg(long)]
    min_score: Option<f64>,

    #[arg(long)]
    max_score: Option<f64>,

    /// Only hotels with a deal badge
    #[arg(long)]
    deals: bool,

    /// Maximum distance from the city center in km
    #[arg(long)]
    max_distance: Option<f64>,

    #[arg(long, default_value_t = 0)]
    min_reviews: u32,

    /// Print results as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    let source = SessionFileSource::new(cli.session.clone().unwrap_or(config.session.path.clone()));
    let payload = match source.load().await {
        Ok(payload) => payload,
        Err(e) => {
            warn!("Could not load search session: {:#}", e);
            println!("No hotels found");
            return Ok(());
        }
    };

    let rates = load_rates(&config).await;

    let currency = cli
        .currency
        .as_deref()
        .map(str::to_uppercase)
        .or_else(|| {
            if config.display.currency.is_some() || config.display.country.is_some() {
                return None;
            }
            payload
                .selected_city
                .as_ref()
                .and_then(|c| c.country_code.as_deref())
                .map(|code| currency_for_country(code).to_string())
        })
        .unwrap_or_else(|| config.display.resolved_currency());

    let records = normalize_all(&payload.hotels, payload.search.nights());
    if records.is_empty() {
        println!("No hotels found");
        return Ok(());
    }

    let city = payload.selected_city.as_ref().and_then(|c| c.coordinates());
    let mut refiner = Refiner::new(records, rates);
    let mut query = refiner.default_query(&currency, city);
    if let Some(api) = &payload.filters {
        apply_api_filters(&mut query, api, refiner.rates());
    }
    apply_cli(&mut query, &cli, config.results.sort);

    info!(
        "Refining {} hotels in {} (sort: {}, price {:.0}-{:.0} {})",
        refiner.records().len(),
        payload.search.location,
        query.sort,
        query.filters.price_range.0,
        query.filters.price_range.1,
        query.display_currency
    );

    let rates = refiner.rates().clone();
    let results = refiner.refine(&query);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(results)?);
        return Ok(());
    }

    if results.is_empty() {
        println!("No hotels found");
        return Ok(());
    }

    for (i, hotel) in results.iter().enumerate() {
        print_card(i + 1, hotel, &rates, &query.display_currency);
    }
    info!("✅ Showing {} of {} hotels", results.len(), payload.hotels.len());

    Ok(())
}

async fn load_rates(config: &Config) -> ExchangeRates {
    let fallback = config.rates.static_table();
    let Some(url) = &config.rates.url else {
        return fallback;
    };

    // One lookup per run, so no cache in front of the provider
    let provider = match HttpRates::new(url.clone()) {
        Ok(http) => http,
        Err(e) => {
            warn!("Rate client unavailable, using configured rates: {:#}", e);
            return fallback;
        }
    };

    match provider.rates().await {
        Ok(rates) => rates,
        Err(e) => {
            warn!("Using configured rates, {} provider failed: {:#}", provider.source_name(), e);
            fallback
        }
    }
}

/// Seed the price range from the upstream filter hints
fn apply_api_filters(query: &mut RefineQuery, api: &ApiFilterState, rates: &ExchangeRates) {
    let from = api.currency.as_deref().unwrap_or(&query.display_currency).to_string();
    let to = query.display_currency.clone();
    let convert = |v: f64| rates.convert(v, &from, &to).unwrap_or(v);

    if let Some(min) = api.min_price {
        query.filters.price_range.0 = convert(min);
    }
    if let Some(max) = api.max_price {
        query.filters.price_range.1 = convert(max);
    }
}

fn apply_cli(query: &mut RefineQuery, cli: &Cli, default_sort: SortKey) {
    query.sort = cli
        .sort
        .as_deref()
        .map(|s| s.parse::<SortKey>().unwrap_or_default())
        .unwrap_or(default_sort);
    query.search_text = cli.search.clone();

    let filters = &mut query.filters;
    if let Some(min) = cli.min_price {
        filters.price_range.0 = min;
    }
    if let Some(max) = cli.max_price {
        filters.price_range.1 = max;
    }
    filters.property_types.extend(cli.stars.iter().copied());
    filters.selected_review_ratings.extend(cli.tiers.iter().copied());
    if let Some(min) = cli.min_score {
        filters.review_score_range.0 = min;
    }
    if let Some(max) = cli.max_score {
        filters.review_score_range.1 = max;
    }
    filters.has_deals = cli.deals;
    filters.distance_from_center = cli.max_distance;
    filters.review_count_min = cli.min_reviews;
}

fn print_card(n: usize, hotel: &HotelRecord, rates: &ExchangeRates, currency: &str) {
    let price = match hotel.gross_price() {
        Some(_) => format_price(&Money::new(currency, display_price(hotel, rates, currency))),
        None => "price unknown".to_string(),
    };
    println!("{}. {} ({})", n, hotel.name, price);
    if let Some(stars) = hotel.property_class {
        println!("   {} stars", stars);
    }
    if let (Some(score), Some(word)) = (hotel.review_score, hotel.review_score_word) {
        println!(
            "   {:.1} {} ({} reviews)",
            score,
            word.as_str(),
            hotel.review_count.unwrap_or(0)
        );
    }
    println!("   {}", hotel.address);
    if hotel.has_deals() {
        let badges: Vec<&str> = hotel.benefit_badges.iter().map(|b| b.text.as_str()).collect();
        println!("   Deals: {}", badges.join(", "));
    }
    println!("   ID: {}", hotel.id);
    println!();
}
