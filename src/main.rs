// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

use tech_catalog::{
    filter, find_aspect_by_id, find_item_by_id, find_timeline_entry_by_date, init_tracing,
    CatalogConfig, CatalogStore, FilterSpec, Item, LoggingSink, ProductRequestDraft,
    Submission, SubmissionSink, TimelineEntry,
};

#[derive(Parser, Debug)]
#[command(
    name = "tech-catalog",
    about = "Query the technology timeline and marketplace catalog",
    version
)]
struct Cli {
    /// JSON seed file (defaults to the built-in dataset)
    #[arg(long, env = "CATALOG_SEED", global = true)]
    seed: Option<PathBuf>,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List marketplace items, optionally filtered
    Items {
        /// funding | subscription | all
        #[arg(long)]
        kind: Option<String>,
        /// Category name or slug, or "all"
        #[arg(long)]
        category: Option<String>,
        /// Case-insensitive text search
        #[arg(long, short)]
        query: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Show one item and its specification page
    Item {
        id: u32,
        #[arg(long)]
        json: bool,
    },
    /// Show the timeline rail
    Timeline {
        #[arg(long)]
        json: bool,
    },
    /// Show one timeline entry (e.g., 2023-12)
    Entry {
        date: String,
        /// Expand one technical aspect
        #[arg(long)]
        aspect: Option<u32>,
        #[arg(long)]
        json: bool,
    },
    /// Show the home feed
    Feed,
    /// List categories with item counts
    Categories,
    /// Print the snapshot fingerprint of the loaded seed
    Fingerprint,
    /// Request a product that is not in the marketplace
    Request {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Interactive terminal browser (default)
    Browse,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = CatalogConfig {
        seed_path: cli.seed.clone(),
        log_level: cli.log_level.clone(),
        ..Default::default()
    };
    let store = config
        .load_store()
        .with_context(|| format!("Failed to load catalog from {}", config.seed_source()))?;

    match cli.command.unwrap_or(Command::Browse) {
        Command::Items {
            kind,
            category,
            query,
            json,
        } => run_items(&store, kind, category, query, json),
        Command::Item { id, json } => run_item(&store, id, json),
        Command::Timeline { json } => run_timeline(&store, json),
        Command::Entry { date, aspect, json } => run_entry(&store, &date, aspect, json),
        Command::Feed => run_feed(&store),
        Command::Categories => run_categories(&store),
        Command::Fingerprint => {
            println!("{}", store.fingerprint());
            Ok(())
        }
        Command::Request {
            title,
            description,
            category,
            name,
            email,
        } => run_request(ProductRequestDraft {
            title,
            description,
            category,
            name,
            email,
        }),
        Command::Browse => run_browse(store),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_item_line(item: &Item) {
    println!(
        "  #{:<3} {:<36} {:<14} {:<16} ★ {:.1} ({}) {}",
        item.id,
        item.title,
        item.kind().label(),
        item.category.as_str(),
        item.rating,
        item.review_count,
        item.offer.amount()
    );
}

fn run_items(
    store: &CatalogStore,
    kind: Option<String>,
    category: Option<String>,
    query: Option<String>,
    json: bool,
) -> Result<()> {
    let spec = FilterSpec::from_tokens(kind.as_deref(), category.as_deref(), query.as_deref());
    let result = filter(store, &spec);

    if json {
        return print_json(&result.items);
    }

    println!("🛒 InnoMarket - {} of {} items", result.matched(), result.total);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    if result.is_empty() {
        println!("  No products found matching your criteria");
        println!("  Can't find it? Run: tech-catalog request --title ...");
    }
    for item in &result.items {
        print_item_line(item);
    }

    Ok(())
}

fn run_item(store: &CatalogStore, id: u32, json: bool) -> Result<()> {
    let item = find_item_by_id(store, id).ok_or_else(|| anyhow!("No item with id {}", id))?;

    if json {
        return print_json(item);
    }

    println!("📦 {}", item.title);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{}", item.description);
    println!();
    println!("By:       {} ({})", item.author.name, item.author.tag);
    println!("Category: {}", item.category.as_str());
    println!("Offer:    {} - {}", item.kind().label(), item.offer.amount());
    println!("Rating:   ★ {:.1} ({} reviews)", item.rating, item.review_count);

    let Some(specs) = &item.specs else {
        println!("\n  No specification page for this product yet.");
        return Ok(());
    };

    println!("\n🔭 Vision:   {}", specs.overview.vision);
    println!("❓ Problem:  {}", specs.overview.problem);
    println!("💡 Solution: {}", specs.overview.solution);

    println!("\n🛠️  Technical");
    for spec in &specs.technical {
        println!("  {:<14} {}", spec.label, spec.value);
    }

    println!("\n🗓️  Roadmap");
    for milestone in &specs.roadmap {
        println!("  {:<8} {} - {}", milestone.date, milestone.title, milestone.description);
    }

    println!("\n💬 Reviews");
    for review in &specs.reviews {
        println!("  {} {} ({})", "★".repeat(review.rating as usize), review.user, review.date);
        println!("    {}", review.comment);
    }

    Ok(())
}

fn run_timeline(store: &CatalogStore, json: bool) -> Result<()> {
    if json {
        return print_json(store.timeline());
    }

    let timeline = store.timeline();
    println!("🕰️  {}", timeline.title);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for entry in &timeline.entries {
        println!(
            "  {}  {:<28} {} ({} aspects)",
            entry.date,
            entry.title,
            entry.summary_text,
            entry.aspects.len()
        );
    }

    Ok(())
}

fn run_entry(store: &CatalogStore, date: &str, aspect: Option<u32>, json: bool) -> Result<()> {
    let entry: &TimelineEntry = find_timeline_entry_by_date(store, date)
        .ok_or_else(|| anyhow!("No timeline entry for {} (known: {})", date, store.timeline().dates().join(", ")))?;

    if let Some(aspect_id) = aspect {
        let aspect = find_aspect_by_id(entry, aspect_id)
            .ok_or_else(|| anyhow!("No aspect {} in timeline entry {}", aspect_id, date))?;
        if json {
            return print_json(aspect);
        }

        println!("🔬 {} ({})", aspect.title, entry.date);
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("{}", aspect.body_text);
        if aspect.reviews.is_empty() {
            println!("\n  No reviews yet.");
        }
        for review in &aspect.reviews {
            let badge = if review.approved { "✓" } else { "…" };
            println!("\n  {} {} ({})", badge, review.author, review.timestamp);
            println!("    {}", review.body_text);
        }
        return Ok(());
    }

    if json {
        return print_json(entry);
    }

    println!("📅 Version as of {} - {}", entry.date, entry.title);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{}", entry.overview_text);
    println!("\nTechnical aspects:");
    for aspect in &entry.aspects {
        println!("  [{}] {} ({} reviews)", aspect.id, aspect.title, aspect.reviews.len());
    }

    Ok(())
}

fn run_feed(store: &CatalogStore) -> Result<()> {
    let feed = store.feed();

    println!("📰 {}", feed.overview.title);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("{}", feed.overview.description);
    for feature in &feed.overview.features {
        println!("  ✓ {}", feature);
    }

    if let Some(featured) = &feed.featured {
        println!("\n⭐ {} [{}]", featured.title, featured.topic);
        println!("   {}", featured.description);
    }

    println!();
    for card in &feed.cards {
        println!("  /topic/{:<24} {}", card.topic_slug(), card.title);
    }

    println!("\nTopics:");
    for topic in feed.navigation_topics() {
        println!("  /topic/{:<24} {}", topic.slug, topic.name);
    }

    Ok(())
}

fn run_categories(store: &CatalogStore) -> Result<()> {
    for (category, count) in store.category_counts() {
        println!("  {:<22} {:<22} {}", category.as_str(), category.slug(), count);
    }
    Ok(())
}

fn run_request(draft: ProductRequestDraft) -> Result<()> {
    let receipt = LoggingSink
        .submit(Submission::ProductRequest(draft))
        .context("Failed to submit product request")?;

    println!("✅ Your product request has been submitted successfully!");
    println!("   Receipt: {} ({})", receipt.id, receipt.received_at);
    Ok(())
}

#[cfg(feature = "tui")]
fn run_browse(store: CatalogStore) -> Result<()> {
    let mut app = ui::App::new(store, Box::new(LoggingSink));
    ui::run_ui(&mut app)?;
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_browse(_store: CatalogStore) -> Result<()> {
    Err(anyhow!(
        "TUI mode not available. Rebuild with --features tui, or use a subcommand (see --help)"
    ))
}
