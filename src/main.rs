use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use listing_scout::filters::FilterField;
use listing_scout::models::{DisplayLocation, NewBanner, Tier, BANNER_PLACEHOLDER_IMAGE};
use listing_scout::views::render;
use listing_scout::views::{
    AdminTab, AdminView, BannerView, DetailView, Flash, HomeView, ListingView, LoadState, StatsView,
};
use listing_scout::{AppConfig, ListingsGateway, RestGateway};
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "listing-scout")]
#[command(about = "🏠 Browse listings, banners and inquiries from the listings backend")]
#[command(version)]
struct Cli {
    /// Backend API root (overrides LISTINGS_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List properties, narrowed by optional filters
    List(ListArgs),
    /// Premium and Featured listings shown on the home page
    Featured,
    /// Details of one property
    Show {
        id: i64,
        /// Send a WhatsApp inquiry about this property
        #[arg(long)]
        inquire: bool,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Banner ads for a page
    Banners {
        /// all, homepage, property_listing or property_detail
        #[arg(long, default_value = "homepage")]
        location: DisplayLocation,
        /// Keep rotating for this many seconds
        #[arg(long, default_value_t = 0)]
        watch: u64,
    },
    /// WhatsApp response statistics for an agent phone
    Stats { agent_phone: String },
    /// Admin dashboard operations
    #[command(subcommand)]
    Admin(AdminCommand),
}

#[derive(Args)]
struct ListArgs {
    #[arg(long)]
    company: Option<String>,
    #[arg(long)]
    min_price: Option<String>,
    #[arg(long)]
    max_price: Option<String>,
    #[arg(long)]
    bedrooms: Option<String>,
    #[arg(long)]
    bathrooms: Option<String>,
    #[arg(long)]
    city: Option<String>,
    /// Also write the matching listings as JSON
    #[arg(long)]
    save: Option<String>,
}

#[derive(Subcommand)]
enum AdminCommand {
    /// Show one dashboard tab: banners, properties, companies or whatsapp
    Tab { tab: AdminTab },
    /// Create a banner ad
    CreateBanner {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = BANNER_PLACEHOLDER_IMAGE)]
        image_url: String,
        #[arg(long, default_value = "")]
        target_link: String,
        #[arg(long, default_value = "all")]
        location: DisplayLocation,
        #[arg(long)]
        start_date: Option<NaiveDate>,
        #[arg(long)]
        end_date: Option<NaiveDate>,
        #[arg(long, default_value_t = 0)]
        priority: u8,
        #[arg(long)]
        inactive: bool,
    },
    /// Delete a banner ad
    DeleteBanner { id: i64 },
    /// Change a property's tier (Standard, Featured, Premium)
    SetTier { id: i64, tier: Tier },
    /// Look for duplicate listings
    Duplicates,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()
        .context("Failed to read configuration")?
        .with_api_url(cli.api_url);

    let gateway = RestGateway::with_config(config.gateway_config()).context("Failed to create gateway")?;
    info!("🏠 Listing Scout - {}", gateway.base_url());

    match cli.command {
        Command::List(args) => list(&gateway, args).await,
        Command::Featured => featured(&gateway).await,
        Command::Show {
            id,
            inquire,
            name,
            phone,
        } => show(&gateway, id, inquire, name.as_deref(), phone.as_deref()).await,
        Command::Banners { location, watch } => {
            banners(&gateway, location, config.banner_interval, Duration::from_secs(watch)).await
        }
        Command::Stats { agent_phone } => stats(&gateway, agent_phone).await,
        Command::Admin(command) => admin(&gateway, command).await,
    }
}

async fn list(gateway: &dyn ListingsGateway, args: ListArgs) -> Result<()> {
    let mut view = ListingView::new();
    view.load(gateway).await;

    let fields = [
        (FilterField::MinPrice, args.min_price),
        (FilterField::MaxPrice, args.max_price),
        (FilterField::Bedrooms, args.bedrooms),
        (FilterField::Bathrooms, args.bathrooms),
        (FilterField::City, args.city),
    ];
    for (field, value) in fields {
        if let Some(value) = value {
            view.set_field(field, value);
        }
    }
    // company change applies everything entered so far
    view.set_company(args.company);

    if let Some(message) = view.message() {
        println!("{}", message);
        return Ok(());
    }

    info!("✅ {} of {} properties match\n", view.filtered().len(), view.all().len());
    for (i, property) in view.filtered().iter().enumerate() {
        println!("{}. {}", i + 1, render::property_card(property));
        println!();
    }

    if let Some(path) = args.save {
        let json = serde_json::to_string_pretty(view.filtered())?;
        tokio::fs::write(&path, json)
            .await
            .with_context(|| format!("Failed to write {}", path))?;
        info!("💾 Saved {} properties to {}", view.filtered().len(), path);
    }
    Ok(())
}

async fn featured(gateway: &dyn ListingsGateway) -> Result<()> {
    let mut view = HomeView::new();
    view.load(gateway).await;
    match view.featured() {
        LoadState::Loaded(properties) => {
            for property in properties {
                println!("{}\n", render::property_card(property));
            }
        }
        LoadState::Failed(message) => println!("{}", message),
        LoadState::Loading => {}
    }
    Ok(())
}

async fn show(
    gateway: &dyn ListingsGateway,
    id: i64,
    inquire: bool,
    name: Option<&str>,
    phone: Option<&str>,
) -> Result<()> {
    let mut view = DetailView::new(id);
    view.load(gateway).await;

    let Some(property) = view.property() else {
        println!("{}", view.message().unwrap_or(listing_scout::views::detail::NOT_FOUND_MESSAGE));
        return Ok(());
    };
    println!("{}", render::property_detail(property));

    if let Some(state) = view.stats().and_then(StatsView::state) {
        println!();
        print_stats(state);
    }

    if inquire {
        match view.send_inquiry(gateway, name, phone).await {
            Ok(message) => println!("\n{}", message),
            Err(message) => println!("\n{}", message),
        }
    }
    Ok(())
}

async fn banners(
    gateway: &dyn ListingsGateway,
    location: DisplayLocation,
    interval: Duration,
    watch: Duration,
) -> Result<()> {
    let mut view = BannerView::with_period(location, interval);
    view.load(gateway).await;

    if let Some(message) = view.message() {
        println!("{}", message);
        return Ok(());
    }
    let Some(slot) = render::banner_slot(&view.carousel()) else {
        info!("No banners for {}", location);
        return Ok(());
    };
    println!("{}", slot);

    if watch.is_zero() || !view.is_rotating() {
        return Ok(());
    }

    let mut changes = view.subscribe();
    let deadline = tokio::time::sleep(watch);
    tokio::pin!(deadline);
    loop {
        tokio::select! {
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                if let Some(slot) = render::banner_slot(&view.carousel()) {
                    println!("{}", slot);
                }
            }
            _ = &mut deadline => break,
            _ = tokio::signal::ctrl_c() => break,
        }
    }
    Ok(())
}

async fn stats(gateway: &dyn ListingsGateway, agent_phone: String) -> Result<()> {
    let mut view = StatsView::new(Some(agent_phone));
    view.load(gateway).await;
    match view.state() {
        Some(state) => print_stats(state),
        None => warn!("No agent phone given"),
    }
    Ok(())
}

fn print_stats(state: &LoadState<listing_scout::models::WhatsAppStats>) {
    match state {
        LoadState::Loaded(stats) => println!("{}", render::stats_panel(stats)),
        LoadState::Failed(message) => println!("{}", message),
        LoadState::Loading => println!("Loading WhatsApp statistics..."),
    }
}

async fn admin(gateway: &dyn ListingsGateway, command: AdminCommand) -> Result<()> {
    let mut view = AdminView::new();
    match command {
        AdminCommand::Tab { tab } => {
            view.open_tab(tab, gateway).await;
            print_tab(&view);
        }
        AdminCommand::CreateBanner {
            title,
            image_url,
            target_link,
            location,
            start_date,
            end_date,
            priority,
            inactive,
        } => {
            let defaults = NewBanner::default();
            let form = NewBanner {
                title,
                image_url,
                target_link,
                display_location: location,
                start_date: start_date.unwrap_or(defaults.start_date),
                end_date,
                priority,
                is_active: !inactive,
            };
            view.create_banner(&form, gateway).await;
            print_tab(&view);
        }
        AdminCommand::DeleteBanner { id } => {
            view.delete_banner(id, gateway).await;
            print_tab(&view);
        }
        AdminCommand::SetTier { id, tier } => {
            view.open_tab(AdminTab::Properties, gateway).await;
            view.set_tier(id, tier, gateway).await;
            print_tab(&view);
        }
        AdminCommand::Duplicates => {
            if let Some(found) = view.check_duplicates(gateway).await {
                for candidate in &found {
                    println!("{}", serde_json::to_string_pretty(candidate)?);
                }
            }
        }
    }

    match view.flash() {
        Some(Flash::Success(text)) => println!("✅ {}", text),
        Some(Flash::Error(text)) => bail!("{}", text),
        None => {}
    }
    Ok(())
}

fn print_tab(view: &AdminView) {
    let table = match view.tab() {
        AdminTab::Banners => view.banners().loaded().map(|b| render::banner_table(b)),
        AdminTab::Properties => view.properties().loaded().map(|p| render::property_table(p)),
        AdminTab::Companies => view.companies().loaded().map(|c| render::company_table(c)),
        AdminTab::WhatsApp => view.inquiries().loaded().map(|i| render::inquiry_table(i)),
    };
    if let Some(table) = table {
        println!("{}", table);
    }
}
