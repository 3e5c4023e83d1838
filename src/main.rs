use clap::Parser;
use spacetraveling::core::detail::resolve_post_page;
use spacetraveling::core::listing::fetch_home_page;
use spacetraveling::core::ConfigProvider;
use spacetraveling::utils::error::ErrorSeverity;
use spacetraveling::utils::format::display_date;
use spacetraveling::utils::validation::{validate_uid, Validate};
use spacetraveling::utils::logger;
use spacetraveling::{
    Cli, Command, DetailView, ListingSession, LocalStorage, PrismicClient, Result, SiteBuilder,
    SiteConfig,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting spacetraveling");
    tracing::debug!("CLI args: {:?}", cli);

    if let Err(e) = run(cli).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 4,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        std::process::exit(exit_code);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let client = PrismicClient::connect(&config).await?;

    match cli.command {
        Command::Build => {
            let storage = LocalStorage::new(config.output_path());
            let builder = SiteBuilder::new(storage, &client, &config);
            let report = builder.build().await?;

            println!("✅ Build completed");
            println!("📰 Listing: {} posts", report.listing_items);
            for page in &report.detail_pages {
                println!("📄 {}/{}", config.output_path(), page);
            }
        }
        Command::List { all } => {
            let home = fetch_home_page(&client, config.document_type(), config.page_size()).await?;
            let mut session = ListingSession::from_pagination(home);
            if all {
                session.load_all(&client).await?;
            }

            for post in session.items() {
                let date = display_date(post.published_at.as_deref());
                println!("{}", post.title);
                if !post.subtitle.is_empty() {
                    println!("  {}", post.subtitle);
                }
                println!("  {} | {} | {}", date, post.author, post.id);
            }
            if let Some(cursor) = session.cursor() {
                println!("\nCarregar mais posts: {}", cursor);
            }
        }
        Command::Show { uid } => {
            validate_uid(&uid)?;
            let page = resolve_post_page(&client, config.document_type(), &uid).await?;
            print!("{}", DetailView::Ready(page).render_text());
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<SiteConfig> {
    tracing::info!("📁 Loading configuration from: {}", cli.config);
    let mut config = SiteConfig::from_file(&cli.config)?;

    if let Some(endpoint) = &cli.endpoint {
        config.source.endpoint = endpoint.clone();
        tracing::info!("🔧 Endpoint overridden to: {}", endpoint);
    }
    if let Some(output_path) = &cli.output_path {
        config.output.output_path = output_path.clone();
        tracing::info!("🔧 Output path overridden to: {}", output_path);
    }

    config.validate()?;
    tracing::info!("✅ Configuration loaded and validated successfully");
    Ok(config)
}
