use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod auth;
mod catalog;
mod csv;
mod session;

use auth::AuthCommands;
use catalog::{CollectionsCommands, ProductsCommands, VariantsCommands};
use csv::CsvCommands;

#[derive(Debug, Parser)]
#[command(name = "pricedesk")]
#[command(about = "Storefront price administration")]
struct Cli {
    /// Shop domain to act for (e.g. demo.myshopify.com)
    #[arg(long, global = true)]
    shop: Option<String>,
    /// Embedding host parameter; with a shop, starts an embedded session
    #[arg(long, global = true)]
    host: Option<String>,
    /// Full launch URL to read `shop` and `host` from
    #[arg(long, global = true)]
    launch_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search and inspect collections
    Collections {
        #[command(subcommand)]
        command: CollectionsCommands,
    },
    /// List products and pick a selection
    Products {
        #[command(subcommand)]
        command: ProductsCommands,
    },
    /// Update variant prices
    Variants {
        #[command(subcommand)]
        command: VariantsCommands,
    },
    /// Bulk price import and export
    Csv {
        #[command(subcommand)]
        command: CsvCommands,
    },
    /// Install, log out, and inspect the session
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = pricedesk_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("pricedesk: no command given; see --help");
        return Ok(());
    };

    let launch = session::launch_params(
        cli.launch_url.as_deref(),
        cli.shop.clone(),
        cli.host.clone(),
    )?;
    let mut ctx = session::open_session(&config, &launch)?;

    match command {
        Commands::Collections { command } => match command {
            CollectionsCommands::Search { term } => {
                catalog::run_collections_search(ctx.api(), &term).await?;
            }
            CollectionsCommands::Get { id } => {
                catalog::run_collections_get(session::require_api(&ctx)?, &id).await?;
            }
            CollectionsCommands::List { limit } => {
                catalog::run_collections_list(session::require_api(&ctx)?, limit).await?;
            }
        },
        Commands::Products { command } => match command {
            ProductsCommands::List {
                collection,
                limit,
                after,
                select,
                select_all,
                expand,
                choose,
            } => {
                let picks = catalog::GridPicks {
                    select,
                    select_all,
                    expand,
                    choose,
                };
                match collection {
                    Some(collection_id) => {
                        catalog::run_products_in_collection(ctx.api(), &collection_id, &picks)
                            .await?;
                    }
                    None => {
                        catalog::run_products_list(
                            session::require_api(&ctx)?,
                            limit,
                            after.as_deref(),
                            &picks,
                        )
                        .await?;
                    }
                }
            }
            ProductsCommands::Get { id } => {
                catalog::run_products_get(session::require_api(&ctx)?, &id).await?;
            }
        },
        Commands::Variants { command } => match command {
            VariantsCommands::SetPrice { variant_id, price } => {
                catalog::run_variant_set_price(session::require_api(&ctx)?, &variant_id, &price)
                    .await?;
            }
        },
        Commands::Csv { command } => {
            let api = session::require_api(&ctx)?;
            match command {
                CsvCommands::Upload { file } => csv::run_csv_upload(api, &file).await?,
                CsvCommands::Download { output } => {
                    csv::run_csv_download(api, output.as_deref()).await?;
                }
                CsvCommands::Status => csv::run_csv_status(api).await?,
            }
        }
        Commands::Auth { command } => match command {
            AuthCommands::Install { shop } => auth::run_auth_install(&mut ctx, &shop)?,
            AuthCommands::Callback { shop, code } => {
                auth::run_auth_callback(&mut ctx, &shop, &code).await?;
            }
            AuthCommands::Logout => auth::run_auth_logout(&mut ctx)?,
            AuthCommands::Status => auth::run_auth_status(&ctx),
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests;
