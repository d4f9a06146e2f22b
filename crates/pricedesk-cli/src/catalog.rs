//! Collection, product, and variant command handlers.

use clap::Subcommand;
use pricedesk_catalog::{
    CollectionSearch, LoadOutcome, ProductBrowser, ProductGrid, SearchOutcome, SelectionListener,
};
use pricedesk_client::ServerApiClient;
use pricedesk_core::{Collection, Product, Variant};

#[derive(Debug, Subcommand)]
pub enum CollectionsCommands {
    /// Find collections whose title or handle contains a term
    Search { term: String },
    /// Show one collection
    Get { id: String },
    /// List collections
    List {
        /// Page size (defaults to PRICEDESK_DEFAULT_PAGE_SIZE)
        #[arg(long)]
        limit: Option<u32>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProductsCommands {
    /// List products, optionally scoped to one collection
    List {
        /// Load the products of this collection (first 50)
        #[arg(long)]
        collection: Option<String>,
        /// Page size for an unscoped listing
        #[arg(long, conflicts_with = "collection")]
        limit: Option<u32>,
        /// Pagination cursor for an unscoped listing
        #[arg(long, conflicts_with = "collection")]
        after: Option<String>,
        /// Toggle selection of these product ids, in order
        #[arg(long, value_delimiter = ',')]
        select: Vec<String>,
        /// Select every listed product
        #[arg(long, conflicts_with = "select")]
        select_all: bool,
        /// Show variants for these product ids
        #[arg(long, value_delimiter = ',')]
        expand: Vec<String>,
        /// Pick a single product for editing, leaving the selection alone
        #[arg(long)]
        choose: Option<String>,
    },
    /// Show one product with its variants
    Get { id: String },
}

#[derive(Debug, Subcommand)]
pub enum VariantsCommands {
    /// Set a variant's price
    SetPrice {
        variant_id: String,
        /// Decimal price such as 19.99
        price: String,
    },
}

/// Grid interactions requested on the command line.
#[derive(Debug, Default)]
pub(crate) struct GridPicks {
    pub select: Vec<String>,
    pub select_all: bool,
    pub expand: Vec<String>,
    pub choose: Option<String>,
}

/// Remembers what the grid last reported: the selection and any single
/// product picked with `--choose`.
#[derive(Debug, Default)]
pub(crate) struct CurrentSelection {
    pub selected: Vec<Product>,
    pub chosen: Option<Product>,
}

impl SelectionListener for CurrentSelection {
    fn selection_changed(&mut self, selected: &[Product]) {
        self.selected = selected.to_vec();
    }

    fn product_chosen(&mut self, product: &Product) {
        self.chosen = Some(product.clone());
    }
}

pub(crate) async fn run_collections_search(
    api: Option<&ServerApiClient>,
    term: &str,
) -> anyhow::Result<()> {
    let search = CollectionSearch::new();
    match search.search(api, term).await {
        SearchOutcome::Completed(0) => println!("no collections match \"{term}\""),
        SearchOutcome::Completed(_) => {
            for collection in search.results() {
                print_collection(&collection);
            }
        }
        SearchOutcome::EmptyTerm | SearchOutcome::Unavailable | SearchOutcome::Failed(_) => {
            let message = search.error().unwrap_or_default();
            anyhow::bail!("{message}");
        }
        SearchOutcome::Superseded => {}
    }
    Ok(())
}

pub(crate) async fn run_collections_get(api: &ServerApiClient, id: &str) -> anyhow::Result<()> {
    let collection = api.get_collection(id).await?;
    print_collection(&collection);
    Ok(())
}

pub(crate) async fn run_collections_list(
    api: &ServerApiClient,
    limit: Option<u32>,
) -> anyhow::Result<()> {
    let collections = api.list_collections(limit).await?;
    println!("{} collections", collections.len());
    for collection in &collections {
        print_collection(collection);
    }
    Ok(())
}

pub(crate) async fn run_products_in_collection(
    api: Option<&ServerApiClient>,
    collection_id: &str,
    picks: &GridPicks,
) -> anyhow::Result<()> {
    let browser = ProductBrowser::with_listener(CurrentSelection::default());

    // Resolve the collection first so the header shows its title.
    let collection = match api {
        Some(api) => api.get_collection(collection_id).await?,
        None => Collection {
            id: collection_id.to_owned(),
            title: collection_id.to_owned(),
            description: String::new(),
            handle: String::new(),
            products_count: 0,
            image: None,
        },
    };

    match browser.open_collection(api, &collection).await {
        LoadOutcome::Loaded(count) => {
            println!("Products in \"{}\" ({count})", collection.title);
        }
        LoadOutcome::Unavailable | LoadOutcome::Failed(_) => {
            anyhow::bail!("{}", browser.error().unwrap_or_default());
        }
        LoadOutcome::Superseded => return Ok(()),
    }

    browser.with_grid(|grid| {
        apply_picks(grid, picks);
        print_grid(grid);
    });
    Ok(())
}

pub(crate) async fn run_products_list(
    api: &ServerApiClient,
    limit: Option<u32>,
    after: Option<&str>,
    picks: &GridPicks,
) -> anyhow::Result<()> {
    let products = api.list_products(limit, after).await?;
    println!("{} products", products.len());

    let mut grid = ProductGrid::with_listener(CurrentSelection::default());
    grid.set_products(products);
    apply_picks(&mut grid, picks);
    print_grid(&grid);
    Ok(())
}

pub(crate) async fn run_products_get(api: &ServerApiClient, id: &str) -> anyhow::Result<()> {
    let product = api.get_product(id).await?;
    print_product(&product, true, false);
    Ok(())
}

pub(crate) async fn run_variant_set_price(
    api: &ServerApiClient,
    variant_id: &str,
    price: &str,
) -> anyhow::Result<()> {
    let variant = api.update_variant_price(variant_id, price).await?;
    println!(
        "variant {} \"{}\" now {} (sku {}, {} in stock)",
        variant.id, variant.title, variant.price, variant.sku, variant.inventory_quantity
    );
    Ok(())
}

/// Applies expansion first, then selection in the order given, then the
/// single `--choose` pick.
pub(crate) fn apply_picks(grid: &mut ProductGrid<CurrentSelection>, picks: &GridPicks) {
    for id in &picks.expand {
        if !lists(grid, id) {
            tracing::warn!(product_id = %id, "--expand: no such product in this list");
            continue;
        }
        grid.toggle_expansion(id);
    }
    if picks.select_all {
        grid.select_all();
    }
    for id in &picks.select {
        if !lists(grid, id) {
            tracing::warn!(product_id = %id, "--select: no such product in this list");
            continue;
        }
        grid.toggle_selection(id);
    }
    if let Some(id) = &picks.choose {
        if !grid.choose(id) {
            tracing::warn!(product_id = %id, "--choose: no such product in this list");
        }
    }
}

fn lists(grid: &ProductGrid<CurrentSelection>, id: &str) -> bool {
    grid.products().iter().any(|p| p.id == id)
}

fn print_grid(grid: &ProductGrid<CurrentSelection>) {
    if grid.is_empty() {
        println!("No products found in this collection.");
        return;
    }
    for product in grid.products() {
        print_product(
            product,
            grid.is_expanded(&product.id),
            grid.is_selected(&product.id),
        );
    }

    let current = grid.listener();
    if !current.selected.is_empty() {
        let ids: Vec<&str> = current.selected.iter().map(|p| p.id.as_str()).collect();
        println!("selected {}: {}", current.selected.len(), ids.join(", "));
    }
    if let Some(product) = &current.chosen {
        println!("chosen: {}  {}", product.id, product.title);
    }
}

fn print_collection(collection: &Collection) {
    println!(
        "{}  {}  ({})",
        collection.id, collection.title, collection.handle
    );
}

fn print_product(product: &Product, expanded: bool, selected: bool) {
    let marker = if selected { "[x]" } else { "[ ]" };
    let price = product.first_variant().map_or("-", |v| v.price.as_str());
    println!(
        "{marker} {}  {}  {}  {} variant(s) from {price}",
        product.id,
        product.title,
        product.status,
        product.variant_count()
    );
    if expanded {
        for variant in &product.variants {
            println!("      {}", variant_line(variant));
        }
    }
}

/// The compare-at price is shown only when it differs from the price.
pub(crate) fn variant_line(variant: &Variant) -> String {
    let compare = match variant.compare_at_price.as_deref() {
        Some(was) if variant.is_discounted() => format!(" (was {was})"),
        _ => String::new(),
    };
    format!(
        "{}  {}  {}{compare}  sku {}  qty {}",
        variant.id, variant.title, variant.price, variant.sku, variant.inventory_quantity
    )
}
