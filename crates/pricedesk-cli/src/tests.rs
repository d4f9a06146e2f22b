use super::*;
use crate::catalog::{apply_picks, variant_line, CurrentSelection, GridPicks};
use pricedesk_catalog::ProductGrid;
use pricedesk_core::{AppConfig, Environment, Product, ProductStatus, Variant};
use pricedesk_session::{ActiveSession, SessionMode, SessionState};

fn product(id: &str) -> Product {
    Product {
        id: id.to_string(),
        title: id.to_uppercase(),
        handle: id.to_string(),
        status: ProductStatus::Active,
        vendor: String::new(),
        product_type: String::new(),
        tags: Vec::new(),
        variants: Vec::new(),
        images: Vec::new(),
        options: Vec::new(),
        created_at: String::new(),
        updated_at: String::new(),
    }
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["pricedesk"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_collections_search() {
    let cli = Cli::try_parse_from(["pricedesk", "collections", "search", "summer"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Collections {
            command: CollectionsCommands::Search { ref term }
        }) if term == "summer"
    ));
}

#[test]
fn global_shop_and_host_after_subcommand() {
    let cli = Cli::try_parse_from([
        "pricedesk",
        "collections",
        "list",
        "--limit",
        "10",
        "--shop",
        "demo.myshopify.com",
        "--host",
        "YWRtaW4",
    ])
    .unwrap();

    assert_eq!(cli.shop.as_deref(), Some("demo.myshopify.com"));
    assert_eq!(cli.host.as_deref(), Some("YWRtaW4"));
    assert!(matches!(
        cli.command,
        Some(Commands::Collections {
            command: CollectionsCommands::List { limit: Some(10) }
        })
    ));
}

#[test]
fn parses_products_list_with_picks() {
    let cli = Cli::try_parse_from([
        "pricedesk",
        "products",
        "list",
        "--collection",
        "c1",
        "--select",
        "p1,p3",
        "--expand",
        "p2",
    ])
    .unwrap();

    let Some(Commands::Products {
        command:
            ProductsCommands::List {
                collection,
                select,
                expand,
                select_all,
                ..
            },
    }) = cli.command
    else {
        panic!("expected products list");
    };
    assert_eq!(collection.as_deref(), Some("c1"));
    assert_eq!(select, ["p1", "p3"]);
    assert_eq!(expand, ["p2"]);
    assert!(!select_all);
}

#[test]
fn products_limit_conflicts_with_collection() {
    let result = Cli::try_parse_from([
        "pricedesk",
        "products",
        "list",
        "--collection",
        "c1",
        "--limit",
        "10",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_variant_set_price() {
    let cli = Cli::try_parse_from(["pricedesk", "variants", "set-price", "v1", "19.99"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Variants {
            command: VariantsCommands::SetPrice { ref variant_id, ref price }
        }) if variant_id == "v1" && price == "19.99"
    ));
}

#[test]
fn parses_csv_download_output() {
    let cli = Cli::try_parse_from(["pricedesk", "csv", "download", "-o", "prices.csv"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Csv {
            command: CsvCommands::Download { output: Some(ref p) }
        }) if p.to_str() == Some("prices.csv")
    ));
}

#[test]
fn parses_auth_callback() {
    let cli = Cli::try_parse_from([
        "pricedesk",
        "auth",
        "callback",
        "demo.myshopify.com",
        "--code",
        "abc",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Auth {
            command: AuthCommands::Callback { ref shop, ref code }
        }) if shop == "demo.myshopify.com" && code == "abc"
    ));
}

#[test]
fn launch_url_is_overridden_by_flags() {
    let launch = session::launch_params(
        Some("https://app.example.com/?shop=a.myshopify.com&host=h1"),
        Some("b.myshopify.com".to_string()),
        None,
    )
    .unwrap();
    assert_eq!(launch.shop.as_deref(), Some("b.myshopify.com"));
    assert_eq!(launch.host.as_deref(), Some("h1"));
}

#[test]
fn apply_picks_expands_and_selects_in_list_order() {
    let mut grid = ProductGrid::with_listener(CurrentSelection::default());
    grid.set_products(vec![product("p1"), product("p2"), product("p3")]);

    apply_picks(
        &mut grid,
        &GridPicks {
            select: vec!["p3".into(), "missing".into(), "p1".into()],
            select_all: false,
            expand: vec!["p2".into()],
            choose: None,
        },
    );

    assert!(grid.is_expanded("p2"));
    let ids: Vec<&str> = grid
        .listener()
        .selected
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, ["p1", "p3"]);
}

#[test]
fn apply_picks_select_all() {
    let mut grid = ProductGrid::with_listener(CurrentSelection::default());
    grid.set_products(vec![product("p1"), product("p2")]);

    apply_picks(
        &mut grid,
        &GridPicks {
            select_all: true,
            ..GridPicks::default()
        },
    );

    assert_eq!(grid.listener().selected.len(), 2);
}

#[test]
fn describes_embedded_session() {
    let state = SessionState::Authenticated(ActiveSession {
        shop: "demo.myshopify.com".to_string(),
        access_token: "embedded-app-token".to_string(),
        mode: SessionMode::Embedded {
            host: "YWRtaW4".to_string(),
        },
    });
    assert_eq!(
        auth::describe_state(&state),
        "authenticated as demo.myshopify.com via embedded (host YWRtaW4)"
    );
    assert_eq!(
        auth::describe_state(&SessionState::Unauthenticated),
        "not authenticated"
    );
}

#[test]
fn apply_picks_choose_leaves_selection_alone() {
    let mut grid = ProductGrid::with_listener(CurrentSelection::default());
    grid.set_products(vec![product("p1"), product("p2")]);

    apply_picks(
        &mut grid,
        &GridPicks {
            choose: Some("p2".into()),
            ..GridPicks::default()
        },
    );

    let current = grid.listener();
    assert_eq!(current.chosen.as_ref().map(|p| p.id.as_str()), Some("p2"));
    assert!(current.selected.is_empty());
    assert!(!grid.is_selected("p2"));
}

#[test]
fn parses_products_list_choose() {
    let cli = Cli::try_parse_from(["pricedesk", "products", "list", "--choose", "p7"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Products {
            command: ProductsCommands::List { choose: Some(ref id), .. }
        }) if id == "p7"
    ));
}

fn variant(price: &str, compare_at_price: Option<&str>) -> Variant {
    Variant {
        id: "v1".to_string(),
        title: "Small".to_string(),
        price: price.to_string(),
        compare_at_price: compare_at_price.map(str::to_string),
        sku: "SKU-1".to_string(),
        inventory_quantity: 4,
        weight: 0.0,
        weight_unit: "kg".to_string(),
        selected_options: Vec::new(),
    }
}

#[test]
fn variant_line_shows_compare_at_only_when_discounted() {
    assert_eq!(
        variant_line(&variant("15.00", Some("20.00"))),
        "v1  Small  15.00 (was 20.00)  sku SKU-1  qty 4"
    );
    assert_eq!(
        variant_line(&variant("19.99", Some("19.99"))),
        "v1  Small  19.99  sku SKU-1  qty 4"
    );
    assert_eq!(
        variant_line(&variant("19.99", None)),
        "v1  Small  19.99  sku SKU-1  qty 4"
    );
}

#[test]
fn unreadable_session_store_leaves_session_unauthenticated() {
    // A directory cannot be read as a session file.
    let config = AppConfig {
        env: Environment::Test,
        log_level: "warn".to_string(),
        server_base_url: "http://localhost:3001/dev".to_string(),
        shopify_api_key: None,
        shopify_api_secret: None,
        shopify_scopes: String::new(),
        shopify_redirect_uri: String::new(),
        request_timeout_secs: 5,
        user_agent: "pricedesk-test/0.1".to_string(),
        session_path: std::env::temp_dir(),
        default_page_size: 50,
        max_page_size: 250,
        dev_shop: None,
        dev_access_token: None,
    };

    let ctx = session::open_session(&config, &pricedesk_session::LaunchParams::default())
        .expect("session opens despite the unreadable store");

    assert_eq!(ctx.state(), &SessionState::Unauthenticated);
}
