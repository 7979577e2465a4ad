//! Scripted storefront walk-through: browse, add to cart, check out, pay.
//!
//! Usage: `basecamp-demo [category/product-slug ...]`
//! (defaults to one family tent and two fishing kits).

use std::sync::Arc;

use anyhow::Context;

use basecamp_events::{AnalyticsSink, InMemoryAnalyticsSink};
use basecamp_storefront::{
    FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore, Screen, Storefront, StorefrontConfig,
};

fn main() -> anyhow::Result<()> {
    basecamp_observability::tracing::init(StorefrontConfig::log_format_from_env());
    let config = StorefrontConfig::from_env();
    tracing::info!(
        application = %config.application_name,
        payment_method = %config.payment_method,
        "configuration loaded"
    );

    let store: Box<dyn KeyValueStore> = match &config.store_path {
        Some(path) => {
            let store = FileKeyValueStore::new(path);
            tracing::info!(path = %store.path().display(), "using file store");
            Box::new(store)
        }
        None => Box::new(InMemoryKeyValueStore::new()),
    };
    let sink = Arc::new(InMemoryAnalyticsSink::new());
    let tracked = sink.subscribe();

    let mut shop = Storefront::new(config, store, sink);
    tracing::info!(session_id = %shop.session_id(), "session started");

    let picks: Vec<String> = std::env::args().skip(1).collect();
    let picks = if picks.is_empty() {
        vec![
            "family/family-tent-6-person".to_string(),
            "water/fishing-kit".to_string(),
            "water/fishing-kit".to_string(),
        ]
    } else {
        picks
    };

    shop.view(Screen::Home);
    for pick in &picks {
        let (category, slug) = pick
            .split_once('/')
            .with_context(|| format!("expected category/product-slug, got {pick:?}"))?;
        shop.add_to_cart(category, slug)
            .with_context(|| format!("failed to add {pick}"))?;
    }

    shop.view(Screen::Profile);
    shop.login("Rainbow", "rainbow@example.com", "sunshine")
        .context("login failed")?;

    shop.view(Screen::Cart);
    let summary = shop.view_checkout();
    tracing::info!(
        total = %summary.total,
        lines = summary.item_count,
        units = summary.total_quantity,
        "checkout"
    );

    let receipt = shop.pay_now();
    println!("{}", serde_json::to_string_pretty(&receipt)?);

    shop.logout();

    for message in tracked.drain() {
        tracing::info!(kind = ?message.kind, name = %message.name, "tracked");
    }

    Ok(())
}
