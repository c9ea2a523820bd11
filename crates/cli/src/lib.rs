//! Walkthrough driver: onboard one seller, open their catalog, list an item
//! and read it back.

use std::sync::Arc;

use anyhow::{Context, Result};

use bazaar_catalog::{CatalogBus, CatalogEvent, Item, Price};
use bazaar_core::{ItemId, ParticipantId};
use bazaar_events::{EventBus, EventEnvelope, InMemoryEventBus};
use bazaar_registry::{Registry, RegistryBus, RegistryConfig, RegistryEvent};

/// Decimals of the display unit the walkthrough prices in.
pub const DISPLAY_DECIMALS: u32 = 18;

/// What the walkthrough did, for printing or asserting.
#[derive(Debug)]
pub struct Walkthrough {
    pub seller: ParticipantId,
    pub item: Item,
    pub registry_events: Vec<EventEnvelope<RegistryEvent>>,
    pub catalog_events: Vec<EventEnvelope<CatalogEvent>>,
    pub registry: Registry,
}

/// Run register → provision → list → read back against a fresh registry.
pub fn run(config: RegistryConfig, item_name: &str, price: Price) -> Result<Walkthrough> {
    let registry_bus: Arc<InMemoryEventBus<EventEnvelope<RegistryEvent>>> =
        Arc::new(InMemoryEventBus::new());
    let catalog_bus: Arc<InMemoryEventBus<EventEnvelope<CatalogEvent>>> =
        Arc::new(InMemoryEventBus::new());
    let registry_sub = registry_bus.subscribe();
    let catalog_sub = catalog_bus.subscribe();

    let registry = Registry::new(config)
        .with_bus(registry_bus as RegistryBus)
        .with_catalog_bus(catalog_bus as CatalogBus);
    tracing::info!(registry_id = %registry.id(), "registry created");

    let seller = ParticipantId::new();
    registry
        .register(seller)
        .context("registering seller")?;
    registry
        .provision_catalog(seller)
        .context("provisioning catalog")?;

    let catalog = registry
        .catalog_of(seller)
        .context("looking up seller catalog")?;
    tracing::info!(catalog_id = %catalog.id(), "catalog ready");

    let item_id = catalog
        .add_item(seller, item_name, price)
        .context("listing item")?;
    debug_assert_eq!(item_id, ItemId::new(0));

    let item = catalog.get_item(item_id).context("reading item back")?;

    Ok(Walkthrough {
        seller,
        item,
        registry_events: registry_sub.drain(),
        catalog_events: catalog_sub.drain(),
        registry,
    })
}

/// Render `amount` smallest units as a decimal with `decimals` fraction digits,
/// trailing zeros trimmed (`100000000000000000`, 18 → `0.1`).
pub fn format_units(amount: u128, decimals: u32) -> String {
    let scale = 10u128.pow(decimals);
    let whole = amount / scale;
    let frac = amount % scale;
    if frac == 0 {
        return whole.to_string();
    }

    let digits = format!("{frac:0width$}", width = decimals as usize);
    format!("{whole}.{}", digits.trim_end_matches('0'))
}
