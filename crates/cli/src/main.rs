use anyhow::Result;

use bazaar_catalog::Price;
use bazaar_registry::RegistryConfig;

fn main() -> Result<()> {
    bazaar_observability::init();

    let config = RegistryConfig::from_env()?;
    tracing::info!(?config, "configuration loaded");

    let out = bazaar_cli::run(config, "Laptop", Price::new(100_000_000_000_000_000))?;

    let (id, name, price, available) = out.item.clone().into_parts();
    println!("Seller:       {}", out.seller);
    println!("Item ID:      {id}");
    println!("Name:         {name}");
    println!(
        "Price:        {}",
        bazaar_cli::format_units(price.amount(), bazaar_cli::DISPLAY_DECIMALS)
    );
    println!("Is Available: {available}");
    println!(
        "Notifications: {} registry, {} catalog",
        out.registry_events.len(),
        out.catalog_events.len()
    );

    println!("{}", out.registry.snapshot().to_json()?);
    Ok(())
}
