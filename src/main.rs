//! # Inventory Console
//!
//! Demo entry point: signs in against the configured API, mounts the product
//! screen, sells one unit of the first product in stock and prints the
//! dashboard.
//!
//! ```bash
//! ADMIN_API_ORIGIN=http://localhost:5000 RUST_LOG=info cargo run -- alice secret
//! ```

use inventory_console::clients::{AuthForm, ScreenHandle};
use inventory_console::lifecycle::{setup_tracing, AdminConsole, ConsoleConfig};
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = ConsoleConfig::from_env().map_err(|e| e.to_string())?;
    info!(origin = %config.api_origin, "Starting inventory console");
    let mut console = AdminConsole::new(config);

    let mut args = std::env::args().skip(1);
    let mut form = AuthForm::new();
    form.username = args.next().unwrap_or_else(|| "admin".to_string());
    form.password = args.next().unwrap_or_default();

    let span = tracing::info_span!("login");
    match console.sign_in(&mut form).instrument(span).await {
        Ok(route) => info!(%route, "Signed in"),
        Err(reason) => {
            error!(%reason, "Login failed");
            console.shutdown().await?;
            return Err(reason);
        }
    }

    let products = console.open_products().await;
    let state = products.state();
    if let Some(message) = &state.error {
        error!(%message, "Product list unavailable");
    }

    if let Some(product) = state.items.iter().find(|p| p.quantity > 0) {
        let span = tracing::info_span!("sell", product = %product.name);
        match products.sell(product.id.clone()).instrument(span).await {
            Ok(()) => info!(product = %product.name, "Sold one unit"),
            Err(e) => error!(error = %e, "Sell failed"),
        }
    }

    let dashboard = console.dashboard();
    match dashboard.empty_message() {
        Some(message) => println!("{}", message),
        None => {
            for row in dashboard.price_rows() {
                println!("{:<24} {:>10} {:>6}", row.name, row.price, row.quantity);
            }
        }
    }

    drop(products);
    console.shutdown().await?;

    info!("Console closed");
    Ok(())
}
