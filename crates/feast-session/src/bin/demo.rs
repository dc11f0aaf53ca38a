//! # Feast Demo
//!
//! Walks one ordering session end to end against a JSON menu: browse,
//! fill the cart, pay through the mock gateway, print the invoice.
//!
//! ## Usage
//! ```bash
//! # Bundled sample menu
//! cargo run -p feast-session --bin feast-demo
//!
//! # Custom menu and config
//! cargo run -p feast-session --bin feast-demo -- --menu ./menu.json --config ./feast.toml
//!
//! # More logging
//! RUST_LOG=feast=trace cargo run -p feast-session --bin feast-demo
//! ```

use std::env;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use feast_session::commands::{cart, checkout, menu};
use feast_session::config::SessionConfig;
use feast_session::telemetry::init_tracing;
use feast_session::Session;

const SAMPLE_MENU: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/menu.json");

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut menu_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--menu" | "-m" => {
                if i + 1 < args.len() {
                    menu_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Feast ordering demo");
                println!();
                println!("Usage: feast-demo [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -m, --menu <PATH>    Menu JSON export (default: bundled sample)");
                println!("  -c, --config <PATH>  Session config TOML");
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let mut config = SessionConfig::load(config_path)?;
    if menu_path.is_some() {
        config.menu.path = menu_path;
    }
    if config.menu.path.is_none() {
        config.menu.path = Some(PathBuf::from(SAMPLE_MENU));
    }

    println!("🍽  {}", config.store.name);
    println!("================================");

    let session = Session::from_config(config);

    // Navbar badge: a second handle on the same cart
    let badge = Arc::new(AtomicUsize::new(0));
    let badge_sink = Arc::clone(&badge);
    session.cart().subscribe(move |snapshot| {
        badge_sink.store(snapshot.item_count, Ordering::SeqCst);
    });

    // Browse
    let tabs = menu::menu_categories(&session)?;
    println!("Categories: {}", tabs.join(" | "));

    let items = menu::list_menu(&session, None, None)?;
    if items.is_empty() {
        println!("⚠ Menu is empty, nothing to order.");
        return Ok(());
    }

    for item in &items {
        let status = if item.is_available { "" } else { " (unavailable)" };
        println!(
            "  {:<22} {:>10}{}",
            item.name,
            session.config().format_currency(item.price),
            status
        );
    }

    // Order: two of the first available item, one of the second
    let available: Vec<_> = items.iter().filter(|item| item.is_available).collect();
    println!();
    if let Some(first) = available.first() {
        cart::add_to_cart(&session, &first.id)?;
        cart::add_to_cart(&session, &first.id)?;
    }
    if let Some(second) = available.get(1) {
        cart::add_to_cart(&session, &second.id)?;
    }
    if let Some(off) = items.iter().find(|item| !item.is_available) {
        if let Err(e) = cart::add_to_cart(&session, &off.id) {
            println!("✗ {}", e.message);
        }
    }

    let current = cart::get_cart(&session);
    println!(
        "Cart ({} items, badge shows {}):",
        current.totals.item_count,
        badge.load(Ordering::SeqCst)
    );
    for line in &current.items {
        println!(
            "  {:<22} x{:<3} {:>10}",
            line.name,
            line.quantity,
            session.config().format_currency(line.line_total)
        );
    }
    println!("  {:<27} {:>10}", "Total", current.totals.display);

    // Pay
    println!();
    let summary = checkout::order_summary(&session)?;
    println!(
        "Order {}: paying {}",
        summary.order_number,
        session.config().format_currency(summary.total)
    );
    let payment = checkout::pay(&session)?;
    println!("✓ Payment {}", payment.payment_id);

    // Invoice
    let invoice = checkout::invoice(&session)?;
    println!();
    println!("Invoice {}  {}", invoice.invoice.invoice_number, invoice.date);
    for line in &invoice.invoice.lines {
        println!(
            "  {:<22} x{:<3} {:>10}",
            line.name,
            line.quantity,
            session.config().format_currency(line.line_total)
        );
    }
    println!("  {:<27} {:>10}", "Total", invoice.total_display);
    if let Some(qr) = &invoice.verification_qr_url {
        println!("  Verify: {}", qr);
    }

    session.end();
    println!();
    println!("✓ Session ended, cart has {} items", session.cart().item_count());

    Ok(())
}
