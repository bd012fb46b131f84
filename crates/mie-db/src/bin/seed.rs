//! # Seed Data Generator
//!
//! Populates the database with warung inventory for development.
//!
//! ## Usage
//! ```bash
//! # Seed the full ingredient catalog (default)
//! cargo run -p mie-db --bin seed
//!
//! # Limit the number of items
//! cargo run -p mie-db --bin seed -- --count 5
//!
//! # Specify database path
//! cargo run -p mie-db --bin seed -- --db ./data/kasir.db
//! ```
//!
//! ## Generated Data
//! Inserts the ingredient catalog a mie warung actually stocks (ayam,
//! bakso, pangsit, mie, sayur and friends), each with a per-kg price
//! and a starting stock level. Items without their own price fall back
//! to the store default at settlement time.

use chrono::Utc;
use std::env;
use uuid::Uuid;

use mie_core::InventoryItem;
use mie_db::{Database, DbConfig};

/// (name, stock in kg, price per kg in rupiah; None uses the store default)
const CATALOG: &[(&str, i64, Option<i64>)] = &[
    ("Ayam", 10, Some(8_000)),
    ("Bakso", 8, Some(10_000)),
    ("Pangsit", 12, Some(6_000)),
    ("Mie Telur", 25, Some(7_000)),
    ("Ceker", 6, Some(5_000)),
    ("Sawi", 15, None),
    ("Daun Bawang", 4, None),
    ("Bawang Goreng", 3, Some(12_000)),
    ("Kerupuk", 5, Some(4_000)),
    ("Sambal", 7, None),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut count: usize = CATALOG.len();
    let mut db_path = String::from("./kasir_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(CATALOG.len());
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Mie Kasir Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of items to seed (default: full catalog)");
                println!("  -d, --db <PATH>    Database file path (default: ./kasir_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Mie Kasir Seed Data Generator");
    println!("================================");
    println!("Database: {}", db_path);
    println!("Items:    {}", count.min(CATALOG.len()));
    println!();

    // Connect to database
    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing inventory
    let existing = db.inventory().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding inventory...");

    let now = Utc::now();
    let mut seeded = 0;

    for (name, stock, price) in CATALOG.iter().take(count) {
        let item = InventoryItem {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            stock: *stock,
            price_rupiah: *price,
            unit: "kg".to_string(),
            details: None,
            created_at: now,
            updated_at: now,
        };

        if let Err(e) = db.inventory().insert(&item).await {
            eprintln!("Failed to insert {}: {}", name, e);
            continue;
        }

        seeded += 1;
    }

    println!("✓ Seeded {} items", seeded);

    // Verify search works against the seeded data
    println!();
    println!("Verifying search...");
    let hits = db.inventory().search("mie").await?;
    println!("  Search 'mie': {} results", hits.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
