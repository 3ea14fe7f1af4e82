//! Deletes every document from the target databases' non-system collections.
//!
//! Run with: cargo run --bin wipe_collections
//! Requires MONGODB_URI. WIPE_DATABASES overrides the database list.

use std::io;

use chrono::Utc;
use store_sweeper::config::{self, database::DatabaseConfig};
use store_sweeper::modules::wiper::{controller, crud::CollectionCrud, model::WipeReport};
use store_sweeper::services::report::{self, RunReport};
use store_sweeper::CleanupResult;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    config::logging::init();

    if let Err(e) = run().await {
        eprintln!("\n❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> CleanupResult<()> {
    let config = DatabaseConfig::from_env()?;
    let started_at = Utc::now();

    println!("{}", "=".repeat(60));
    println!("MongoDB Database Cleanup");
    println!("Host: {}", config.redacted_host());
    println!("Databases: {}", config.databases.join(", "));
    println!("{}\n", "=".repeat(60));

    println!("Connecting to MongoDB...");
    let client = config::database::connect(&config).await?;
    println!("✓ Connected to MongoDB\n");

    let store = CollectionCrud::new(client);
    let result = wipe(&store, &config.databases).await;

    // Release the connection whether or not the wipe finished.
    store.shutdown().await;
    println!("✓ MongoDB connection closed");

    let outcome = result?;
    report::persist(
        config::report_path().as_deref(),
        &RunReport::new("wipe_collections", started_at, outcome),
    );

    Ok(())
}

async fn wipe(store: &CollectionCrud, databases: &[String]) -> CleanupResult<WipeReport> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    controller::wipe(store, databases, &mut out).await
}
