//! Lists the keys matching a pattern and deletes them after confirmation.
//!
//! Run with: cargo run --bin purge_keys
//! Requires REDIS_URI. PURGE_KEY_PATTERN overrides the pattern and
//! PURGE_ASSUME_YES=1 skips the prompt.

use std::io;

use chrono::Utc;
use store_sweeper::config::{self, redis::RedisConfig};
use store_sweeper::modules::purger::{controller, crud::KeyCrud, model::PurgeOutcome};
use store_sweeper::services::confirm::{AssumeYes, Confirm, PromptConfirm};
use store_sweeper::services::report::{self, RunReport};
use store_sweeper::{CleanupError, CleanupResult};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    config::logging::init();

    if let Err(e) = run().await {
        match e {
            CleanupError::Connection { source, .. } => {
                eprintln!("❌ Failed to connect to Redis: {}", source)
            }
            other => eprintln!("❌ Error: {}", other),
        }
        std::process::exit(1);
    }
}

async fn run() -> CleanupResult<()> {
    let config = RedisConfig::from_env()?;
    let started_at = Utc::now();

    println!("🔌 Connecting to Redis...");
    let redis = config::redis::connect(&config).await?;
    println!("✅ Connected to Redis\n");

    let store = KeyCrud::new(redis);
    let mut confirm: Box<dyn Confirm> = if config.assume_yes {
        Box::new(AssumeYes)
    } else {
        Box::new(PromptConfirm::stdin())
    };

    let mut out = io::stdout();
    let outcome: PurgeOutcome =
        controller::purge(&store, &config.pattern, confirm.as_mut(), &mut out).await?;

    report::persist(
        config::report_path().as_deref(),
        &RunReport::new("purge_keys", started_at, outcome),
    );

    Ok(())
}
