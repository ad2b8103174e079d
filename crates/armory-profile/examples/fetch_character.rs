//! Fetch and print a complete character summary.
//!
//! Usage:
//!
//! ```text
//! BLIZZARD_CLIENT_ID=... BLIZZARD_CLIENT_SECRET=... \
//!     cargo run --example fetch_character -- <realm> <name>
//! ```

use std::sync::Arc;

use armory_cache::MemoryStore;
use armory_profile::ProfileClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let realm = args.next().ok_or("usage: fetch_character <realm> <name>")?;
    let name = args.next().ok_or("usage: fetch_character <realm> <name>")?;

    let client = ProfileClient::from_env(Arc::new(MemoryStore::new()))?;

    let summary = client.complete_character(&realm, &name).await?;

    println!("{} - {}", summary.name, summary.realm_slug);
    println!("  class: {} ({})", summary.class_name, summary.class_color);
    match &summary.spec_name {
        Some(spec) => println!("  spec:  {} [{}]", spec, summary.role),
        None => println!("  spec:  (none)"),
    }
    println!("  level: {} / ilvl {}", summary.level, summary.item_level);
    match &summary.avatar {
        Some(avatar) => println!("  avatar: {avatar}"),
        None => println!("  avatar: (none)"),
    }

    Ok(())
}
