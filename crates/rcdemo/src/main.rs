//! rcdemo - drives an UnboundedLruCache and prints the events it raises

mod scenario;

use std::fmt::Display;
use anyhow::Result;
use clap::Parser;
use recencycache::{ListenerError, UnboundedLruCache};
use serde::Serialize;
use tracing::info;

use crate::scenario::Plan;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Print events as JSON lines
    #[arg(long)]
    json: bool,

    /// Evict every remaining entry after the first eviction
    #[arg(long)]
    drain: bool,

    /// Numbered entries to insert after the scripted writes
    #[arg(short, long, default_value_t = 0)]
    extra: usize,
}

fn print_event<E: Display + Serialize>(event: &E, json: bool) -> Result<(), ListenerError> {
    if json {
        println!("{}", serde_json::to_string(event)?);
    } else {
        println!("{}", event);
    }
    Ok(())
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!("Starting rcdemo v{}", env!("CARGO_PKG_VERSION"));

    let json = args.json;
    let cache: UnboundedLruCache<String, String> = UnboundedLruCache::with_listeners(
        move |event| print_event(event, json),
        move |event| print_event(event, json),
    );

    let plan = Plan {
        extra: args.extra,
        drain: args.drain,
    };
    let evicted = scenario::run(&cache, plan)?;

    for entry in &evicted {
        info!(key = %entry.key(), value = %entry.value(), "Evicted");
    }
    for key in cache.keys() {
        info!(key = %key, "Remaining");
    }

    Ok(())
}
