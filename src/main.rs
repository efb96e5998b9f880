//! nvme-raid-collector entry point: CLI dispatch, collection loop, shutdown.

use anyhow::Result;
use clap::Parser;
use serde_json::json;
use tracing::{info, warn};

use nvme_raid_collector::app::cli::{resolve_log_filter, Args};
use nvme_raid_collector::app::logging::init_tracing;
use nvme_raid_collector::charts::{raid_charts, Chart};
use nvme_raid_collector::config::load_config;
use nvme_raid_collector::{Metrics, RaidCollector};

fn print_chart(chart: &Chart) -> Result<()> {
    let line = json!({ "kind": "chart", "chart": chart });
    println!("{}", serde_json::to_string(&line)?);
    Ok(())
}

fn print_metrics(mx: &Metrics) -> Result<()> {
    let line = json!({
        "kind": "metrics",
        "timestamp": chrono::Utc::now().timestamp(),
        "values": mx,
    });
    println!("{}", serde_json::to_string(&line)?);
    Ok(())
}

/// Print charts registered since the last call; returns the new high-water mark.
fn emit_new_charts(collector: &RaidCollector, emitted: usize) -> Result<usize> {
    for chart in collector.charts().iter().skip(emitted) {
        print_chart(chart)?;
    }
    Ok(collector.charts().len())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(name) = args.charts.as_deref() {
        for chart in raid_charts(name) {
            print_chart(&chart)?;
        }
        return Ok(());
    }

    // Config is read before the subscriber exists so its level can take part
    // in filter resolution.
    let loaded = load_config(args.config.as_deref()).await;
    let config_level = loaded
        .as_ref()
        .map(|c| c.logging.log_level.clone())
        .unwrap_or_else(|_| "info".to_string());
    init_tracing(resolve_log_filter(args.log_level.as_deref(), &config_level));

    let mut config = loaded?;
    if let Some(path) = args.ndsudo {
        config.collector.ndsudo_path = Some(path);
    }
    info!(
        "nvme-raid-collector v{} (update_every={}s, timeout={}s)",
        env!("CARGO_PKG_VERSION"),
        config.collector.update_every,
        config.collector.timeout
    );

    let update_every = config.collector.update_every();
    let mut collector = RaidCollector::new(config);
    collector.init()?;

    if args.check {
        let result = collector.check().await;
        collector.cleanup();
        return match result {
            Ok(()) => {
                info!("Check passed");
                Ok(())
            }
            Err(e) => Err(e.into()),
        };
    }

    if args.once {
        let mx = collector.collect().await;
        emit_new_charts(&collector, 0)?;
        collector.cleanup();
        return match mx {
            Some(mx) => print_metrics(&mx),
            None => Err(anyhow::anyhow!("no metrics collected")),
        };
    }

    info!("Collecting every {:?}", update_every);
    let mut ticker = tokio::time::interval(update_every);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut emitted = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                let mx = collector.collect().await;
                emitted = emit_new_charts(&collector, emitted)?;
                match mx {
                    Some(mx) => print_metrics(&mx)?,
                    None => warn!("Tick produced no metrics"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received (Ctrl+C)");
                break;
            }
        }
    }

    collector.cleanup();
    info!("Collector shutdown complete");
    Ok(())
}
