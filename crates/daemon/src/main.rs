// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The scheduler daemon binary: wires a `Store`, a launcher/Butler adapter
//! pair, and spawns `consider_campaigns`/`consider_nodes` as cooperating
//! interval loops (§4.5). HTTP framing is out of scope (§1); this
//! binary only runs the background loops `/rpc/process` and the route
//! layer would otherwise also depend on.

use cm_adapters::{Butler, LocalLauncher, Launcher, UnconfiguredButler};
use cm_daemon::DaemonConfig;
use cm_storage::Store;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

fn now_ms() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_millis() as u64).unwrap_or(0)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let config = DaemonConfig::from_env();
    tokio::fs::create_dir_all(&config.artifact_root).await?;
    let store = Arc::new(Store::open(&config.wal_path)?);
    let launcher: Arc<dyn Launcher> = Arc::new(LocalLauncher::new());
    let butler: Arc<dyn Butler> = Arc::new(UnconfiguredButler);

    tracing::info!(worker_count = config.worker_count, poll_interval_ms = config.poll_interval.as_millis(), "scheduler daemon starting");

    let mut campaigns_ticker = tokio::time::interval(config.poll_interval);
    let campaigns_store = store.clone();
    let campaigns_task = tokio::spawn(async move {
        loop {
            campaigns_ticker.tick().await;
            let enqueued = consider_campaigns_tick(&campaigns_store);
            tracing::debug!(enqueued, "consider_campaigns tick");
        }
    });

    let mut worker_tasks = Vec::with_capacity(config.worker_count);
    for worker in 0..config.worker_count {
        let store = store.clone();
        let launcher = launcher.clone();
        let butler = butler.clone();
        let artifact_root = config.artifact_root.clone();
        let batch_size = config.batch_size;
        let mut ticker = tokio::time::interval(config.poll_interval);
        worker_tasks.push(tokio::spawn(async move {
            loop {
                ticker.tick().await;
                let namespaces: Vec<_> =
                    store.state().campaigns_with_status(cm_core::CampaignStatus::is_schedulable).iter().map(|c| c.namespace).collect();
                for namespace in namespaces {
                    let outcomes =
                        cm_daemon::consider_nodes(&store, launcher.clone(), butler.clone(), &artifact_root, namespace, batch_size, now_ms()).await;
                    if !outcomes.is_empty() {
                        tracing::debug!(worker, %namespace, processed = outcomes.len(), "consider_nodes tick");
                    }
                }
            }
        }));
    }

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown signal received, stopping loops");
    campaigns_task.abort();
    for task in worker_tasks {
        task.abort();
    }
    Ok(())
}

fn consider_campaigns_tick(store: &Store) -> usize {
    cm_daemon::consider_campaigns(store, now_ms())
}
