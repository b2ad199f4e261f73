//! confsyncd daemon entry point.
//!
//! Parses router config dumps and registers each device and its interfaces
//! in the discovery graph. Dumps are independent, so each one runs on its
//! own worker; a failed dump is reported and does not stop its siblings.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use topo_confsyncd::config::Args;
use topo_confsyncd::router_sync::RouterSync;
use topo_graph::{GraphClient, HttpGraphClient};
use topo_log::{error, info, Logger};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let logger = args.logger();

    let client: Arc<dyn GraphClient> = match HttpGraphClient::new(&args.graph, logger.clone()) {
        Ok(client) => Arc::new(client),
        Err(e) => {
            error!(logger, "cannot set up graph client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(
        logger,
        "confsyncd: syncing {} dump(s){}",
        args.dumps.len(),
        if args.dry_run { " (dry run)" } else { "" }
    );

    let mut workers = Vec::new();
    for path in &args.dumps {
        workers.push(tokio::spawn(sync_one(
            path.clone(),
            Arc::clone(&client),
            args.dry_run,
            logger.clone(),
        )));
    }

    let mut failed = false;
    for worker in workers {
        match worker.await {
            Ok(ok) => failed |= !ok,
            Err(e) => {
                error!(logger, "worker panicked: {}", e);
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Syncs a single dump file, reporting failures to the log. Returns
/// whether the dump succeeded.
async fn sync_one(
    path: PathBuf,
    client: Arc<dyn GraphClient>,
    dry_run: bool,
    logger: Logger,
) -> bool {
    let device = Args::device_name(&path);

    let file = match File::open(&path) {
        Ok(file) => file,
        Err(e) => {
            error!(logger, "cannot open {}: {}", path.display(), e);
            return false;
        }
    };

    let sync = RouterSync::new(client.as_ref(), dry_run, logger.clone());
    match sync.sync_dump(&device, BufReader::new(file)).await {
        Ok(_) => true,
        Err(e) => {
            error!(logger, "sync failed for {}: {}", device, e);
            false
        }
    }
}
