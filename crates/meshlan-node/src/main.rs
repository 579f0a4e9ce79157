use std::path::PathBuf;

use clap::Parser;

use meshlan_node::{Node, NodeConfig, logging};

#[derive(Parser)]
#[command(name = "meshlan-node", about = "meshlan VPN data-plane node")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "/etc/meshlan/config.toml")]
    config: PathBuf,

    /// Compile and print the route table, then exit
    #[arg(long)]
    dump_routes: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match NodeConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load config from {}: {e}", cli.config.display());
            std::process::exit(1);
        }
    };

    if std::env::var("RUST_LOG_FORMAT").as_deref() == Ok("json") {
        logging::init_json(&config.logging.level);
    } else {
        logging::init(&config.logging.level);
    }

    let mut node = match Node::from_config(&config) {
        Ok(node) => node,
        Err(e) => {
            tracing::error!("failed to build node: {e}");
            std::process::exit(1);
        }
    };

    if cli.dump_routes {
        print!("{}", node.dump_routes());
        return;
    }

    // Spawn SIGINT handler
    let handle = node.shutdown_handle();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        tracing::info!("received SIGINT, shutting down");
        handle.shutdown();
    });

    // Spawn SIGTERM handler (Docker sends SIGTERM on `docker stop`)
    #[cfg(unix)]
    {
        let handle = node.shutdown_handle();
        tokio::spawn(async move {
            let mut sigterm =
                tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
                    .expect("failed to register SIGTERM handler");
            sigterm.recv().await;
            tracing::info!("received SIGTERM, shutting down");
            handle.shutdown();
        });
    }

    node.run().await;
}
