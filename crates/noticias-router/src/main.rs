//! Noticias Router CLI
//!
//! Starts the HTTP server for the article API.

use noticias_router::{config::RouterConfig, start_server, RouterError};
use std::env;
use std::process;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), RouterError> {
    let args: Vec<String> = env::args().collect();

    let config = if args.len() > 2 && args[1] == "--config" {
        RouterConfig::from_file(&args[2])?
    } else if args.len() > 1 && args[1] == "--help" {
        print_help();
        process::exit(0);
    } else {
        eprintln!("No config file specified, using defaults (127.0.0.1:8000, ./noticias.db)");
        eprintln!("Usage: noticias-router --config <path-to-config.toml>");
        eprintln!();
        RouterConfig::default()
    };

    start_server(config).await?;

    Ok(())
}

fn print_help() {
    println!("Noticias Router - REST API over the article store");
    println!();
    println!("USAGE:");
    println!("    noticias-router --config <path-to-config.toml>");
    println!();
    println!("OPTIONS:");
    println!("    --config <file>    Load configuration from TOML file");
    println!("    --help             Print this help message");
    println!();
    println!("CONFIGURATION:");
    println!("    The TOML config file may contain:");
    println!("    - bind_address: IP address to bind (default '127.0.0.1')");
    println!("    - bind_port: Port number (default 8000)");
    println!("    - database_path: SQLite file (default 'noticias.db')");
    println!();
}
