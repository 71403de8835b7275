use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::time::Instant;
use strategy_canvas::prelude::*;

// --- Document format ---
// A saved canvas: the node snapshot plus a connection export.

#[derive(Deserialize)]
struct CanvasDocument {
    nodes: Vec<serde_json::Value>,
    connections: serde_json::Value,
}

/// Inspect a saved strategy canvas and suggest free node positions
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the canvas document JSON file
    document_path: String,

    /// Optional canvas config JSON (dimensions, positioning, canvas state)
    #[arg(short, long)]
    config: Option<String>,

    /// Suggest positions for this many new nodes
    #[arg(short, long, default_value_t = 0)]
    place: usize,

    /// Viewport width in screen pixels
    #[arg(long, default_value_t = 1280.0)]
    width: f64,

    /// Viewport height in screen pixels
    #[arg(long, default_value_t = 800.0)]
    height: f64,

    /// Print every connection path under the configured canvas state
    #[arg(long)]
    paths: bool,
}

fn main() {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let total_start = Instant::now();

    // --- 1. Loading ---
    let config = match &cli.config {
        Some(path) => CanvasConfig::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load config: {}", e))),
        None => CanvasConfig::default(),
    };
    let content = fs::read_to_string(&cli.document_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read canvas document '{}': {}",
            cli.document_path, e
        ))
    });
    let document: CanvasDocument = serde_json::from_str(&content)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse canvas document: {}", e)));

    let mut skipped_nodes = 0;
    let nodes: Vec<Node> = document
        .nodes
        .into_iter()
        .filter_map(|raw| match serde_json::from_value::<Node>(raw) {
            Ok(node) => Some(node),
            Err(e) => {
                log::warn!("Skipping malformed node: {}", e);
                skipped_nodes += 1;
                None
            }
        })
        .collect();

    // --- 2. Import ---
    let viewport = Size::new(cli.width, cli.height);
    let mut session = CanvasSession::from_config(&config, viewport);
    session.manager_mut().update_nodes(nodes);
    let import_start = Instant::now();
    let report = session
        .manager_mut()
        .import_connections(&document.connections)
        .unwrap_or_else(|e| exit_with_error(&format!("Import failed: {}", e)));
    let import_duration = import_start.elapsed();

    println!("Loaded canvas from: {}", cli.document_path);
    println!(
        "  Nodes:       {} ({} skipped)",
        session.nodes().len(),
        skipped_nodes
    );
    println!(
        "  Connections: {} imported, {} flagged, {} dropped",
        report.imported, report.flagged, report.dropped
    );

    // --- 3. Statistics ---
    let manager = session.manager();
    let stats = manager.get_connection_stats();
    println!("\n--- Connection Summary ---");
    println!("Total:   {}", stats.total_connections);
    println!("Valid:   {}", stats.valid_connections);
    println!("Invalid: {}", stats.invalid_connections);
    for node in manager.nodes() {
        println!(
            "  {:<12} {:<38} {} connection(s)",
            node.kind(),
            node.id,
            stats.count_for(&node.id)
        );
    }

    println!("\n--- Evaluation Order ---");
    for (index, id) in manager.topological_order().iter().enumerate() {
        println!("{:>3}. {}", index + 1, id);
    }

    if cli.paths {
        println!("\n--- Connection Paths ---");
        for connection in manager.connections() {
            match manager.connection_path(&connection.id) {
                Some(path) => println!("{}: {}", connection.id, path),
                None => println!("{}: <endpoint missing>", connection.id),
            }
        }
    }

    // --- 4. Placement suggestions ---
    if cli.place > 0 {
        let positions = session.positioner().calculate_multiple_node_positions(
            cli.place,
            viewport,
            session.canvas_state(),
            session.nodes(),
        );
        println!("\n--- Suggested Positions ---");
        for position in positions {
            println!("  {}", position);
        }
    }

    println!("\n--- Performance Summary ---");
    println!("Import:          {:?}", import_duration);
    println!("Total Execution: {:?}", total_start.elapsed());
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
