use clap::Parser;
use rand::Rng;
use rand::rngs::ThreadRng;
use serde_json::json;
use std::fs;
use strategy_canvas::prelude::*;

/// A CLI tool to generate random, acyclic strategy canvases
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_canvas.json")]
    output: String,

    /// Number of nodes to generate
    #[arg(short, long, default_value_t = 24)]
    nodes: usize,

    /// Probability of connecting any forward pair of nodes
    #[arg(long, default_value_t = 0.15)]
    density: f64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if !(0.0..=1.0).contains(&cli.density) {
        eprintln!("Error: --density ({}) must be between 0 and 1", cli.density);
        std::process::exit(1);
    }

    println!(
        "Generating canvas with {} nodes (edge density {})...",
        cli.nodes, cli.density
    );

    let dims = NodeDimensions::default();
    let arrangement =
        calculate_node_arrangement(cli.nodes, Size::new(4000.0, 4000.0), dims, 60.0);
    let positions = arrangement.positions(Point::new(0.0, 0.0), dims, cli.nodes);

    let nodes: Vec<Node> = positions
        .into_iter()
        .enumerate()
        .map(|(index, position)| {
            Node::new(format!("node-{}", index), position, random_payload(&mut rng))
        })
        .collect();

    // Edges only run from lower to higher index, so the graph is acyclic by
    // construction. Duplicates cannot occur for the same reason.
    let mut manager = ConnectionManager::new();
    manager.update_nodes(nodes.clone());
    for i in 0..nodes.len() {
        for j in (i + 1)..nodes.len() {
            if rng.random_bool(cli.density) {
                manager.start_connection(&nodes[i].id, HandleKind::Output, Point::ORIGIN);
                if !manager.complete_connection(&nodes[j].id, HandleKind::Input) {
                    manager.cancel_connection();
                }
            }
        }
    }

    let document = json!({
        "nodes": nodes,
        "connections": manager.export_connections(),
    });
    fs::write(&cli.output, serde_json::to_string_pretty(&document)?)?;

    println!(
        "Successfully generated {} nodes and {} connections to '{}'",
        manager.nodes().len(),
        manager.connections().len(),
        cli.output
    );
    Ok(())
}

fn random_payload(rng: &mut ThreadRng) -> NodeData {
    match rng.random_range(0..4) {
        0 => NodeData::Data(DataSourceConfig {
            symbol: ["BTC/USDT", "ETH/USDT", "SOL/USDT"][rng.random_range(0..3)].to_string(),
            timeframe: Timeframe::OneHour,
        }),
        1 => NodeData::Indicator(IndicatorConfig {
            indicator: [
                IndicatorKind::Sma,
                IndicatorKind::Ema,
                IndicatorKind::Rsi,
                IndicatorKind::Macd,
                IndicatorKind::BollingerBands,
            ][rng.random_range(0..5)],
            period: rng.random_range(5..=50),
            source: PriceSource::Close,
        }),
        2 => NodeData::Condition(ConditionConfig {
            operator: ComparisonOperator::GreaterThan,
            threshold: rng.random_range(10.0..90.0),
        }),
        _ => NodeData::Action(ActionConfig {
            side: if rng.random_bool(0.5) {
                TradeSide::Buy
            } else {
                TradeSide::Sell
            },
            quantity: rng.random_range(0.1..2.0),
        }),
    }
}
