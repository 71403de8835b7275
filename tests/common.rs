//! Common test utilities for building canvases and node snapshots.
use strategy_canvas::prelude::*;

/// A data-source node at `position`.
#[allow(dead_code)]
pub fn data_node(id: &str, position: Point) -> Node {
    Node::new(
        id,
        position,
        NodeData::Data(DataSourceConfig {
            symbol: "BTC/USDT".to_string(),
            timeframe: Timeframe::OneHour,
        }),
    )
}

/// An RSI indicator node at `position`.
#[allow(dead_code)]
pub fn indicator_node(id: &str, position: Point) -> Node {
    Node::new(
        id,
        position,
        NodeData::Indicator(IndicatorConfig {
            indicator: IndicatorKind::Rsi,
            period: 14,
            source: PriceSource::Close,
        }),
    )
}

/// A "less than 30" condition node at `position`.
#[allow(dead_code)]
pub fn condition_node(id: &str, position: Point) -> Node {
    Node::new(
        id,
        position,
        NodeData::Condition(ConditionConfig {
            operator: ComparisonOperator::LessThan,
            threshold: 30.0,
        }),
    )
}

/// A buy action node at `position`.
#[allow(dead_code)]
pub fn action_node(id: &str, position: Point) -> Node {
    Node::new(
        id,
        position,
        NodeData::Action(ActionConfig {
            side: TradeSide::Buy,
            quantity: 0.5,
        }),
    )
}

/// Nodes `A`, `B`, `C`, `D` laid out left to right.
#[allow(dead_code)]
pub fn four_nodes() -> Vec<Node> {
    vec![
        data_node("A", Point::new(0.0, 0.0)),
        indicator_node("B", Point::new(300.0, 0.0)),
        condition_node("C", Point::new(600.0, 0.0)),
        action_node("D", Point::new(900.0, 0.0)),
    ]
}

/// A manager holding [`four_nodes`] and no connections.
#[allow(dead_code)]
pub fn manager_with_nodes() -> ConnectionManager {
    let mut manager = ConnectionManager::new();
    manager.update_nodes(four_nodes());
    manager
}

/// Drags an output-to-input connection from `source` to `target`.
#[allow(dead_code)]
pub fn connect(manager: &mut ConnectionManager, source: &str, target: &str) -> bool {
    manager.start_connection(source, HandleKind::Output, Point::new(0.0, 0.0));
    let connected = manager.complete_connection(target, HandleKind::Input);
    if !connected {
        manager.cancel_connection();
    }
    connected
}

/// Manager with the chain `A -> B -> C` already connected.
#[allow(dead_code)]
pub fn chain_manager() -> ConnectionManager {
    let mut manager = manager_with_nodes();
    assert!(connect(&mut manager, "A", "B"));
    assert!(connect(&mut manager, "B", "C"));
    manager
}

/// A 1200×800 viewport.
#[allow(dead_code)]
pub fn viewport() -> Size {
    Size::new(1200.0, 800.0)
}
