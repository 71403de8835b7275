use crate::geometry::Point;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four kinds of strategy building blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Data,
    Indicator,
    Condition,
    Action,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            NodeKind::Data => "data",
            NodeKind::Indicator => "indicator",
            NodeKind::Condition => "condition",
            NodeKind::Action => "action",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "1d")]
    OneDay,
}

/// Market data feeding the strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSourceConfig {
    pub symbol: String,
    pub timeframe: Timeframe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    Sma,
    Ema,
    Rsi,
    Macd,
    BollingerBands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceSource {
    Open,
    High,
    Low,
    #[default]
    Close,
    Volume,
}

/// A technical indicator computed over the upstream data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    pub indicator: IndicatorKind,
    pub period: u32,
    #[serde(default)]
    pub source: PriceSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOperator {
    GreaterThan,
    LessThan,
    CrossesAbove,
    CrossesBelow,
    Equal,
}

/// A boolean test over an indicator value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConditionConfig {
    pub operator: ComparisonOperator,
    pub threshold: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
    Close,
}

/// The order placed when the upstream condition holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionConfig {
    pub side: TradeSide,
    pub quantity: f64,
}

/// Type-specific payload of a node. The variant determines the node's kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum NodeData {
    Data(DataSourceConfig),
    Indicator(IndicatorConfig),
    Condition(ConditionConfig),
    Action(ActionConfig),
}

impl NodeData {
    pub fn kind(&self) -> NodeKind {
        match self {
            NodeData::Data(_) => NodeKind::Data,
            NodeData::Indicator(_) => NodeKind::Indicator,
            NodeData::Condition(_) => NodeKind::Condition,
            NodeData::Action(_) => NodeKind::Action,
        }
    }
}

/// A node on the canvas. `position` is the top-left corner in canvas space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub position: Point,
    #[serde(flatten)]
    pub data: NodeData,
}

impl Node {
    pub fn new(id: impl Into<String>, position: Point, data: NodeData) -> Self {
        Self {
            id: id.into(),
            position,
            data,
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.data.kind()
    }
}
