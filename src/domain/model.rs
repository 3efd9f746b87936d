use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A data row as parsed from the payload. Key order follows the source JSON.
pub type Row = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Chart,
    Table,
    Diagram,
}

impl Kind {
    pub const ALL: [Kind; 3] = [Kind::Chart, Kind::Table, Kind::Diagram];

    /// Tag name used by the model when wrapping a payload of this kind.
    pub fn tag(self) -> &'static str {
        match self {
            Kind::Chart => "chart",
            Kind::Table => "table",
            Kind::Diagram => "mermaid",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSegment {
    pub kind: Kind,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Series {
    pub key: String,
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartType {
    Bar,
    Line,
    Pie,
    Scatter,
    Area,
    Donut,
    GroupedBar,
    StackedBar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Number,
    Currency,
    Date,
    Email,
    Url,
}

impl ColumnType {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_lowercase().as_str() {
            "text" => Some(ColumnType::Text),
            "number" => Some(ColumnType::Number),
            "currency" => Some(ColumnType::Currency),
            "date" => Some(ColumnType::Date),
            "email" => Some(ColumnType::Email),
            "url" => Some(ColumnType::Url),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub key: String,
    pub label: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramType {
    Graph,
    Er,
    Flowchart,
    Sequence,
    Class,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartRecord {
    pub title: String,
    pub description: String,
    pub data: Vec<Row>,
    pub x_axis_label: String,
    pub y_axis_label: String,
    pub series: Vec<Series>,
    pub chart_type: ChartType,
    pub available_types: Vec<ChartType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRecord {
    pub title: String,
    pub description: String,
    pub data: Vec<Row>,
    pub columns: Vec<Column>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagramRecord {
    pub title: String,
    pub description: String,
    pub diagram: String,
    pub theme: String,
    pub config: Map<String, Value>,
    pub diagram_type: DiagramType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum VisualizationRecord {
    #[serde(rename = "chart")]
    Chart(ChartRecord),
    #[serde(rename = "table")]
    Table(TableRecord),
    #[serde(rename = "mermaid")]
    Diagram(DiagramRecord),
}

impl VisualizationRecord {
    pub fn kind(&self) -> Kind {
        match self {
            VisualizationRecord::Chart(_) => Kind::Chart,
            VisualizationRecord::Table(_) => Kind::Table,
            VisualizationRecord::Diagram(_) => Kind::Diagram,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            VisualizationRecord::Chart(chart) => &chart.title,
            VisualizationRecord::Table(table) => &table.title,
            VisualizationRecord::Diagram(diagram) => &diagram.title,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    #[serde(alias = "ai")]
    Assistant,
    Tool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub content: String,
}

impl Message {
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            id: None,
            role: Role::Assistant,
            content: content.into(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationState {
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl ConversationState {
    pub fn new(messages: Vec<Message>) -> Self {
        Self { messages }
    }

    /// The latest message, but only when the assistant authored it.
    pub fn latest_assistant_message(&self) -> Option<&Message> {
        self.messages
            .last()
            .filter(|message| message.role == Role::Assistant)
    }
}

/// What a sink forwards to the UI layer for one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiEvent {
    pub name: String,
    pub props: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
}
