use anyhow::Result;
use serde_json::json;
use vizhook::core::instructions::SYSTEM_INSTRUCTIONS;
use vizhook::domain::model::{ChartType, ColumnType, DiagramType, Kind};
use vizhook::{
    Agent, AgentConfig, ConversationState, HookConfig, MemorySink, Message, PostModelHook,
    VisualizationRecord,
};

fn hook() -> PostModelHook {
    PostModelHook::new(&HookConfig::default()).unwrap()
}

fn run(text: &str) -> MemorySink {
    let mut sink = MemorySink::default();
    let state = ConversationState::new(vec![Message::assistant(text).with_id("run-1")]);
    hook().run(&state, &mut sink);
    sink
}

#[test]
fn test_text_without_delimiters_pushes_nothing() {
    let text = "Revenue grew 12% this quarter. Let me know if you want a breakdown.";

    assert!(hook().extractor().extract(text).is_empty());
    assert!(run(text).events().is_empty());
}

#[test]
fn test_sales_chart_end_to_end() {
    let text = r#"Here are the numbers:
<chart>
{"title":"Sales","data":[{"name":"Jan","value":100},{"name":"Feb","value":150}]}
</chart>"#;

    let sink = run(text);

    // 小寫與大寫兩種標籤樣式都會命中同一個區塊
    assert_eq!(sink.events().len(), 2);
    let event = &sink.events()[0];
    assert_eq!(event.name, "dynamicChart");
    assert_eq!(event.message_id.as_deref(), Some("run-1"));
    assert_eq!(
        event.props,
        json!({
            "type": "chart",
            "title": "Sales",
            "description": "",
            "data": [{"name": "Jan", "value": 100}, {"name": "Feb", "value": 150}],
            "xAxisLabel": "",
            "yAxisLabel": "",
            "series": [{"key": "value", "name": "Value", "color": "#0088FE"}],
            "chartType": "bar",
            "availableTypes": ["bar", "line", "pie"]
        })
    );
    assert_eq!(sink.events()[0], sink.events()[1]);
}

#[test]
fn test_monthly_trend_resolves_to_line() {
    let text = r#"```chart
{"title": "Signups", "description": "Monthly trend of signups", "data": [{"name": "Jan", "a": 1, "b": 2}]}
```"#;

    let records = hook().records(text);
    assert_eq!(records.len(), 1);
    let VisualizationRecord::Chart(chart) = &records[0] else {
        panic!("expected a chart");
    };
    assert_eq!(chart.chart_type, ChartType::Line);
    assert!(chart.available_types.contains(&ChartType::Area));
    assert!(chart.available_types.contains(&ChartType::Bar));
    assert!(chart.available_types.contains(&ChartType::StackedBar));
}

#[test]
fn test_multi_series_bar_available_types_in_json() {
    let text = r#"```chart
{"title": "Regional sales", "data": [{"name": "Q1", "north": 10, "south": 20}]}
```"#;

    let sink = run(text);
    assert_eq!(sink.events().len(), 1);

    let props = &sink.events()[0].props;
    assert_eq!(props["chartType"], "bar");
    assert_eq!(
        props["availableTypes"],
        json!(["bar", "grouped-bar", "stacked-bar", "line", "area"])
    );

    let pie = run(r#"```chart
{"title": "Share", "data": [{"name": "A", "value": 1}]}
```"#);
    assert_eq!(pie.events()[0].props["availableTypes"], json!(["pie", "donut", "bar"]));
}

#[test]
fn test_table_columns_follow_first_row() {
    let sink = run(r#"<table>{"data":[{"name":"John","salary":50000}]}</table>"#);

    let event = &sink.events()[0];
    assert_eq!(event.name, "dataTable");
    assert_eq!(event.props["title"], "Data Table");
    assert_eq!(
        event.props["columns"],
        json!([
            {"key": "name", "label": "Name", "type": "text"},
            {"key": "salary", "label": "Salary", "type": "currency"}
        ])
    );
}

#[test]
fn test_mermaid_graph() {
    let records = hook().records(r#"<mermaid>{"diagram":"graph TD\nA-->B"}</mermaid>"#);

    assert_eq!(records.len(), 2);
    match &records[0] {
        VisualizationRecord::Diagram(diagram) => {
            assert_eq!(diagram.diagram_type, DiagramType::Graph);
            assert_eq!(diagram.title, "Relationship Diagram");
        }
        other => panic!("expected a diagram, got {:?}", other.kind()),
    }
}

#[test]
fn test_malformed_table_does_not_block_chart() {
    let text = r#"
<table>{"data": [{"name": "John", "salary": }]}</table>
Some commentary in between.
<chart>{"title": "Headcount", "data": [{"name": "Eng", "count": 12}]}</chart>
"#;

    let mut sink = MemorySink::default();
    let report = hook().run_message(&Message::assistant(text), &mut sink);

    assert_eq!(report.invalid, 2);
    assert_eq!(report.dispatched, 2);
    assert!(sink.events().iter().all(|e| e.name == "dynamicChart"));
}

#[test]
fn test_pipeline_is_idempotent() {
    let text = format!(
        "{}\n<table>{}</table>\n```mermaid\n{}\n```",
        r#"<chart>{"data":[{"name":"a","x":1,"y":2,"z":3}]}</chart>"#,
        r#"{"data":[{"email":"a@b.c","website":"https://b.c","joined_date":"2024-01-01"}]}"#,
        r#"{"diagram":"sequenceDiagram\nA->>B: ping","theme":"forest"}"#,
    );

    let first = hook().records(&text);
    let second = hook().records(&text);
    assert_eq!(first, second);

    let kinds: Vec<Kind> = first.iter().map(VisualizationRecord::kind).collect();
    assert_eq!(
        kinds,
        vec![Kind::Chart, Kind::Chart, Kind::Table, Kind::Table, Kind::Diagram]
    );

    let VisualizationRecord::Table(table) = &first[2] else {
        panic!("expected a table");
    };
    let types: Vec<ColumnType> = table.columns.iter().map(|c| c.column_type).collect();
    assert_eq!(types, vec![ColumnType::Email, ColumnType::Url, ColumnType::Date]);
}

#[test]
fn test_shipped_instruction_examples_are_accepted() -> Result<()> {
    let agent = Agent::build(AgentConfig::default())?;
    let records = agent.hook().records(SYSTEM_INSTRUCTIONS);

    let count = |kind: Kind| records.iter().filter(|r| r.kind() == kind).count();
    assert_eq!(count(Kind::Chart), 4);
    assert_eq!(count(Kind::Table), 2);
    assert_eq!(count(Kind::Diagram), 2);
    Ok(())
}

#[test]
fn test_conversation_state_from_json() -> Result<()> {
    let state: ConversationState = serde_json::from_value(json!({
        "messages": [
            {"role": "user", "content": "Show me sales"},
            {"id": "ai-42", "role": "ai", "content": "<CHART>{\"data\":[{\"name\":\"a\",\"v\":1}]}</CHART>"}
        ]
    }))?;

    let mut sink = MemorySink::default();
    let report = Agent::build(AgentConfig::default())?.post_model_hook(&state, &mut sink);

    assert_eq!(report.dispatched, 2);
    assert_eq!(sink.events()[0].message_id.as_deref(), Some("ai-42"));
    Ok(())
}
