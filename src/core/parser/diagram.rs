use super::{parse_object, string_field, ParseFailure, ParseResult};
use crate::domain::model::{DiagramRecord, DiagramType, Kind};
use serde_json::{Map, Value};

// "er" also matches any text containing those two letters; the rules are
// checked in order so graph headers win first.
const DIAGRAM_RULES: &[(&[&str], DiagramType)] = &[
    (&["graph td", "graph lr"], DiagramType::Graph),
    (&["erdiagram", "er"], DiagramType::Er),
    (&["flowchart"], DiagramType::Flowchart),
    (&["sequencediagram"], DiagramType::Sequence),
    (&["classdiagram"], DiagramType::Class),
];

pub fn parse(text: &str) -> ParseResult<DiagramRecord> {
    let mut object = parse_object(Kind::Diagram, text)?;

    let diagram = string_field(&object, "diagram", "");
    if diagram.is_empty() {
        return Err(ParseFailure::EmptyPayload {
            kind: Kind::Diagram,
            field: "diagram",
        });
    }

    let config = match object.remove("config") {
        Some(Value::Object(config)) => config,
        _ => Map::new(),
    };

    Ok(DiagramRecord {
        title: string_field(&object, "title", "Relationship Diagram"),
        description: string_field(&object, "description", ""),
        diagram_type: detect_diagram_type(&diagram),
        diagram,
        theme: string_field(&object, "theme", "default"),
        config,
    })
}

pub fn detect_diagram_type(diagram: &str) -> DiagramType {
    let lowered = diagram.to_lowercase();
    DIAGRAM_RULES
        .iter()
        .find(|(markers, _)| markers.iter().any(|marker| lowered.contains(marker)))
        .map(|(_, diagram_type)| *diagram_type)
        .unwrap_or(DiagramType::Graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_td() {
        let diagram = parse(r#"{"title":"Schema","diagram":"graph TD\nA-->B"}"#).unwrap();

        assert_eq!(diagram.diagram_type, DiagramType::Graph);
        assert_eq!(diagram.diagram, "graph TD\nA-->B");
        assert_eq!(diagram.theme, "default");
        assert!(diagram.config.is_empty());
    }

    #[test]
    fn test_detect_diagram_type() {
        assert_eq!(detect_diagram_type("graph LR\n  Users --> Orders"), DiagramType::Graph);
        assert_eq!(detect_diagram_type("erDiagram\n  A ||--o{ B : has"), DiagramType::Er);
        assert_eq!(detect_diagram_type("flowchart TD\n  A --> B"), DiagramType::Flowchart);
        assert_eq!(
            detect_diagram_type("sequenceDiagram\n  Alice->>Bob: Hi"),
            DiagramType::Sequence
        );
        assert_eq!(detect_diagram_type("classDiagram\n  Animal <|-- Duck"), DiagramType::Class);
        assert_eq!(detect_diagram_type("pie\n  \"A\": 1"), DiagramType::Graph);
    }

    #[test]
    fn test_bare_er_wins_over_later_rules() {
        // "Order" contains "er"
        assert_eq!(detect_diagram_type("flowchart TD\n  Order --> Item"), DiagramType::Er);
    }

    #[test]
    fn test_theme_and_config_pass_through() {
        let text = r#"{
            "diagram": "graph TD\n A --> B",
            "theme": "dark",
            "config": {"nodeSpacing": 50, "rankSpacing": 40}
        }"#;
        let diagram = parse(text).unwrap();

        assert_eq!(diagram.theme, "dark");
        assert_eq!(diagram.config["nodeSpacing"], 50);
        assert_eq!(diagram.config.len(), 2);
    }

    #[test]
    fn test_empty_or_missing_diagram_is_discarded() {
        assert!(matches!(
            parse(r#"{"title":"x","diagram":""}"#),
            Err(ParseFailure::EmptyPayload { kind: Kind::Diagram, .. })
        ));
        assert!(parse(r#"{"title":"x"}"#).is_err());
        assert!(parse(r#"{"diagram": 12}"#).is_err());
    }
}
