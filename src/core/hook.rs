use crate::config::HookConfig;
use crate::core::dispatcher::Dispatcher;
use crate::core::extractor::Extractor;
use crate::core::parser::{ParseFailure, Parser};
use crate::domain::model::{ConversationState, Message, VisualizationRecord};
use crate::domain::ports::Sink;
use crate::utils::error::Result;
use serde::Serialize;

/// Counters for one hook invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HookReport {
    pub segments: usize,
    pub records: usize,
    pub invalid: usize,
    pub discarded: usize,
    pub dispatched: usize,
    pub failed: usize,
}

/// Runs after every model turn: extract, parse, dispatch. Holds no state
/// between calls.
#[derive(Debug, Clone)]
pub struct PostModelHook {
    extractor: Extractor,
    parser: Parser,
    dispatcher: Dispatcher,
}

impl PostModelHook {
    pub fn new(config: &HookConfig) -> Result<Self> {
        Ok(Self::from_parts(
            Extractor::new()?,
            Parser::new(config.chart.palette.clone()),
            Dispatcher::new(config.channels.clone()),
        ))
    }

    pub fn from_parts(extractor: Extractor, parser: Parser, dispatcher: Dispatcher) -> Self {
        Self {
            extractor,
            parser,
            dispatcher,
        }
    }

    pub fn extractor(&self) -> &Extractor {
        &self.extractor
    }

    /// Extract and parse without dispatching.
    pub fn records(&self, text: &str) -> Vec<VisualizationRecord> {
        self.collect(text).0
    }

    fn collect(&self, text: &str) -> (Vec<VisualizationRecord>, HookReport) {
        let segments = self.extractor.extract(text);
        let mut report = HookReport {
            segments: segments.len(),
            ..HookReport::default()
        };

        let mut records = Vec::with_capacity(segments.len());
        for segment in &segments {
            match self.parser.parse(segment) {
                Ok(record) => records.push(record),
                Err(e @ ParseFailure::EmptyPayload { .. }) => {
                    tracing::debug!("Skipping segment: {}", e);
                    report.discarded += 1;
                }
                Err(e) => {
                    tracing::warn!("⚠️ {}", e);
                    tracing::debug!("Rejected content: {}", segment.text);
                    report.invalid += 1;
                }
            }
        }

        report.records = records.len();
        (records, report)
    }

    /// Handles one assistant message. Never fails: every problem is logged
    /// and reflected in the report.
    pub fn run_message<S: Sink + ?Sized>(&self, message: &Message, sink: &mut S) -> HookReport {
        let (records, mut report) = self.collect(&message.content);
        if report.segments == 0 {
            return report;
        }

        let summary = self.dispatcher.dispatch(&records, message, sink);
        report.dispatched = summary.dispatched;
        report.failed = summary.failed;

        tracing::info!(
            "📊 Found {} segment(s), pushed {} visualization(s) ({} invalid, {} empty, {} failed)",
            report.segments,
            report.dispatched,
            report.invalid,
            report.discarded,
            report.failed
        );
        report
    }

    /// Looks only at the latest message, and only if the assistant wrote it.
    pub fn run<S: Sink + ?Sized>(&self, state: &ConversationState, sink: &mut S) -> HookReport {
        match state.latest_assistant_message() {
            Some(message) => self.run_message(message, sink),
            None => {
                tracing::debug!("Latest message is not from the assistant, nothing to do");
                HookReport::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::sinks::MemorySink;
    use crate::domain::model::Role;

    fn hook() -> PostModelHook {
        PostModelHook::new(&HookConfig::default()).unwrap()
    }

    #[test]
    fn test_plain_text_pushes_nothing() {
        let mut sink = MemorySink::default();
        let state = ConversationState::new(vec![Message::assistant("No data here.")]);

        let report = hook().run(&state, &mut sink);

        assert_eq!(report, HookReport::default());
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_only_latest_assistant_message_counts() {
        let chart = r#"<chart>{"data":[{"name":"a","v":1}]}</chart>"#;
        let state = ConversationState::new(vec![
            Message::assistant(chart),
            Message {
                id: None,
                role: Role::User,
                content: chart.to_string(),
            },
        ]);
        let mut sink = MemorySink::default();

        let report = hook().run(&state, &mut sink);

        assert_eq!(report.segments, 0);
        assert!(sink.events().is_empty());
        assert_eq!(hook().run(&ConversationState::default(), &mut sink), HookReport::default());
    }

    #[test]
    fn test_report_counts_each_outcome() {
        let text = concat!(
            r#"<chart>{"data":[{"name":"a","v":1}]}</chart>"#,
            r#"```table {"data": [}```"#,
            r#"```mermaid {"diagram": ""}```"#,
        );
        let mut sink = MemorySink::default();

        let report = hook().run_message(&Message::assistant(text), &mut sink);

        assert_eq!(
            report,
            HookReport {
                segments: 4,
                records: 2,
                invalid: 1,
                discarded: 1,
                dispatched: 2,
                failed: 0,
            }
        );
        assert_eq!(sink.events().len(), 2);
    }

    #[test]
    fn test_records_are_deterministic() {
        let text = r#"<table>{"data":[{"name":"John","salary":50000}]}</table>
            <chart>{"data":[{"name":"Q1","a":1,"b":2}]}</chart>"#;

        assert_eq!(hook().records(text), hook().records(text));
        assert_eq!(hook().records(text).len(), 4);
    }
}
