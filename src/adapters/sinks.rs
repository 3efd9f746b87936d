use crate::domain::model::{Message, UiEvent};
use crate::domain::ports::Sink;
use crate::utils::error::Result;
use serde_json::Value;
use std::io::Write;

fn ui_event(channel: &str, payload: &Value, origin: &Message) -> UiEvent {
    UiEvent {
        name: channel.to_string(),
        props: payload.clone(),
        message_id: origin.id.clone(),
    }
}

/// Writes each event as one JSON object per line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for JsonLinesSink<W> {
    fn emit(&mut self, channel: &str, payload: &Value, origin: &Message) -> Result<()> {
        let event = ui_event(channel, payload, origin);
        serde_json::to_writer(&mut self.writer, &event)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps events in memory, for embedding hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    events: Vec<UiEvent>,
}

impl MemorySink {
    pub fn events(&self) -> &[UiEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<UiEvent> {
        self.events
    }
}

impl Sink for MemorySink {
    fn emit(&mut self, channel: &str, payload: &Value, origin: &Message) -> Result<()> {
        self.events.push(ui_event(channel, payload, origin));
        Ok(())
    }
}
