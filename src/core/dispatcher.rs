use crate::domain::model::{Kind, Message, VisualizationRecord};
use crate::domain::ports::Sink;
use crate::utils::error::HookError;
use serde::{Deserialize, Serialize};

/// UI channel names, one per record kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Channels {
    pub chart: String,
    pub table: String,
    pub diagram: String,
}

impl Default for Channels {
    fn default() -> Self {
        Self {
            chart: "dynamicChart".to_string(),
            table: "dataTable".to_string(),
            diagram: "mermaidDiagram".to_string(),
        }
    }
}

impl Channels {
    pub fn for_kind(&self, kind: Kind) -> &str {
        match kind {
            Kind::Chart => &self.chart,
            Kind::Table => &self.table,
            Kind::Diagram => &self.diagram,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    pub dispatched: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    channels: Channels,
}

impl Dispatcher {
    pub fn new(channels: Channels) -> Self {
        Self { channels }
    }

    pub fn channels(&self) -> &Channels {
        &self.channels
    }

    /// Pushes every record, in order, to the channel of its kind. A failed
    /// push is logged and does not stop the remaining records.
    pub fn dispatch<S: Sink + ?Sized>(
        &self,
        records: &[VisualizationRecord],
        origin: &Message,
        sink: &mut S,
    ) -> DispatchSummary {
        let mut summary = DispatchSummary::default();

        for record in records {
            let channel = self.channels.for_kind(record.kind());
            let pushed = serde_json::to_value(record)
                .map_err(HookError::from)
                .and_then(|payload| sink.emit(channel, &payload, origin));

            match pushed {
                Ok(()) => {
                    tracing::debug!("📤 Pushed '{}' to {}", record.title(), channel);
                    summary.dispatched += 1;
                }
                Err(e) => {
                    tracing::error!("❌ Failed to push '{}' to {}: {}", record.title(), channel, e);
                    summary.failed += 1;
                }
            }
        }

        summary
    }
}
