pub mod agent;
pub mod dispatcher;
pub mod export;
pub mod extractor;
pub mod hook;
pub mod instructions;
pub mod parser;

pub use crate::domain::model::{ConversationState, Message, RawSegment, VisualizationRecord};
pub use crate::domain::ports::{Sink, Storage};
pub use crate::utils::error::Result;
