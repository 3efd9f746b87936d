pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::sinks::{JsonLinesSink, MemorySink};
pub use config::{cli::LocalStorage, HookConfig};
pub use core::{
    agent::{Agent, AgentConfig, ToolSpec},
    extractor::{Extractor, Grammar},
    hook::{HookReport, PostModelHook},
    parser::{ParseFailure, Parser},
};
pub use domain::model::{ConversationState, Message, Role, UiEvent, VisualizationRecord};
pub use utils::error::{HookError, Result};
