use crate::config::HookConfig;
use crate::core::hook::{HookReport, PostModelHook};
use crate::core::instructions::SYSTEM_INSTRUCTIONS;
use crate::domain::model::ConversationState;
use crate::domain::ports::Sink;
use crate::utils::error::{HookError, Result};
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A tool the agent framework exposes to the model. Execution belongs to
/// the framework; this is only its declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
}

impl ToolSpec {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Everything needed to assemble an agent. Built once at startup and
/// handed to [`Agent::build`].
#[derive(Debug, Clone, PartialEq)]
pub struct AgentConfig {
    pub instructions: String,
    pub tools: Vec<ToolSpec>,
    pub hook: HookConfig,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            instructions: SYSTEM_INSTRUCTIONS.to_string(),
            tools: vec![ToolSpec::new(
                "search_tool",
                "Discover data for a query and describe its structure and relationships",
            )],
            hook: HookConfig::default(),
        }
    }
}

impl Validate for AgentConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("instructions", &self.instructions)?;

        let mut names = HashSet::new();
        for tool in &self.tools {
            validate_non_empty_string("tools.name", &tool.name)?;
            if !names.insert(tool.name.as_str()) {
                return Err(HookError::ValidationError {
                    field: "tools.name".to_string(),
                    reason: format!("Duplicate tool name: {}", tool.name),
                });
            }
        }

        self.hook.validate()
    }
}

#[derive(Debug, Clone)]
pub struct Agent {
    instructions: String,
    tools: Vec<ToolSpec>,
    hook: PostModelHook,
}

impl Agent {
    pub fn build(config: AgentConfig) -> Result<Self> {
        config.validate()?;
        let hook = PostModelHook::new(&config.hook)?;

        tracing::info!("🤖 Agent assembled with {} tool(s)", config.tools.len());
        Ok(Self {
            instructions: config.instructions,
            tools: config.tools,
            hook,
        })
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn tools(&self) -> &[ToolSpec] {
        &self.tools
    }

    pub fn hook(&self) -> &PostModelHook {
        &self.hook
    }

    /// Called by the framework after each model turn.
    pub fn post_model_hook<S: Sink + ?Sized>(
        &self,
        state: &ConversationState,
        sink: &mut S,
    ) -> HookReport {
        self.hook.run(state, sink)
    }
}
