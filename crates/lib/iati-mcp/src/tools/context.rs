use rmcp::{
    ErrorData,
    model::{CallToolResult, Content},
    schemars,
    tool,
    tool_router,
};
use serde::{Deserialize, Serialize};

use crate::IatiMcp;

/// Payload listing the MCP commands this server offers.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct HelpCommands {
    pub commands: Vec<String>,
}

impl Default for HelpCommands {
    fn default() -> Self {
        Self {
            commands: vec![
                "help - List the MCP commands offered by this server.".to_string(),
                "health - Returns 'ok' when the server is running.".to_string(),
                "get_iati_projects - Keyword search over project titles with sector and status breakdowns."
                    .to_string(),
                "search_transactions - Filter transactions by keyword, country, value, and date; returns value statistics."
                    .to_string(),
                "top_aid_recipients - Rank receiving organisations by total transaction value."
                    .to_string(),
            ],
        }
    }
}

#[tool_router(router = tool_router_context, vis = "pub")]
impl IatiMcp {
    #[tool(description = "List the MCP commands offered by this server.")]
    async fn help(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::json(HelpCommands::default())?]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_lists_every_operation() {
        let help = HelpCommands::default();
        for name in ["get_iati_projects", "search_transactions", "top_aid_recipients"] {
            assert!(
                help.commands.iter().any(|command| command.starts_with(name)),
                "help should mention {name}"
            );
        }
    }
}
