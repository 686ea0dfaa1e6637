//! MCP server implementation for iati-mcp.
//!
//! This crate wires the datastore control plane into rmcp tool handlers. Tool
//! parameters are validated here, once, before any request reaches the core.

mod helpers;
mod tools;
pub mod server;

use iati_core::control::IatiControlPlane;
use rmcp::{
    ErrorData,
    ServerHandler,
    handler::server::tool::ToolRouter,
    tool,
    tool_handler,
    tool_router,
};
use rmcp::model::{CallToolResult, Content, ServerCapabilities, ServerInfo};

pub use tools::search::{GetIatiProjectsParams, SearchTransactionsParams, TopAidRecipientsParams};

const SERVER_INSTRUCTIONS: &str = r"iati-mcp answers questions about international aid using the IATI datastore
(activity/project records and their financial transactions).

Tools:
1. `get_iati_projects` - keyword search over project titles, optionally limited to one recipient
   country. Returns the total match count, the top sectors (up to 10), activity status counts,
   and a small sample of projects.
2. `search_transactions` - transactions filtered by keyword, country, value range, and date range.
   Returns the transaction count, total and average value, currency and transaction type
   breakdowns, and a small sample of transactions.
3. `top_aid_recipients` - receiving organisations ranked by total transaction value, optionally
   restricted to a country and date range.

Notes:
- Country codes are ISO 3166-1 alpha-2 (e.g. `KE`, `BD`).
- Dates are calendar dates in `YYYY-MM-DD` form; ranges cover whole days in UTC.
- `facet_limit` and `top_n` accept 1-100.
- Keywords are passed to the search engine as-is; avoid query syntax characters such as `:`, `(`, `)`.
- Values are reported in the currency recorded by each publisher; totals mix currencies.
- Use `help` for the command list. `health` returns `ok`.";

/// MCP server wrapper around the datastore control plane and tool routers.
#[derive(Clone)]
pub struct IatiMcp {
    tool_router: ToolRouter<Self>,
    control: IatiControlPlane,
}

impl IatiMcp {
    #[must_use]
    pub fn new(control: IatiControlPlane) -> Self {
        let tool_router = Self::tool_router_core()
            + Self::tool_router_search()
            + Self::tool_router_context();
        Self {
            tool_router,
            control,
        }
    }

    pub(crate) const fn control(&self) -> &IatiControlPlane {
        &self.control
    }
}

#[tool_router(router = tool_router_core, vis = "pub")]
impl IatiMcp {
    #[tool(description = "Health check. Returns 'ok'.")]
    async fn health(&self) -> Result<CallToolResult, ErrorData> {
        Ok(CallToolResult::success(vec![Content::text("ok")]))
    }
}

#[tool_handler]
impl ServerHandler for IatiMcp {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(SERVER_INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .build(),
            ..Default::default()
        }
    }
}
