//! MCP Server for library-mcp
//!
//! MCP Protocol (stdio) <-> application::LibraryService
//!
//! 5 tools: add_book, borrow_book, return_book, list_books, search_books

use std::sync::{Arc, Mutex, MutexGuard};

use rmcp::{
    handler::server::{tool::ToolCallContext, tool::ToolRouter, wrapper::Parameters},
    model::{
        CallToolRequestParams, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo,
    },
    service::{RequestContext, RoleServer},
    tool, tool_router,
    transport::stdio,
    ErrorData as McpError, ServerHandler, ServiceExt,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::application::error::{AppError, ErrorKind};
use crate::application::report::Report;
use crate::application::service::LibraryService;
use crate::config::LibraryConfig;
use crate::domain::model::id::BookId;
use crate::infra::csv_store::CsvLibraryRepository;

// =============================================================================
// Public entry point
// =============================================================================

/// 蔵書ファイルを読み込み、MCP Serverを起動する。
pub async fn run(config: LibraryConfig) -> anyhow::Result<()> {
    let mut repo = CsvLibraryRepository::new(&config.data_path);
    if let Some(seed_dir) = &config.seed_dir {
        repo = repo.with_seed_dir(seed_dir);
    }
    let svc = LibraryService::open(repo)?;
    info!(path = %config.data_path.display(), books = svc.len(), "library ready");

    let server = LibraryMcpServer::new(svc);
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}

// =============================================================================
// MCP Server
// =============================================================================

#[derive(Clone)]
struct LibraryMcpServer {
    library: Arc<Mutex<LibraryService<CsvLibraryRepository>>>,
    /// 起動時に読み込んだ冊数（instructions表示用）
    loaded: usize,
    tool_router: ToolRouter<Self>,
}

impl LibraryMcpServer {
    fn new(svc: LibraryService<CsvLibraryRepository>) -> Self {
        Self {
            loaded: svc.len(),
            library: Arc::new(Mutex::new(svc)),
            tool_router: Self::tool_router(),
        }
    }

    /// Serviceのロックを取る。ツール呼び出しはここで直列化される。
    fn service(&self) -> Result<MutexGuard<'_, LibraryService<CsvLibraryRepository>>, McpError> {
        self.library
            .lock()
            .map_err(|_| McpError::internal_error("Lock poisoned", None))
    }

    /// エラー種別ごとに呼び出し側へ返すエラーを選ぶ。
    fn to_mcp_error(e: AppError) -> McpError {
        match e.kind() {
            ErrorKind::Persistence => {
                McpError::internal_error(format!("Could not save the library: {e}"), None)
            }
            ErrorKind::Validation
            | ErrorKind::NotFound
            | ErrorKind::AlreadyBorrowed
            | ErrorKind::NotBorrowed => McpError::invalid_params(format!("{e}"), None),
        }
    }
}

// =============================================================================
// ServerHandler impl
// =============================================================================

impl ServerHandler for LibraryMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_03_26,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "library-mcp".to_string(),
                title: Some("Smart Library".to_string()),
                description: Some(
                    "Personal book inventory: add, borrow, return, list and search books."
                        .to_string(),
                ),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(format!(
                "Welcome! Loaded {} books from file.\n\
                 \n\
                 Tools: `list_books` and `search_books` to find a book and its ID, \
                 `borrow_book`/`return_book` with that ID, `add_book` for new titles.",
                self.loaded
            )),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tool_router.list_all(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let tool_ctx = ToolCallContext::new(self, request, context);
        self.tool_router.call(tool_ctx).await
    }
}

// =============================================================================
// Request types
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpAddBookRequest {
    #[schemars(description = "Book title (required, no commas)")]
    pub title: String,
    #[schemars(description = "Book author (required, no commas)")]
    pub author: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpBookIdRequest {
    #[schemars(description = "Book ID from `list_books` or `search_books` output")]
    pub id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpListRequest {}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
struct McpSearchRequest {
    #[schemars(description = "Part of the title to look for (case-insensitive, empty matches all)")]
    pub term: String,
}

// =============================================================================
// Tool implementations
// =============================================================================

#[tool_router]
impl LibraryMcpServer {
    #[tool(
        name = "add_book",
        description = "Add a new book to the library. The ID is assigned automatically.",
        annotations(
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = false,
            open_world_hint = false
        )
    )]
    async fn add_book(
        &self,
        Parameters(req): Parameters<McpAddBookRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut svc = self.service()?;
        let record = svc
            .add_book(&req.title, &req.author)
            .map_err(Self::to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Success! Added '{}' to the library (ID: {}).",
            record.title(),
            record.id()
        ))]))
    }

    #[tool(
        name = "borrow_book",
        description = "Borrow a book by ID. Fails if the book is already borrowed.",
        annotations(
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = false,
            open_world_hint = false
        )
    )]
    async fn borrow_book(
        &self,
        Parameters(req): Parameters<McpBookIdRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut svc = self.service()?;
        let record = svc
            .borrow_book(BookId::new(req.id))
            .map_err(Self::to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "You have borrowed '{}'.",
            record.title()
        ))]))
    }

    #[tool(
        name = "return_book",
        description = "Return a borrowed book by ID. Fails if the book is not currently borrowed.",
        annotations(
            read_only_hint = false,
            destructive_hint = false,
            idempotent_hint = false,
            open_world_hint = false
        )
    )]
    async fn return_book(
        &self,
        Parameters(req): Parameters<McpBookIdRequest>,
    ) -> Result<CallToolResult, McpError> {
        let mut svc = self.service()?;
        let record = svc
            .return_book(BookId::new(req.id))
            .map_err(Self::to_mcp_error)?;

        Ok(CallToolResult::success(vec![Content::text(format!(
            "Thank you for returning '{}'.",
            record.title()
        ))]))
    }

    #[tool(
        name = "list_books",
        description = "Show every book with its ID and availability, in the order they were added.",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            open_world_hint = false
        )
    )]
    async fn list_books(
        &self,
        #[allow(unused_variables)] Parameters(_req): Parameters<McpListRequest>,
    ) -> Result<CallToolResult, McpError> {
        let svc = self.service()?;
        let output = Report::inventory(svc.list_all());
        Ok(CallToolResult::success(vec![Content::text(output)]))
    }

    #[tool(
        name = "search_books",
        description = "Find books whose title contains the given text (case-insensitive).",
        annotations(
            read_only_hint = true,
            destructive_hint = false,
            open_world_hint = false
        )
    )]
    async fn search_books(
        &self,
        Parameters(req): Parameters<McpSearchRequest>,
    ) -> Result<CallToolResult, McpError> {
        // 空文字列は全タイトルに一致する
        let svc = self.service()?;
        let output = Report::search_results(&svc.search(req.term.trim()));
        Ok(CallToolResult::success(vec![Content::text(output)]))
    }
}

// =============================================================================
// Tests
// =============================================================================
