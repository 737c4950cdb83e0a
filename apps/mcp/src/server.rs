//! Newline-delimited JSON-RPC dispatch over stdio.

use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, info};
use yt_transcript_core::TranscriptSource;

use crate::{
    protocol::{
        InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ToolCallParams,
        ToolCallResult, ToolsListResult,
    },
    tools::{self, GetTranscriptArgs},
};

pub struct McpServer<S> {
    source: S,
}

impl<S: TranscriptSource> McpServer<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    /// Serve requests from stdin until EOF. One JSON object per line in, one
    /// per line out; stdout carries nothing else.
    pub async fn run(&self) -> anyhow::Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        let mut lines = stdin.lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(response) = self.handle_message(&line).await {
                stdout.write_all(response.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    /// Handle one raw message. `None` means nothing is written back
    /// (notifications).
    pub async fn handle_message(&self, raw: &str) -> Option<String> {
        let response = match serde_json::from_str::<JsonRpcRequest>(raw) {
            Ok(request) => self.dispatch(request).await?,
            Err(e) => {
                JsonRpcResponse::failure(Value::Null, JsonRpcError::parse_error(e.to_string()))
            }
        };
        serde_json::to_string(&response).ok()
    }

    async fn dispatch(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!(method = %request.method, "request");

        // Requests without an id are notifications and get no response.
        let id = request.id?;

        let result = match request.method.as_str() {
            "initialize" => Ok(json!(InitializeResult::new())),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!(ToolsListResult {
                tools: tools::definitions(),
            })),
            "tools/call" => self.call_tool(request.params).await.map(|r| json!(r)),
            other => Err(JsonRpcError::method_not_found(other)),
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    async fn call_tool(
        &self,
        params: Option<Value>,
    ) -> std::result::Result<ToolCallResult, JsonRpcError> {
        let params = params.ok_or_else(|| JsonRpcError::invalid_params("missing params"))?;
        let call: ToolCallParams =
            serde_json::from_value(params).map_err(|e| JsonRpcError::invalid_params(e.to_string()))?;

        match call.name.as_str() {
            tools::GET_TRANSCRIPT => {
                let args: GetTranscriptArgs = serde_json::from_value(call.arguments)
                    .map_err(|e| JsonRpcError::invalid_params(e.to_string()))?;
                info!(url = %args.url, lang = %args.lang, "tool call");
                let text = tools::get_transcript(&self.source, &args).await;
                Ok(ToolCallResult::text(text))
            }
            other => Err(JsonRpcError::invalid_params(format!(
                "Unknown tool: {other}"
            ))),
        }
    }
}
