//! Stdio server loop.

use std::sync::Arc;

use serde_json::Value;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinSet;

use crate::error::Result;
use crate::handler::ToolHandler;
use crate::protocol::{
    CallToolParams, INVALID_REQUEST, InitializeParams, InitializeResult, JsonRpcError,
    JsonRpcRequest, JsonRpcResponse, ListToolsResult, PARSE_ERROR, RequestId, ServerInfo,
};

/// Maximum size of one incoming message line (1MB).
pub const MAX_MESSAGE_SIZE: usize = 1024 * 1024;

/// An MCP server bound to one tool handler.
pub struct Server<H> {
    info: ServerInfo,
    handler: Arc<H>,
}

impl<H: ToolHandler> Server<H> {
    pub fn new(info: ServerInfo, handler: H) -> Self {
        Self::with_shared(info, Arc::new(handler))
    }

    /// Build a server around a handler that is also used elsewhere.
    pub fn with_shared(info: ServerInfo, handler: Arc<H>) -> Self {
        Self { info, handler }
    }

    pub fn info(&self) -> &ServerInfo {
        &self.info
    }

    /// Serve on the process's stdin/stdout until stdin closes.
    pub async fn serve_stdio(self) -> Result<()> {
        self.serve(tokio::io::stdin(), tokio::io::stdout()).await
    }

    /// Serve one session over `reader`/`writer` until `reader` hits EOF.
    ///
    /// Every request runs on its own task; responses go through a single
    /// writer task so lines never interleave. On EOF the loop waits for
    /// in-flight requests before returning.
    pub async fn serve<R, W>(self, reader: R, writer: W) -> Result<()>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::unbounded_channel();
        let writer_task = tokio::spawn(write_loop(writer, rx));

        let mut in_flight = JoinSet::new();
        let mut reader = BufReader::new(reader);
        let mut buf = Vec::new();

        let read_error = loop {
            let frame = match read_frame(&mut reader, &mut buf).await {
                Ok(frame) => frame,
                Err(e) => break Some(e),
            };

            while let Some(finished) = in_flight.try_join_next() {
                if let Err(e) = finished {
                    tracing::error!(error = %e, "request task failed");
                }
            }

            match frame {
                Frame::Eof => break None,
                Frame::Oversized(size) => {
                    tracing::warn!(size, "message too large");
                    respond(
                        &tx,
                        JsonRpcResponse::failure(
                            None,
                            JsonRpcError::new(
                                INVALID_REQUEST,
                                format!("message too large: {size} bytes (max {MAX_MESSAGE_SIZE})"),
                            ),
                        ),
                    );
                }
                Frame::Line => match std::str::from_utf8(&buf) {
                    Err(e) => {
                        tracing::warn!(error = %e, "message is not valid UTF-8");
                        respond(
                            &tx,
                            JsonRpcResponse::failure(
                                None,
                                JsonRpcError::new(PARSE_ERROR, format!("parse error: {e}")),
                            ),
                        );
                    }
                    Ok(text) => {
                        let text = text.trim();
                        if text.is_empty() {
                            continue;
                        }
                        match parse_message(text) {
                            Ok(request) => self.handle(request, &tx, &mut in_flight),
                            Err(response) => respond(&tx, response),
                        }
                    }
                },
            }
        };

        match &read_error {
            None => tracing::info!("input stream closed, draining in-flight requests"),
            Some(e) => tracing::error!(error = %e, "read failed, draining in-flight requests"),
        }
        while let Some(finished) = in_flight.join_next().await {
            if let Err(e) = finished {
                tracing::error!(error = %e, "request task failed");
            }
        }

        drop(tx);
        writer_task.await??;
        match read_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    fn handle(
        &self,
        request: JsonRpcRequest,
        tx: &UnboundedSender<String>,
        in_flight: &mut JoinSet<()>,
    ) {
        let Some(id) = request.id.clone() else {
            tracing::debug!(method = %request.method, "notification received");
            return;
        };

        match request.method.as_str() {
            "initialize" => {
                let response = match request.parse_params::<InitializeParams>() {
                    Ok(params) => {
                        tracing::info!(
                            client = params
                                .client_info
                                .as_ref()
                                .map(|c| c.name.as_str())
                                .unwrap_or("unknown"),
                            protocol_version = params.protocol_version.as_deref().unwrap_or(""),
                            "client initialized"
                        );
                        let result = InitializeResult::negotiate(&params, self.info.clone());
                        JsonRpcResponse::success(id, result)
                    }
                    Err(error) => JsonRpcResponse::failure(Some(id), error),
                };
                respond(tx, response);
            }
            "ping" => respond(
                tx,
                JsonRpcResponse::success(id, Value::Object(Default::default())),
            ),
            "tools/list" => {
                let tools = self.handler.list_tools();
                respond(tx, JsonRpcResponse::success(id, ListToolsResult { tools }));
            }
            "tools/call" => match request.parse_params::<CallToolParams>() {
                Ok(params) => {
                    let handler = Arc::clone(&self.handler);
                    let tx = tx.clone();
                    in_flight.spawn(async move {
                        let result = handler.call_tool(&params.name, params.arguments).await;
                        respond(&tx, JsonRpcResponse::success(id, result));
                    });
                }
                Err(error) => respond(tx, JsonRpcResponse::failure(Some(id), error)),
            },
            other => {
                tracing::warn!(method = other, "unsupported method");
                respond(
                    tx,
                    JsonRpcResponse::failure(Some(id), JsonRpcError::method_not_found(other)),
                );
            }
        }
    }
}

/// What one call to [`read_frame`] found.
#[derive(Debug, PartialEq, Eq)]
enum Frame {
    Eof,
    /// A complete line is in the buffer, newline included.
    Line,
    /// A line over [`MAX_MESSAGE_SIZE`] was consumed and discarded.
    Oversized(usize),
}

/// Read one newline-terminated message into `buf`.
///
/// At most `MAX_MESSAGE_SIZE` bytes are buffered; the rest of a longer
/// line is skipped up to its newline.
async fn read_frame<R>(reader: &mut R, buf: &mut Vec<u8>) -> std::io::Result<Frame>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    let mut size = 0usize;
    loop {
        let available = reader.fill_buf().await?;
        if available.is_empty() {
            break;
        }
        let (used, done) = match available.iter().position(|&b| b == b'\n') {
            Some(i) => (i + 1, true),
            None => (available.len(), false),
        };
        let room = MAX_MESSAGE_SIZE.saturating_sub(buf.len());
        buf.extend_from_slice(&available[..used.min(room)]);
        size += used;
        reader.consume(used);
        if done {
            break;
        }
    }

    Ok(match size {
        0 => Frame::Eof,
        size if size > MAX_MESSAGE_SIZE => {
            buf.clear();
            Frame::Oversized(size)
        }
        _ => Frame::Line,
    })
}

/// Parse one line into a request, or the error response to send back.
fn parse_message(text: &str) -> std::result::Result<JsonRpcRequest, JsonRpcResponse> {
    let value: Value = serde_json::from_str(text).map_err(|e| {
        JsonRpcResponse::failure(None, JsonRpcError::new(PARSE_ERROR, format!("parse error: {e}")))
    })?;

    let id = value
        .get("id")
        .and_then(|id| serde_json::from_value::<RequestId>(id.clone()).ok());

    let request: JsonRpcRequest = serde_json::from_value(value).map_err(|e| {
        JsonRpcResponse::failure(
            id.clone(),
            JsonRpcError::new(INVALID_REQUEST, format!("invalid request: {e}")),
        )
    })?;

    if request.jsonrpc != "2.0" {
        return Err(JsonRpcResponse::failure(
            id,
            JsonRpcError::new(
                INVALID_REQUEST,
                format!("unsupported jsonrpc version: {}", request.jsonrpc),
            ),
        ));
    }

    Ok(request)
}

fn respond(tx: &UnboundedSender<String>, response: JsonRpcResponse) {
    match serde_json::to_string(&response) {
        Ok(line) => {
            // The writer only goes away once the session is over.
            let _ = tx.send(line);
        }
        Err(e) => tracing::error!(error = %e, "failed to serialize response"),
    }
}

async fn write_loop<W>(mut writer: W, mut rx: UnboundedReceiver<String>) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(line) = rx.recv().await {
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
    }
    Ok(())
}
