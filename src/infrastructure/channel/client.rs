//! WebSocket side of the sync channel (client)

use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::{self, Message};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use crate::error::SchemaSyncResult;

pub type ClientStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Connected client yielding whole-schema payloads
pub struct SyncClient {
    stream: ClientStream,
}

impl SyncClient {
    pub async fn connect(url: &str) -> SchemaSyncResult<Self> {
        let (stream, _response) = tokio_tungstenite::connect_async(url).await?;
        Ok(Self { stream })
    }

    /// Wait for the next payload. `Ok(None)` means the server closed the
    /// connection. Cancel safe.
    pub async fn next_payload(&mut self) -> SchemaSyncResult<Option<Vec<u8>>> {
        loop {
            match self.stream.next().await {
                Some(Ok(Message::Binary(data))) => return Ok(Some(data.to_vec())),
                Some(Ok(Message::Text(text))) => {
                    return Ok(Some(text.as_str().as_bytes().to_vec()))
                }
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Ok(_)) => continue,
                Some(Err(tungstenite::Error::ConnectionClosed))
                | Some(Err(tungstenite::Error::AlreadyClosed)) => return Ok(None),
                Some(Err(e)) => return Err(e.into()),
            }
        }
    }

    /// Send a close frame and flush
    pub async fn close(mut self) {
        if let Err(e) = self.stream.send(Message::Close(None)).await {
            tracing::debug!(error = %e, "error closing websocket");
        }
    }
}
