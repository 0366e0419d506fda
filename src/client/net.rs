use crate::protocol::{ClientMessage, ServerMessage};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;

/// Typed handle over one relay connection. A background task owns the
/// socket and shuttles JSON frames to and from the channel pair; frames
/// that fail to decode are dropped.
pub struct Connection {
    outbound_tx: UnboundedSender<ClientMessage>,
    inbound_rx: UnboundedReceiver<ServerMessage>,
}

impl Connection {
    pub async fn open(url: &str) -> anyhow::Result<Self> {
        let (ws_stream, _) = connect_async(url).await?;
        let (mut ws_sender, mut ws_receiver) = ws_stream.split();
        let (outbound_tx, mut outbound_rx) = unbounded_channel::<ClientMessage>();
        let (inbound_tx, inbound_rx) = unbounded_channel::<ServerMessage>();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    outbound = outbound_rx.recv() => {
                        let Some(message) = outbound else { break };
                        let Ok(payload) = serde_json::to_string(&message) else { continue };
                        if ws_sender.send(Message::Text(payload)).await.is_err() {
                            break;
                        }
                    }
                    inbound = ws_receiver.next() => {
                        match inbound {
                            Some(Ok(Message::Text(text))) => {
                                if let Ok(message) = serde_json::from_str::<ServerMessage>(&text) {
                                    let _ = inbound_tx.send(message);
                                }
                            }
                            Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                            _ => {}
                        }
                    }
                }
            }
        });

        Ok(Self {
            outbound_tx,
            inbound_rx,
        })
    }

    pub fn send(&self, message: ClientMessage) {
        let _ = self.outbound_tx.send(message);
    }

    pub fn try_recv(&mut self) -> Option<ServerMessage> {
        self.inbound_rx.try_recv().ok()
    }

    pub async fn recv(&mut self) -> Option<ServerMessage> {
        self.inbound_rx.recv().await
    }

    pub fn is_closed(&self) -> bool {
        self.outbound_tx.is_closed()
    }
}
