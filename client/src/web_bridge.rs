// Connects to the game server over a WebSocket and ferries frames between it and the session via
// abstract channels. The session never touches the socket itself.

use std::debug_assert;

use crate::api;
use crate::codec;
use crate::events;
use crate::events::ConnectionEventPayload::{Connect, Disconnect, Frame};

use futures_util::SinkExt;
use futures_util::StreamExt;
use log::{debug, error, info};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tokio_tungstenite as tokio_ws2;
use tokio_ws2::tungstenite as ws2;
use unique_id::random::RandomGenerator;
use unique_id::Generator;

type ServerSocket = tokio_ws2::WebSocketStream<tokio_ws2::MaybeTlsStream<tokio::net::TcpStream>>;

// Connects to the server at `url` and logs in. The returned receiver first yields a "connect"
// event carrying the handle for outgoing frames, then every frame the server sends, and finally a
// "disconnect" event.
pub fn connect_bridge(url: String, login: api::Login) -> events::ConnectionEventReceiver {
    debug_assert!(!url.is_empty());

    let (event_tx, event_rx) = mpsc::unbounded_channel();

    // Spawn here so this function can nicely return the receiver synchronously.
    tokio::spawn(async move {
        // Guaranteed to be unique amongst all threads.
        let id = RandomGenerator::default().next_id();

        let websocket = match tokio_ws2::connect_async(url.as_str()).await {
            Ok((websocket, _response)) => websocket,
            Err(e) => {
                error!("[session {}] couldn't connect to {}: {}", id, url, e);
                let _ = event_tx.send(events::ConnectionEvent {
                    id,
                    payload: Disconnect,
                });
                return;
            }
        };
        info!("[session {}] established WebSocket connection with {}.", id, url);

        init_server_socket(websocket, id, login, event_tx);
    });

    event_rx
}

// Spawns two non-blocking tasks:
//   1) A task that logs in, then writes frames handed over by the session to the WebSocket, and
//   2) A task that passes text frames from the WebSocket on to the session.
//
// Before passing on any frames, the latter task sends a special "connect" payload that the
// session uses to send its frames to the former task.
fn init_server_socket(
    websocket: ServerSocket,
    id: events::ConnectionId,
    login: api::Login,
    event_tx: mpsc::UnboundedSender<events::ConnectionEvent>,
) {
    let (mut write, mut read) = websocket.split();
    let (frame_tx, frame_rx) = mpsc::unbounded_channel::<String>();

    tokio::spawn(async move {
        // The login frame goes out before anything the session sends.
        let login_frame = match codec::encode_login(&login) {
            Ok(frame) => frame,
            Err(e) => {
                error!("[session {}] couldn't encode login: {}", id, e);
                return;
            }
        };
        if let Err(e) = write.send(ws2::Message::text(login_frame)).await {
            error!("[session {}] failed to send login: {}", id, e);
            return;
        }
        debug!("[session {}] logged in as {:?}.", id, login.player_name);

        let frames = UnboundedReceiverStream::new(frame_rx)
            .map(|frame| Ok::<_, ws2::Error>(ws2::Message::text(frame)));
        match frames.forward(write).await {
            Ok(()) => debug!("[session {}] channel closed by the session.", id),
            Err(e) => error!("[session {}] failed to send frame to WebSocket: {}", id, e),
        }
    });

    tokio::spawn(async move {
        // Attempt to hand over the frame sender. If the session is gone, there's no one to pass
        // frames to.
        let connect = events::ConnectionEvent {
            id,
            payload: Connect(frame_tx),
        };
        if event_tx.send(connect).is_err() {
            debug!("[session {}] channel closed by the session.", id);
            return;
        }

        loop {
            let payload = match read.next().await {
                Some(Ok(ws2::Message::Text(text))) => Frame(text.as_str().to_owned()),
                Some(Ok(ws2::Message::Close(_))) | None => {
                    info!("[session {}] WebSocket connection closed by the server.", id);
                    Disconnect
                }
                Some(Ok(other)) => {
                    debug!("[session {}] ignoring non-text message: {:?}", id, other);
                    continue;
                }
                Some(Err(e)) => {
                    error!("[session {}] WebSocket error: {}", id, e);
                    Disconnect
                }
            };

            let done = matches!(payload, Disconnect);
            if event_tx.send(events::ConnectionEvent { id, payload }).is_err() {
                debug!("[session {}] channel closed by the session.", id);
                return;
            }
            if done {
                return;
            }
        }
    });
}
