// Types used to communicate between the WebSocket bridge and the session. Stored in their own
// module to separate them conceptually from the bridge that ferries frames to and from the server.

use tokio::sync::mpsc;

// Unique ID used to tell connections apart in the logs.
pub type ConnectionId = u128;

// What happened on the connection.
pub enum ConnectionEventPayload {
    // Logged in. Outgoing frames are written to the server through the sender.
    Connect(FrameSender),

    // A text frame sent by the server.
    Frame(String),

    // The connection is gone, or never came up.
    Disconnect,
}

// The data sent from the bridge to the session.
pub struct ConnectionEvent {
    pub id: ConnectionId,
    pub payload: ConnectionEventPayload,
}

// An async iterator over the events of one connection.
pub type ConnectionEventReceiver = mpsc::UnboundedReceiver<ConnectionEvent>;

// An async transmitter used to send encoded frames to the server.
pub type FrameSender = mpsc::UnboundedSender<String>;
