// The top-level instance of a table session. Turns server frames into view models and user
// selections into frames for the server, one at a time and in the order they arrive.

use crate::actions;
use crate::actions::SelectionError;
use crate::codec;
use crate::codec::DecodeError;
use crate::events;
use crate::events::ConnectionEventPayload::{Connect, Disconnect, Frame};
use crate::render::Renderer;
use crate::view::{reconcile, ViewModel};

use futures_util::{Stream, StreamExt};
use log::{debug, error, info, warn};
use std::fmt::Display;

pub struct Session<R: Renderer> {
    renderer: R,

    // The only view state. Replaced wholesale by each snapshot and left untouched by frames that
    // fail to decode.
    view: Option<ViewModel>,

    // Handle for outgoing frames, once logged in.
    frame_tx: Option<events::FrameSender>,
}

impl<R: Renderer> Session<R> {
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            view: None,
            frame_tx: None,
        }
    }

    pub fn view(&self) -> Option<&ViewModel> {
        self.view.as_ref()
    }

    // Reconciles one inbound frame and draws the result. On error the previous view model stays
    // in place.
    pub fn handle_frame(&mut self, frame: &[u8]) -> Result<&ViewModel, DecodeError> {
        let snapshot = codec::decode(frame)?;
        let view = reconcile(self.view.as_ref(), &snapshot);

        if let Err(e) = self.renderer.render(&view) {
            warn!("Failed to render view: {}", e);
        }

        Ok(&*self.view.insert(view))
    }

    // Turns a line of user input into an encoded intent. Stale choices aren't detected here: the
    // server ignores or rejects them.
    pub fn handle_selection(&self, line: &str) -> Result<String, SelectionError> {
        let number = actions::parse_selection(line)?;
        let Some(view) = &self.view else {
            return Err(SelectionError::NoSuchChoice {
                number,
                available: 0,
            });
        };

        let choice = actions::choice(view, number)?;
        debug!("Selected {:?}.", choice.label);
        Ok(codec::encode(&actions::select(choice.payload)))
    }

    pub async fn run_main_loop<I, E>(
        &mut self,
        mut event_rx: events::ConnectionEventReceiver,
        mut input: I,
    ) where
        I: Stream<Item = Result<String, E>> + Unpin,
        E: Display,
    {
        loop {
            tokio::select! {
                event = event_rx.recv() => {
                    let Some(event) = event else {
                        info!("Connection dropped - exiting.");
                        return;
                    };

                    match event {
                        // Logged in; frames can be sent from now on.
                        events::ConnectionEvent { id, payload: Connect(tx) } => {
                            self.frame_tx = Some(tx);
                            info!("[session {}] connected to server.", id);
                        }

                        events::ConnectionEvent { id, payload: Frame(frame) } => {
                            if let Err(e) = self.handle_frame(frame.as_bytes()) {
                                error!("[session {}] dropped frame: {}", id, e);
                            }
                        }

                        events::ConnectionEvent { id, payload: Disconnect } => {
                            info!("[session {}] disconnected - exiting.", id);
                            return;
                        }
                    }
                }

                line = input.next() => {
                    match line {
                        Some(Ok(line)) if line.trim().is_empty() => {}
                        Some(Ok(line)) => self.dispatch(&line),
                        Some(Err(e)) => warn!("Couldn't read input: {}", e),
                        None => {
                            info!("Input closed - exiting.");
                            return;
                        }
                    }
                }
            }
        }
    }

    fn dispatch(&self, line: &str) {
        let frame = match self.handle_selection(line) {
            Ok(frame) => frame,
            Err(e) => {
                warn!("{}", e);
                return;
            }
        };

        let Some(tx) = &self.frame_tx else {
            warn!("Not connected yet - selection dropped.");
            return;
        };
        if tx.send(frame).is_err() {
            error!("Channel to the server closed - selection dropped.");
        }
    }
}
