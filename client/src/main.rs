// Connects to a table and plays from the terminal: snapshots are printed as they arrive and a
// choice is made by typing its number.
// Try: RUST_LOG=info schafkopf-client ws://127.0.0.1:8080 Sepp

use futures_util::StreamExt;
use log::{error, info};
use tokio_util::codec::{FramedRead, LinesCodec};

use schafkopf_client::api;
use schafkopf_client::config;
use schafkopf_client::render::TextRenderer;
use schafkopf_client::session::Session;
use schafkopf_client::web_bridge;

#[tokio::main]
async fn main() {
    env_logger::init();

    let mut input = FramedRead::new(tokio::io::stdin(), LinesCodec::new());

    let server_url = config::server_url();
    let player_name = match config::player_name() {
        Some(name) => name,
        None => {
            println!("Name:");
            let Some(Ok(name)) = input.next().await else {
                error!("No player name given.");
                return;
            };
            name.trim().to_string()
        }
    };

    info!("Joining {} as {}.", server_url, player_name);
    let event_rx = web_bridge::connect_bridge(server_url, api::Login { player_name });

    let mut session = Session::new(TextRenderer::stdout());
    session.run_main_loop(event_rx, input).await;
}
