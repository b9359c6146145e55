// Where to connect and who to connect as. Each setting is read from a
// positional argument first, then from the environment.

use std::env;

pub const DEFAULT_SERVER_URL: &str = "ws://localhost:8080";

// WebSocket URL of the game server: first argument, SCHAFKOPF_SERVER, or
// DEFAULT_SERVER_URL.
pub fn server_url() -> String {
    resolve(env::args().nth(1), env::var("SCHAFKOPF_SERVER").ok())
        .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string())
}

// Display name sent when logging in: second argument or SCHAFKOPF_NAME. When
// neither is set the player is prompted for it.
pub fn player_name() -> Option<String> {
    resolve(env::args().nth(2), env::var("SCHAFKOPF_NAME").ok())
}

// Blank values count as unset.
fn resolve(arg: Option<String>, var: Option<String>) -> Option<String> {
    [arg, var]
        .into_iter()
        .flatten()
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}
