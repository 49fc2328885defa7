//! Minimal demo client: connects, logs in, and logs what the server sends
//! until it disconnects. Mirrors the original mclib example client — a
//! fixed server/username, with the listen port as the only thing taken
//! from the command line.

use mclib_client::{Client, Credentials, ProtocolVersion};
use mclib_protocol_core::{agnostic_id, InternalPacket, ProtocolState};
use tracing::{error, info};

const SERVER: &str = "127.0.0.1";
const USERNAME: &str = "testplayer";

fn parse_port() -> u16 {
    std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(25565)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let port = parse_port();
    info!("Connecting to {}:{}", SERVER, port);

    let mut client = Client::login(
        SERVER,
        port,
        ProtocolVersion::V1_13_2,
        Credentials::offline(USERNAME),
    )
    .await?;

    info!(
        "Logged in as {} ({})",
        client.profile().name,
        client.profile().uuid
    );

    client.on(
        ProtocolState::Play,
        agnostic_id::CHAT_MESSAGE_CLIENTBOUND,
        |packet: &InternalPacket| {
            if let InternalPacket::ChatMessageClientbound { message, .. } = packet {
                info!("chat: {}", message.text);
            }
        },
    );

    client.on(
        ProtocolState::Play,
        agnostic_id::JOIN_GAME,
        |packet: &InternalPacket| {
            if let InternalPacket::JoinGame { entity_id, .. } = packet {
                info!("joined game, entity id {}", entity_id);
            }
        },
    );

    let reason = client.run().await;
    match reason {
        Ok(reason) => info!("disconnected: {}", reason),
        Err(e) => error!("connection error: {}", e),
    }

    Ok(())
}
