use anyhow::{Context, Result};
use irc_line::{connect, Message, ReadError};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let address = args
        .next()
        .unwrap_or_else(|| "irc.chat.twitch.tv:6667".to_string());
    let nick = args.next().unwrap_or_else(|| "justinfan4514".to_string());

    let mut transport = connect(&address).await?;
    info!(%address, %nick, "registering");

    transport
        .write_message(&Message::new("NICK").with_arg(nick.as_str()))
        .await
        .context("sending NICK")?;
    transport
        .write_message(&Message::new("USER").with_args([nick.as_str(), "0", "*", ":irc-line"]))
        .await
        .context("sending USER")?;

    loop {
        let msg = match transport.read_message().await {
            Ok(Some(msg)) => msg,
            Ok(None) => break,
            Err(e @ ReadError::Malformed { .. }) | Err(e @ ReadError::Encoding(_)) => {
                warn!("{}", e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        info!("{}", msg);

        if msg.command == "PING" {
            let pong = Message::new("PONG").with_args(msg.args);
            transport.write_message(&pong).await.context("sending PONG")?;
        }
    }

    info!("disconnected");
    Ok(())
}
