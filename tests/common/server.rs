//! Fake chat server.
//!
//! Listens on an ephemeral port, accepts the bot's connection and lets a test
//! script inbound lines and assert on what the bot writes back.

use qbot::bot::Bot;
use qbot::config::Config;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::timeout;

pub const CHANNEL: &str = "chan";
pub const OWNER: &str = "streamer";

/// Config pointing at a local port, with no pacing delays.
pub fn test_config(port: u16) -> Config {
    let content = format!(
        r#"
[bot]
name = "{OWNER}"
channel = "{CHANNEL}"
password = "oauth:test"
server = "127.0.0.1"
port = {port}

[queue]
max_size = 100

[timing]
message_interval_ms = 0
reconnect_delay_ms = 50
"#
    );
    Config::parse(&content).expect("test config parses")
}

/// A listening fake server.
pub struct FakeChatServer {
    listener: TcpListener,
}

impl FakeChatServer {
    pub async fn bind() -> anyhow::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        Ok(Self { listener })
    }

    pub fn port(&self) -> u16 {
        self.listener
            .local_addr()
            .expect("listener has an address")
            .port()
    }

    /// Wait for the bot to connect.
    pub async fn accept(&self) -> anyhow::Result<BotPeer> {
        let (stream, _) = timeout(Duration::from_secs(5), self.listener.accept()).await??;
        let (read_half, write_half) = stream.into_split();
        Ok(BotPeer {
            reader: BufReader::new(read_half),
            writer: write_half,
        })
    }

    /// Accept the bot and consume its registration lines.
    pub async fn accept_registered(&self) -> anyhow::Result<BotPeer> {
        let mut peer = self.accept().await?;
        let handshake = peer.recv_n(3).await?;
        anyhow::ensure!(
            handshake
                == [
                    "PASS oauth:test".to_string(),
                    format!("NICK {OWNER}"),
                    format!("JOIN #{CHANNEL}"),
                ],
            "unexpected handshake: {handshake:?}"
        );
        Ok(peer)
    }
}

/// The server side of the bot's connection.
pub struct BotPeer {
    reader: BufReader<OwnedReadHalf>,
    writer: OwnedWriteHalf,
}

impl BotPeer {
    /// Send a raw line to the bot.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.send_bytes(line.as_bytes()).await
    }

    /// Send a line that need not be valid UTF-8.
    pub async fn send_bytes(&mut self, line: &[u8]) -> anyhow::Result<()> {
        self.writer.write_all(line).await?;
        self.writer.write_all(b"\r\n").await?;
        self.writer.flush().await?;
        Ok(())
    }

    /// Deliver a channel message from `sender`.
    pub async fn chat(&mut self, sender: &str, text: &str) -> anyhow::Result<()> {
        let line =
            format!(":{sender}!{sender}@{sender}.tmi.twitch.tv PRIVMSG #{CHANNEL} :{text}");
        self.send_raw(&line).await
    }

    /// Receive one line written by the bot, without its terminator.
    pub async fn recv(&mut self) -> anyhow::Result<String> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<String> {
        let mut line = String::new();
        let n = timeout(dur, self.reader.read_line(&mut line)).await??;
        anyhow::ensure!(n > 0, "bot closed the connection");
        anyhow::ensure!(line.ends_with("\r\n"), "line not CRLF terminated: {line:?}");
        line.truncate(line.len() - 2);
        Ok(line)
    }

    pub async fn recv_n(&mut self, n: usize) -> anyhow::Result<Vec<String>> {
        let mut lines = Vec::with_capacity(n);
        for _ in 0..n {
            lines.push(self.recv().await?);
        }
        Ok(lines)
    }

    /// Receive the next channel reply body.
    pub async fn recv_reply(&mut self) -> anyhow::Result<String> {
        let line = self.recv().await?;
        let prefix = format!("PRIVMSG #{CHANNEL} :");
        line.strip_prefix(&prefix)
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("expected channel reply, got {line:?}"))
    }

    /// Assert the bot writes nothing for `dur`.
    pub async fn expect_silence(&mut self, dur: Duration) -> anyhow::Result<()> {
        match self.recv_timeout(dur).await {
            Ok(line) => anyhow::bail!("expected silence, got {line:?}"),
            Err(_) => Ok(()),
        }
    }
}

/// A bot running in the background against a fake server.
pub struct RunningBot {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<Bot>,
}

impl RunningBot {
    /// Stop the bot and hand it back for inspection.
    pub async fn stop(self) -> anyhow::Result<Bot> {
        let _ = self.shutdown.send(());
        Ok(timeout(Duration::from_secs(5), self.task).await??)
    }
}

pub fn spawn_bot(config: Config) -> RunningBot {
    let (shutdown, rx) = oneshot::channel::<()>();
    let task = tokio::spawn(async move {
        let mut bot = Bot::new(config);
        bot.run(async {
            let _ = rx.await;
        })
        .await;
        bot
    });
    RunningBot { shutdown, task }
}
