//! Connection - one session with the chat server.
//!
//! ```text
//! connect ─▶ PASS / NICK / JOIN ─▶ read loop
//!                                   │
//!            PING ◀─────────────────┤──▶ PONG
//!            PRIVMSG ───▶ Registry ─▶ Queue ─▶ reply ─▶ Responder
//!            anything else ─▶ dropped
//! ```
//!
//! The loop handles one line to completion before reading the next. Queue
//! errors and rejected replies are handled per line; a read or write failure
//! ends the session.

mod responder;

pub use responder::{ChannelResponder, Responder, check_reply};

use crate::config::Settings;
use crate::error::{SayError, SessionError};
use crate::handlers::Registry;
use crate::metrics;
use crate::protocol::{ChatCodec, ChatEvent, Line, outbound, parse_line};
use crate::state::Queue;
use futures_util::StreamExt;
use std::time::{Duration, Instant};
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio_util::codec::FramedRead;
use tracing::{debug, info, instrument, trace, warn};

/// A session with the chat server.
pub struct Connection<R, W> {
    reader: FramedRead<R, ChatCodec>,
    responder: ChannelResponder<W>,
    settings: Settings,
    message_interval: Duration,
    started_at: Instant,
}

impl Connection<OwnedReadHalf, OwnedWriteHalf> {
    /// Open a TCP connection to the configured server.
    #[instrument(skip_all, fields(server = %settings.server, port = settings.port))]
    pub async fn connect(
        settings: &Settings,
        message_interval: Duration,
    ) -> Result<Self, SessionError> {
        let addr = settings.address();
        info!("Connecting");

        let stream = TcpStream::connect(&addr)
            .await
            .map_err(|source| SessionError::Connect {
                addr: addr.clone(),
                source,
            })?;
        let (read_half, write_half) = stream.into_split();

        info!("Connected");
        Ok(Self::from_parts(
            read_half,
            write_half,
            settings.clone(),
            message_interval,
        ))
    }
}

impl<R, W> Connection<R, W>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin + Send,
{
    /// Build a session over an already-open transport.
    pub fn from_parts(reader: R, writer: W, settings: Settings, message_interval: Duration) -> Self {
        let responder = ChannelResponder::new(writer, settings.channel.clone());
        Self {
            reader: FramedRead::new(reader, ChatCodec::new()),
            responder,
            settings,
            message_interval,
            started_at: Instant::now(),
        }
    }

    /// Time since the session was opened.
    pub fn uptime(&self) -> Duration {
        self.started_at.elapsed()
    }

    /// Log in and join the configured channel.
    pub async fn join_channel(&mut self) -> Result<(), SessionError> {
        let channel = self.settings.channel.clone();
        info!(channel = %channel, "Joining channel");

        let lines = outbound::handshake(&self.settings.password, &self.settings.name, &channel);
        for line in lines {
            self.responder
                .send_line(line)
                .await
                .map_err(SessionError::Write)?;
        }

        info!(channel = %channel, "Joined channel");
        Ok(())
    }

    /// Process lines until the transport fails.
    ///
    /// Only returns with an error: the session is over either way.
    #[instrument(skip_all, fields(channel = %self.settings.channel))]
    pub async fn run(&mut self, queue: &mut Queue, registry: &Registry) -> Result<(), SessionError> {
        info!("Watching channel");

        loop {
            let line = match self.reader.next().await {
                Some(Ok(line)) => line,
                Some(Err(e)) => return Err(SessionError::Read(e)),
                None => return Err(SessionError::Closed),
            };

            match parse_line(&line) {
                Line::Ping => {
                    debug!("Received PING, replying");
                    self.responder
                        .send_line(outbound::pong())
                        .await
                        .map_err(SessionError::Write)?;
                    continue;
                }
                Line::Chat(event) => self.handle_event(queue, registry, &event).await?,
                Line::Ignored => trace!(raw = %line, "Ignoring line"),
            }

            if !self.message_interval.is_zero() {
                tokio::time::sleep(self.message_interval).await;
            }
        }
    }

    async fn handle_event(
        &mut self,
        queue: &mut Queue,
        registry: &Registry,
        event: &ChatEvent,
    ) -> Result<(), SessionError> {
        info!(sender = %event.sender(), text = %event.text(), "Chat message");

        let reply = match registry.dispatch(queue, event) {
            Ok(Some(reply)) => reply,
            Ok(None) => return Ok(()),
            Err(e) => {
                let command = event.text().split(' ').next().unwrap_or_default();
                warn!(
                    sender = %event.sender(),
                    command = %command,
                    error = %e,
                    "Queue operation failed"
                );
                metrics::record_command_error(command, e.error_code());
                e.to_chat_reply()
            }
        };

        metrics::set_queue_length(queue.len());
        self.say(&reply).await
    }

    /// Send a reply; a rejected reply is dropped, a transport failure is fatal.
    async fn say(&mut self, text: &str) -> Result<(), SessionError> {
        match self.responder.say(text).await {
            Ok(()) => {
                metrics::record_message_sent();
                debug!(text = %text, "Sent reply");
                Ok(())
            }
            Err(SayError::Transport(e)) => Err(SessionError::Write(e)),
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "Reply rejected, dropping");
                metrics::record_message_rejected();
                Ok(())
            }
        }
    }
}
