//! Outbound replies to the channel.

use crate::error::SayError;
use crate::protocol::{ChatCodec, CodecError, MAX_MESSAGE_BYTES, outbound};
use async_trait::async_trait;
use futures_util::SinkExt;
use tokio::io::AsyncWrite;
use tokio_util::codec::FramedWrite;

/// Sends formatted text back to the chat channel.
#[async_trait]
pub trait Responder: Send {
    async fn say(&mut self, text: &str) -> Result<(), SayError>;
}

/// Boundary check applied to every reply before it is written.
pub fn check_reply(text: &str) -> Result<(), SayError> {
    if text.is_empty() {
        return Err(SayError::EmptyMessage);
    }
    if text.len() > MAX_MESSAGE_BYTES {
        return Err(SayError::MessageTooLong {
            len: text.len(),
            limit: MAX_MESSAGE_BYTES,
        });
    }
    Ok(())
}

/// Writes lines to the server and replies to one channel.
pub struct ChannelResponder<W> {
    writer: FramedWrite<W, ChatCodec>,
    channel: String,
}

impl<W> ChannelResponder<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(writer: W, channel: impl Into<String>) -> Self {
        Self {
            writer: FramedWrite::new(writer, ChatCodec::new()),
            channel: channel.into(),
        }
    }

    /// Write one raw protocol line.
    pub async fn send_line(&mut self, line: String) -> Result<(), CodecError> {
        self.writer.send(line).await
    }

    pub fn get_ref(&self) -> &W {
        self.writer.get_ref()
    }
}

#[async_trait]
impl<W> Responder for ChannelResponder<W>
where
    W: AsyncWrite + Unpin + Send,
{
    async fn say(&mut self, text: &str) -> Result<(), SayError> {
        check_reply(text)?;
        let line = outbound::privmsg(&self.channel, text);
        self.send_line(line).await?;
        Ok(())
    }
}
