//! Line transports. A line is one protocol message without its terminator.

#[async_trait::async_trait]
pub trait Transport: Send {
    /// Write one line; the transport appends the newline.
    async fn send(&mut self, line: &str) -> anyhow::Result<()>;

    /// Read the next line. `Ok(None)` means the peer closed the stream.
    ///
    /// Implementations must be cancellation safe: dropping the future before
    /// it completes must not lose a partially received line.
    async fn recv(&mut self) -> anyhow::Result<Option<String>>;
}

pub mod in_memory;
pub mod tcp;
