use futures_util::StreamExt;
use tokio::io::AsyncWriteExt;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::{TcpStream, ToSocketAddrs};
use tokio::time::{timeout, Duration};
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};

use crate::core::config::DEFAULT_MAX_LINE_LEN;
use crate::transport::Transport;

/// Default timeout for a single write (30 seconds).
const DEFAULT_WRITE_TIMEOUT: Duration = Duration::from_secs(30);

/// Newline-framed text over a TCP stream.
pub struct TcpTransport {
    lines: FramedRead<OwnedReadHalf, LinesCodec>,
    writer: OwnedWriteHalf,
    write_timeout: Duration,
}

impl TcpTransport {
    pub fn new(stream: TcpStream) -> Self {
        Self::with_config(stream, DEFAULT_MAX_LINE_LEN, DEFAULT_WRITE_TIMEOUT)
    }

    pub fn with_config(stream: TcpStream, max_line_len: usize, write_timeout: Duration) -> Self {
        let (reader, writer) = stream.into_split();
        Self {
            lines: FramedRead::new(reader, LinesCodec::new_with_max_length(max_line_len)),
            writer,
            write_timeout,
        }
    }

    pub async fn connect<A: ToSocketAddrs>(addr: A) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        Ok(Self::new(stream))
    }
}

fn map_io_error(e: std::io::Error) -> anyhow::Error {
    match e.kind() {
        std::io::ErrorKind::BrokenPipe | std::io::ErrorKind::ConnectionReset => {
            anyhow::anyhow!("Connection closed by peer")
        }
        _ => anyhow::anyhow!("I/O error: {}", e),
    }
}

#[async_trait::async_trait]
impl Transport for TcpTransport {
    async fn send(&mut self, line: &str) -> anyhow::Result<()> {
        let write_op = async {
            let mut buf = Vec::with_capacity(line.len() + 1);
            buf.extend_from_slice(line.as_bytes());
            buf.push(b'\n');
            self.writer.write_all(&buf).await.map_err(map_io_error)?;
            self.writer.flush().await.map_err(map_io_error)?;
            anyhow::Ok(())
        };
        timeout(self.write_timeout, write_op)
            .await
            .map_err(|_| anyhow::anyhow!("Send timeout after {:?}", self.write_timeout))?
    }

    async fn recv(&mut self) -> anyhow::Result<Option<String>> {
        // `FramedRead` is cancellation safe and strips "\n" / "\r\n". The codec
        // gives up as soon as a line outgrows the limit, before buffering more.
        match self.lines.next().await {
            None => Ok(None),
            Some(Ok(line)) => Ok(Some(line)),
            Some(Err(LinesCodecError::MaxLineLengthExceeded)) => {
                anyhow::bail!("Line too long (max: {} bytes)", self.lines.decoder().max_length())
            }
            Some(Err(LinesCodecError::Io(e))) => Err(map_io_error(e)),
        }
    }
}
