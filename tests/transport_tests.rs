#![cfg(feature = "std")]

use tetroship::{InMemoryTransport, TcpTransport, Transport};
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpStream};
use tokio::time::Duration;

#[tokio::test]
async fn in_memory_lines_and_close() -> anyhow::Result<()> {
    let (mut a, mut b) = InMemoryTransport::pair();
    a.send("B 10 10").await?;
    b.send("A").await?;
    assert_eq!(b.recv().await?.as_deref(), Some("B 10 10"));
    assert_eq!(a.recv().await?.as_deref(), Some("A"));

    a.send("F").await?;
    a.close();
    assert!(a.send("Q").await.is_err());
    assert_eq!(b.recv().await?.as_deref(), Some("F"));
    assert_eq!(b.recv().await?, None);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn tcp_strips_line_endings() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let client = tokio::spawn(async move {
        let mut raw = TcpStream::connect(addr).await?;
        raw.write_all(b"B 10 10\r\nS 1 2\nQ").await?;
        raw.shutdown().await?;
        anyhow::Ok(())
    });

    let (socket, _) = listener.accept().await?;
    let mut transport = TcpTransport::new(socket);
    assert_eq!(transport.recv().await?.as_deref(), Some("B 10 10"));
    assert_eq!(transport.recv().await?.as_deref(), Some("S 1 2"));
    // A final unterminated line is still delivered before end of stream.
    assert_eq!(transport.recv().await?.as_deref(), Some("Q"));
    assert_eq!(transport.recv().await?, None);
    client.await??;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn tcp_rejects_overlong_lines() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    let client = tokio::spawn(async move {
        let mut transport = TcpTransport::connect(addr).await?;
        transport.send(&"9".repeat(100)).await?;
        anyhow::Ok(())
    });

    let (socket, _) = listener.accept().await?;
    let mut transport = TcpTransport::with_config(socket, 16, Duration::from_secs(1));
    assert!(transport.recv().await.is_err());
    client.await??;
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn tcp_rejects_unterminated_flood_before_newline() -> anyhow::Result<()> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (done_tx, done_rx) = tokio::sync::oneshot::channel::<()>();

    // Keep the socket open so only the length limit can end the read.
    let client = tokio::spawn(async move {
        let mut raw = TcpStream::connect(addr).await?;
        raw.write_all(&[b'x'; 64 * 1024]).await?;
        let _ = done_rx.await;
        anyhow::Ok(())
    });

    let (socket, _) = listener.accept().await?;
    let mut transport = TcpTransport::with_config(socket, 16, Duration::from_secs(1));
    let result = tokio::time::timeout(Duration::from_secs(5), transport.recv()).await?;
    assert!(result.is_err());
    drop(transport);
    let _ = done_tx.send(());
    client.await??;
    Ok(())
}
