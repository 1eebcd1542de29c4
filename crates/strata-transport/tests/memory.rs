//! Integration tests for the in-memory transport.

use strata_transport::{Connection, MemoryConnection, TransportError};

#[tokio::test]
async fn test_memory_pair_send_receive() {
    let (a, b) = MemoryConnection::pair();
    assert_ne!(a.id(), b.id());

    a.send(&[0x0e, 0x17]).await.unwrap();
    a.send(&[0xa7, 0x01]).await.unwrap();
    b.send(b"pong").await.unwrap();

    assert_eq!(b.recv().await.unwrap(), Some(vec![0x0e, 0x17]));
    assert_eq!(b.recv().await.unwrap(), Some(vec![0xa7, 0x01]));
    assert_eq!(a.recv().await.unwrap(), Some(b"pong".to_vec()));
}

#[tokio::test]
async fn test_memory_close_ends_peer_stream() {
    let (a, b) = MemoryConnection::pair();
    a.send(b"last").await.unwrap();
    a.close().await.unwrap();

    // Messages sent before the close are still delivered.
    assert_eq!(b.recv().await.unwrap(), Some(b"last".to_vec()));
    assert_eq!(b.recv().await.unwrap(), None);
}

#[tokio::test]
async fn test_memory_send_after_close_fails() {
    let (a, _b) = MemoryConnection::pair();
    a.close().await.unwrap();
    let err = a.send(b"late").await.unwrap_err();
    assert!(matches!(err, TransportError::ConnectionClosed(id) if id == a.id()));
}

#[tokio::test]
async fn test_memory_send_to_dropped_peer_fails() {
    let (a, b) = MemoryConnection::pair();
    drop(b);
    assert!(a.send(b"anyone?").await.is_err());
    assert_eq!(a.recv().await.unwrap(), None);
}

#[tokio::test]
async fn test_memory_recv_across_tasks() {
    let (a, b) = MemoryConnection::pair();
    let reader = tokio::spawn(async move {
        let mut got = Vec::new();
        while let Some(buf) = b.recv().await.unwrap() {
            got.push(buf);
        }
        got
    });
    for i in 0..5u8 {
        a.send(&[i]).await.unwrap();
    }
    a.close().await.unwrap();
    let got = reader.await.unwrap();
    assert_eq!(got, (0..5u8).map(|i| vec![i]).collect::<Vec<_>>());
}
