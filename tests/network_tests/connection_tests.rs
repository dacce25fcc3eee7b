//! Tests for Connection
//!
//! These tests verify:
//! - The send round trip and the exact tokens that reach the server
//! - Server errors surfacing before projection
//! - Pipelining order and stream alignment after errors
//! - End-of-stream handling for closing and non-closing commands
//! - Raw line/payload helpers

#[path = "../common/mod.rs"]
mod common;

use std::thread;

use atlasresp::protocol::Reply;
use atlasresp::{cmd, ClientConfig, Connection, RespError, SharedConnection};
use bytes::Bytes;
use common::{closed_port, raw_peer, scripted, scripted_port, words, MockServer};

// =============================================================================
// Send Tests
// =============================================================================

#[test]
fn test_send_returns_reply_and_frames_tokens() {
    let (mut conn, requests) = scripted(vec!["+OK\r\n"]);

    let reply = conn.send(&cmd("SET").arg("my key").arg("a\r\nb")).unwrap();
    assert_eq!(reply, Reply::Status("OK".to_string()));

    let tokens = requests.recv().unwrap();
    assert_eq!(words(&tokens), vec!["SET", "my key", "a\r\nb"]);
}

#[test]
fn test_server_error_precedes_projection() {
    // INCR expects an integer; the error must win over the shape mismatch
    let (mut conn, _requests) = scripted(vec!["-ERR value is not an integer\r\n"]);

    match conn.incr("counter").unwrap_err() {
        RespError::Server(message) => assert_eq!(message, "ERR value is not an integer"),
        other => panic!("Expected server error, got {:?}", other),
    }
}

#[test]
fn test_server_error_text_is_verbatim() {
    let (mut conn, _requests) = scripted(vec![
        "-WRONGTYPE Operation against a key holding the wrong kind of value\r\n",
    ]);

    let err = conn.get("list").unwrap_err();
    assert_eq!(
        err.to_string(),
        "WRONGTYPE Operation against a key holding the wrong kind of value"
    );
}

#[test]
fn test_connection_usable_after_server_error() {
    let (mut conn, _requests) = scripted(vec!["-ERR nope\r\n", ":3\r\n"]);

    assert!(conn.send(&cmd("BOGUS")).is_err());
    assert_eq!(conn.incr("n").unwrap(), 3);
    assert!(!conn.is_closed());
}

#[test]
fn test_projection_mismatch() {
    let (mut conn, _requests) = scripted(vec!["+OK\r\n"]);

    assert!(matches!(
        conn.llen("k"),
        Err(RespError::ProjectionMismatch { .. })
    ));
}

// =============================================================================
// Pipelining Tests
// =============================================================================

#[test]
fn test_pipelined_queue_then_read_in_order() {
    let (mut conn, requests) = scripted(vec![":1\r\n", ":2\r\n", "$1\r\n2\r\n"]);
    conn.set_pipelining(true);
    assert!(conn.is_pipelining());

    conn.queue(&cmd("INCR").arg("a")).unwrap();
    conn.queue(&cmd("INCR").arg("a")).unwrap();
    conn.queue(&cmd("GET").arg("a")).unwrap();
    conn.flush().unwrap();

    let replies = conn.read_replies(3).unwrap();
    assert_eq!(
        replies,
        vec![
            Reply::Integer(1),
            Reply::Integer(2),
            Reply::Bulk(Some(Bytes::from_static(b"2"))),
        ]
    );

    let received: Vec<Vec<String>> = requests.try_iter().map(|t| words(&t)).collect();
    assert_eq!(
        received,
        vec![vec!["INCR", "a"], vec!["INCR", "a"], vec!["GET", "a"]]
    );
}

#[test]
fn test_read_replies_with_oversized_count() {
    let (mut conn, _requests) = scripted(vec![":1\r\n"]);

    conn.queue(&cmd("INCR").arg("a")).unwrap();
    // One reply arrives, then the peer hangs up
    assert!(matches!(
        conn.read_replies(usize::MAX),
        Err(RespError::ConnectionClosed)
    ));
}

#[test]
fn test_pipeline_error_keeps_stream_aligned() {
    let (mut conn, _requests) = scripted(vec![
        "+OK\r\n",
        "-ERR syntax error\r\n",
        ":5\r\n",
        "+PONG\r\n",
    ]);

    let commands = vec![cmd("SET").arg("k").arg("v"), cmd("BAD"), cmd("INCR").arg("n")];
    match conn.pipeline(&commands).unwrap_err() {
        RespError::Server(message) => assert_eq!(message, "ERR syntax error"),
        other => panic!("Expected server error, got {:?}", other),
    }

    // All three replies were consumed, so the next one belongs to PING
    conn.ping().unwrap();
}

#[test]
fn test_read_before_explicit_flush_does_not_hang() {
    let (mut conn, _requests) = scripted(vec!["+PONG\r\n"]);
    conn.set_pipelining(true);

    conn.queue(&cmd("PING")).unwrap();
    assert_eq!(conn.read_reply().unwrap(), Reply::Status("PONG".to_string()));
}

#[test]
fn test_send_in_pipelining_mode() {
    let (mut conn, _requests) = scripted(vec!["$-1\r\n"]);
    conn.set_pipelining(true);

    assert_eq!(conn.get("missing").unwrap(), None);
}

// =============================================================================
// End-of-Stream Tests
// =============================================================================

#[test]
fn test_unexpected_eof_is_connection_closed() {
    // Peer closes after reading the request without answering
    let (mut conn, _requests) = scripted(vec![""]);

    assert!(matches!(conn.get("k"), Err(RespError::ConnectionClosed)));
    assert!(conn.is_closed());
    // A broken connection is not reused
    assert!(matches!(conn.ping(), Err(RespError::ConnectionClosed)));
}

#[test]
fn test_shutdown_accepts_eof() {
    let (mut conn, requests) = scripted(vec![""]);

    conn.shutdown().unwrap();
    assert!(conn.is_closed());
    assert_eq!(words(&requests.recv().unwrap()), vec!["SHUTDOWN"]);
}

#[test]
fn test_shutdown_refused_keeps_connection() {
    let (mut conn, _requests) = scripted(vec![
        "-ERR Errors trying to SHUTDOWN\r\n",
        "+PONG\r\n",
    ]);

    assert!(matches!(conn.shutdown(), Err(RespError::Server(_))));
    assert!(!conn.is_closed());
    conn.ping().unwrap();
}

#[test]
fn test_quit_accepts_ok_then_closes() {
    let (mut conn, _requests) = scripted(vec!["+OK\r\n"]);

    conn.quit().unwrap();
    assert!(conn.is_closed());
    assert!(matches!(conn.get("k"), Err(RespError::ConnectionClosed)));
}

#[test]
fn test_close_flushes_pending_pipelined_output() {
    let (mut conn, requests) = scripted(vec!["+OK\r\n"]);
    conn.set_pipelining(true);

    conn.queue(&cmd("SET").arg("k").arg("v")).unwrap();
    conn.close().unwrap();

    assert_eq!(words(&requests.recv().unwrap()), vec!["SET", "k", "v"]);
}

#[test]
fn test_close_after_quit_is_ok() {
    let (mut conn, _requests) = scripted(vec!["+OK\r\n"]);

    conn.quit().unwrap();
    conn.close().unwrap();
}

#[test]
fn test_protocol_error_marks_connection_broken() {
    let (mut conn, _requests) = scripted(vec!["?what\r\n"]);

    assert!(matches!(conn.get("k"), Err(RespError::Protocol(_))));
    assert!(conn.is_closed());
}

// =============================================================================
// Raw I/O Tests
// =============================================================================

#[test]
fn test_read_line_and_read_exact() {
    let mut conn = raw_peer(b"+hello\r\n$5\r\na\r\nbc\r\n");

    assert_eq!(conn.read_line().unwrap(), b"+hello");
    assert_eq!(conn.read_line().unwrap(), b"$5");
    assert_eq!(conn.read_exact(5).unwrap(), b"a\r\nbc");
}

#[test]
fn test_write_token_builds_a_request() {
    let (mut conn, requests) = scripted(vec!["+PONG\r\n"]);

    conn.write_token(b"*1").unwrap();
    conn.write_token(b"$4").unwrap();
    conn.write_token(b"PING").unwrap();
    conn.flush().unwrap();

    assert_eq!(conn.read_reply().unwrap(), Reply::Status("PONG".to_string()));
    assert_eq!(words(&requests.recv().unwrap()), vec!["PING"]);
}

// =============================================================================
// Setup Tests
// =============================================================================

#[test]
fn test_connect_refused() {
    let err = Connection::connect("127.0.0.1", closed_port()).unwrap_err();
    assert!(matches!(err, RespError::Connection(_)));
    assert!(err.is_connection_error());
}

#[test]
fn test_debug_shows_state_not_buffers() {
    let (mut conn, _requests) = scripted(vec!["+OK\r\n"]);
    conn.set_pipelining(true);

    let rendered = format!("{:?}", conn);
    assert!(rendered.starts_with("Connection {"));
    assert!(rendered.contains(&format!("peer_addr: {:?}", conn.peer_addr())));
    assert!(rendered.contains("pipelining: true"));
    assert!(rendered.contains("closed: false"));
    assert!(!rendered.contains("reader"));
}

#[test]
fn test_open_sends_auth_and_select() {
    let (port, requests) = scripted_port(vec!["+OK\r\n", "+OK\r\n"]);
    let config = ClientConfig::builder()
        .port(port)
        .password("secret")
        .database(2)
        .pipelining(true)
        .build();

    let conn = Connection::open(&config).unwrap();
    assert!(conn.is_pipelining());

    assert_eq!(words(&requests.recv().unwrap()), vec!["AUTH", "secret"]);
    assert_eq!(words(&requests.recv().unwrap()), vec!["SELECT", "2"]);
}

#[test]
fn test_open_fails_on_bad_password() {
    let (port, _requests) = scripted_port(vec!["-ERR invalid password\r\n"]);
    let config = ClientConfig::builder().port(port).password("wrong").build();

    assert!(matches!(
        Connection::open(&config),
        Err(RespError::Server(_))
    ));
}

// =============================================================================
// Shared Connection Tests
// =============================================================================

#[test]
fn test_shared_connection_across_threads() {
    let server = MockServer::start();
    let shared = SharedConnection::new(server.connect());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..25 {
                    shared.with(|conn| conn.incr("hits")).unwrap();
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let value = shared.with(|conn| conn.get("hits")).unwrap();
    assert_eq!(value, Some(Bytes::from_static(b"100")));
}

#[test]
fn test_shared_pipeline() {
    let server = MockServer::start();
    let shared = SharedConnection::new(server.connect());
    assert_eq!(shared.peer_addr(), format!("127.0.0.1:{}", server.port));

    let replies = shared
        .pipeline(&[cmd("SET").arg("a").arg("1"), cmd("GET").arg("a")])
        .unwrap();
    assert_eq!(
        replies,
        vec![
            Reply::Status("OK".to_string()),
            Reply::Bulk(Some(Bytes::from_static(b"1"))),
        ]
    );
    assert_eq!(
        shared.send(&cmd("EXISTS").arg("a")).unwrap(),
        Reply::Integer(1)
    );
}
