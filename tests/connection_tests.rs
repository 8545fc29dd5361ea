//! Tests for Connection
//!
//! These tests verify:
//! - Greeting handshake over scripted and real sockets
//! - The not-connected guard
//! - Close idempotence and terminal state
//! - Transport failures surfacing as connection errors

mod common;

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;
use std::time::{Duration, Instant};

use common::{sent, test_config, BrokenStream, ScriptedStream};
use jrpc::{Config, Connection, ConnectionState, JrpcError};

// =============================================================================
// Handshake Tests
// =============================================================================

#[test]
fn test_new_connection_is_disconnected() {
    let conn: Connection<ScriptedStream> = Connection::new(test_config());
    assert_eq!(conn.state(), ConnectionState::Disconnected);
    assert!(!conn.is_connected());
    assert!(conn.stream().is_none());
    assert_eq!(conn.port(), 730);
    assert_eq!(conn.address(), "127.0.0.1");
}

#[test]
fn test_handshake_accepts_201_greeting() {
    let (stream, _) = ScriptedStream::new(&[b"201- connected\r\n"]);
    let mut conn = Connection::new(test_config());

    conn.connect_with(stream).unwrap();

    assert!(conn.is_connected());
    assert_eq!(conn.state(), ConnectionState::Connected);
    assert!(conn.stream().is_some());
}

#[test]
fn test_handshake_rejects_other_greeting() {
    let (stream, _) = ScriptedStream::new(&[b"200- hello\r\n"]);
    let mut conn = Connection::new(test_config());

    let err = conn.connect_with(stream).unwrap_err();

    assert!(matches!(err, JrpcError::Protocol(_)));
    assert!(!conn.is_connected());
    assert_eq!(conn.state(), ConnectionState::Closed);
}

#[test]
fn test_handshake_rejects_empty_greeting() {
    let (stream, _) = ScriptedStream::new(&[]);
    let mut conn = Connection::new(test_config());

    let err = conn.connect_with(stream).unwrap_err();
    assert!(matches!(err, JrpcError::Protocol(_)));
    assert!(!conn.is_connected());
}

#[test]
fn test_handshake_transport_failure() {
    let mut conn = Connection::new(test_config());

    let err = conn.connect_with(BrokenStream).unwrap_err();
    assert!(matches!(err, JrpcError::Connection(_)));
    assert!(!conn.is_connected());
}

#[test]
fn test_connect_twice_is_rejected() {
    let (first, _) = ScriptedStream::new(&[b"201- connected\r\n"]);
    let (second, _) = ScriptedStream::new(&[b"201- connected\r\n"]);
    let mut conn = Connection::new(test_config());

    conn.connect_with(first).unwrap();
    let err = conn.connect_with(second).unwrap_err();

    assert!(matches!(err, JrpcError::InvalidState(ConnectionState::Connected)));
    assert!(conn.is_connected());
}

// =============================================================================
// Exchange Tests
// =============================================================================

#[test]
fn test_send_command_returns_single_read() {
    let (stream, written) = ScriptedStream::new(&[b"201- connected\r\n", b"200- OK\r\n"]);
    let mut conn = Connection::new(test_config());
    conn.connect_with(stream).unwrap();

    let response = conn.send_command("getmem addr=0 length=1\r\n").unwrap();

    assert_eq!(response.as_bytes(), b"200- OK\r\n");
    assert_eq!(sent(&written), "getmem addr=0 length=1\r\n");
}

#[test]
fn test_send_command_truncates_to_buffer_size() {
    let config = Config::builder().settle_delay_ms(0).recv_buffer_size(8).build();
    let (stream, _) = ScriptedStream::new(&[b"201- hi", b"200- a long reply\r\n"]);
    let mut conn = Connection::new(config);
    conn.connect_with(stream).unwrap();

    let response = conn.send_command("x\r\n").unwrap();
    assert_eq!(response.as_bytes(), b"200- a l");
}

#[test]
fn test_send_before_connect_is_not_connected() {
    let mut conn: Connection<ScriptedStream> = Connection::new(test_config());
    let err = conn.send_command("getmem addr=0 length=1\r\n").unwrap_err();
    assert!(matches!(err, JrpcError::NotConnected));
}

#[test]
fn test_send_after_close_is_not_connected() {
    let (stream, written) = ScriptedStream::new(&[b"201- connected\r\n", b"200- OK\r\n"]);
    let mut conn = Connection::new(test_config());
    conn.connect_with(stream).unwrap();
    conn.close();

    let err = conn.send_command("getmem addr=0 length=1\r\n").unwrap_err();
    assert!(matches!(err, JrpcError::NotConnected));
    assert!(written.borrow().is_empty());
}

#[test]
fn test_send_rejects_non_ascii() {
    let (stream, written) = ScriptedStream::new(&[b"201- connected\r\n"]);
    let mut conn = Connection::new(test_config());
    conn.connect_with(stream).unwrap();

    let err = conn.send_command("setmem addr=0 data=\u{e9}\r\n").unwrap_err();
    assert!(matches!(err, JrpcError::Format(_)));
    assert!(written.borrow().is_empty());
}

#[test]
fn test_not_connected_checked_before_text() {
    let mut fresh: Connection<ScriptedStream> = Connection::new(test_config());
    let err = fresh.send_command("setmem addr=\u{e9} data=00\r\n").unwrap_err();
    assert!(matches!(err, JrpcError::NotConnected));

    let (stream, written) = ScriptedStream::new(&[b"201- connected\r\n"]);
    let mut closed = Connection::new(test_config());
    closed.connect_with(stream).unwrap();
    closed.close();

    let err = closed.send_command("setmem addr=\u{e9} data=00\r\n").unwrap_err();
    assert!(matches!(err, JrpcError::NotConnected));
    assert!(written.borrow().is_empty());
}

#[test]
fn test_debug_exchange_waits_settle_delay() {
    let config = Config::builder().debug(true).settle_delay_ms(20).build();
    let (stream, written) = ScriptedStream::new(&[b"201- connected\r\n", b"200- OK\r\n"]);
    let mut conn = Connection::new(config);
    conn.connect_with(stream).unwrap();

    let started = Instant::now();
    let response = conn.send_command("getmem addr=0 length=1\r\n").unwrap();

    assert!(started.elapsed() >= Duration::from_millis(20));
    assert!(response.is_success());
    assert_eq!(sent(&written), "getmem addr=0 length=1\r\n");
}

#[test]
fn test_peer_close_is_connection_error() {
    let (stream, _) = ScriptedStream::new(&[b"201- connected\r\n"]);
    let mut conn = Connection::new(test_config());
    conn.connect_with(stream).unwrap();

    let err = conn.send_command("getmem addr=0 length=1\r\n").unwrap_err();
    assert!(matches!(err, JrpcError::Connection(_)));
}

// =============================================================================
// Close Tests
// =============================================================================

#[test]
fn test_close_is_idempotent() {
    let (stream, _) = ScriptedStream::new(&[b"201- connected\r\n"]);
    let mut conn = Connection::new(test_config());
    conn.connect_with(stream).unwrap();

    conn.close();
    conn.close();

    assert_eq!(conn.state(), ConnectionState::Closed);
    assert!(conn.stream().is_none());
}

#[test]
fn test_close_before_connect() {
    let mut conn: Connection<ScriptedStream> = Connection::new(test_config());
    conn.close();
    assert!(!conn.is_connected());
}

#[test]
fn test_closed_connection_cannot_reconnect() {
    let (first, _) = ScriptedStream::new(&[b"201- connected\r\n"]);
    let (second, _) = ScriptedStream::new(&[b"201- connected\r\n"]);
    let mut conn = Connection::new(test_config());
    conn.connect_with(first).unwrap();
    conn.close();

    let err = conn.connect_with(second).unwrap_err();
    assert!(matches!(err, JrpcError::InvalidState(ConnectionState::Closed)));
}

// =============================================================================
// TCP Tests
// =============================================================================

#[test]
fn test_tcp_handshake_and_exchange() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let console = thread::spawn(move || {
        let (mut socket, _) = listener.accept().unwrap();
        socket.write_all(b"201- connected\r\n").unwrap();

        let mut reader = BufReader::new(socket.try_clone().unwrap());
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        socket.write_all(b"200- OK\r\n").unwrap();
        line
    });

    let config = Config::builder()
        .port(port)
        .settle_delay_ms(0)
        .read_timeout_ms(5000)
        .write_timeout_ms(5000)
        .build();
    let mut conn: Connection = Connection::new(config);
    conn.connect().unwrap();
    assert!(conn.is_connected());

    let response = conn.send_command("setmem addr=0x10 data=00\r\n").unwrap();
    assert!(response.is_success());

    assert_eq!(console.join().unwrap(), "setmem addr=0x10 data=00\r\n");
    conn.close();
}

#[test]
fn test_tcp_bad_greeting() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();

    let console = thread::spawn(move || {
        let (mut socket, _) = listener.accept().unwrap();
        socket.write_all(b"HTTP/1.1 400 Bad Request\r\n").unwrap();
    });

    let mut conn: Connection = Connection::new(Config::builder().port(port).settle_delay_ms(0).build());
    let err = conn.connect().unwrap_err();

    assert!(matches!(err, JrpcError::Protocol(_)));
    assert!(!conn.is_connected());
    console.join().unwrap();
}

#[test]
fn test_tcp_refused_is_connection_error() {
    // Grab a free port, then release it so nothing is listening
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let config = Config::builder()
        .port(port)
        .connect_timeout_ms(1000)
        .build();
    let mut conn: Connection = Connection::new(config);
    let err = conn.connect().unwrap_err();

    assert!(matches!(err, JrpcError::Connection(_)));
    assert_eq!(conn.state(), ConnectionState::Closed);
}
