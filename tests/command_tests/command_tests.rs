//! Command Layer Tests
//!
//! End-to-end scenarios against the in-process mock server.

#[path = "../common/mod.rs"]
mod common;

use atlasresp::{RespError, SortOptions};
use bytes::Bytes;
use common::{scripted, words, MockServer};

fn b(bytes: &'static [u8]) -> Bytes {
    Bytes::from_static(bytes)
}

// =============================================================================
// String Scenarios
// =============================================================================

#[test]
fn test_set_then_get() {
    let server = MockServer::start();
    let mut conn = server.connect();

    conn.set("k", "v").unwrap();
    assert_eq!(conn.get("k").unwrap(), Some(b(b"v")));
}

#[test]
fn test_get_missing_key_is_none() {
    let server = MockServer::start();
    let mut conn = server.connect();

    assert_eq!(conn.get("nope").unwrap(), None);
}

#[test]
fn test_binary_safe_values_round_trip() {
    let server = MockServer::start();
    let mut conn = server.connect();

    let values: Vec<&'static [u8]> = vec![
        &b"with spaces in it"[..],
        &b"crlf\r\ninside\r\n"[..],
        &b"\x00\x01\xff"[..],
        &b""[..],
        &b"$3\r\n*1\r\n"[..],
    ];
    for (i, value) in values.into_iter().enumerate() {
        let key = format!("key {}\r\n", i);
        conn.set(&key, value).unwrap();
        assert_eq!(conn.get(&key).unwrap(), Some(b(value)));
    }
}

#[test]
fn test_mget_preserves_nils() {
    let server = MockServer::start();
    let mut conn = server.connect();

    conn.set("a", "1").unwrap();
    conn.set("c", "3").unwrap();

    let values = conn.mget(&["a", "b", "c"]).unwrap();
    assert_eq!(values, Some(vec![Some(b(b"1")), None, Some(b(b"3"))]));
}

#[test]
fn test_incr_counts_up() {
    let server = MockServer::start();
    let mut conn = server.connect();

    assert_eq!(conn.incr("n").unwrap(), 1);
    assert_eq!(conn.incr("n").unwrap(), 2);
    assert!(conn.exists("n").unwrap());
}

#[test]
fn test_echo_binary() {
    let server = MockServer::start();
    let mut conn = server.connect();

    assert_eq!(conn.echo(b"a\r\nb").unwrap(), b(b"a\r\nb"));
}

// =============================================================================
// Keyspace Scenarios
// =============================================================================

#[test]
fn test_del_existing_and_absent() {
    let server = MockServer::start();
    let mut conn = server.connect();

    conn.set("k", "v").unwrap();
    assert_eq!(conn.del(&["k"]).unwrap(), 1);
    assert_eq!(conn.del(&["k"]).unwrap(), 0);
    assert!(!conn.exists("k").unwrap());
}

#[test]
fn test_del_counts_only_existing() {
    let server = MockServer::start();
    let mut conn = server.connect();

    conn.set("x", "1").unwrap();
    conn.set("y", "2").unwrap();
    assert_eq!(conn.del(&["x", "y", "z"]).unwrap(), 2);
}

// =============================================================================
// List Scenarios
// =============================================================================

#[test]
fn test_lpush_then_lrange() {
    let server = MockServer::start();
    let mut conn = server.connect();

    assert_eq!(conn.lpush("k", "a").unwrap(), 1);
    assert_eq!(conn.lpush("k", "b").unwrap(), 2);
    assert_eq!(conn.lrange("k", 0, -1).unwrap(), vec![b(b"b"), b(b"a")]);
}

#[test]
fn test_lrange_missing_key_is_empty() {
    let server = MockServer::start();
    let mut conn = server.connect();

    assert!(conn.lrange("none", 0, -1).unwrap().is_empty());
}

#[test]
fn test_wrong_type_is_server_error() {
    let server = MockServer::start();
    let mut conn = server.connect();

    conn.rpush("list", "x").unwrap();
    match conn.get("list").unwrap_err() {
        RespError::Server(message) => assert!(message.starts_with("WRONGTYPE")),
        other => panic!("Expected server error, got {:?}", other),
    }
    // Still usable afterwards
    assert_eq!(conn.lrange("list", 0, -1).unwrap(), vec![b(b"x")]);
}

// =============================================================================
// Sort Scenarios
// =============================================================================

fn numeric_list(conn: &mut atlasresp::Connection) {
    for value in ["30", "4", "100", "-2", "7"] {
        conn.rpush("nums", value).unwrap();
    }
}

#[test]
fn test_sort_with_limit_returns_lowest_two() {
    let server = MockServer::start();
    let mut conn = server.connect();
    numeric_list(&mut conn);

    let sorted = conn.sort("nums", &SortOptions::new().limit(0, 2)).unwrap();
    assert_eq!(sorted, vec![b(b"-2"), b(b"4")]);
}

#[test]
fn test_sort_descending() {
    let server = MockServer::start();
    let mut conn = server.connect();
    numeric_list(&mut conn);

    let sorted = conn.sort("nums", &SortOptions::new().desc()).unwrap();
    assert_eq!(
        sorted,
        vec![b(b"100"), b(b"30"), b(b"7"), b(b"4"), b(b"-2")]
    );
}

#[test]
fn test_sort_alpha() {
    let server = MockServer::start();
    let mut conn = server.connect();
    numeric_list(&mut conn);

    let sorted = conn.sort("nums", &SortOptions::new().alpha()).unwrap();
    assert_eq!(
        sorted,
        vec![b(b"-2"), b(b"100"), b(b"30"), b(b"4"), b(b"7")]
    );
}

#[test]
fn test_sort_sends_options_in_fixed_order() {
    let (mut conn, requests) = scripted(vec!["*0\r\n"]);

    let options = SortOptions::new()
        .alpha()
        .limit(1, 3)
        .get("obj_*")
        .by("w_*")
        .desc();
    assert!(conn.sort("mylist", &options).unwrap().is_empty());

    assert_eq!(
        words(&requests.recv().unwrap()),
        vec!["SORT", "mylist", "BY", "w_*", "LIMIT", "1", "3", "GET", "obj_*", "DESC", "ALPHA"]
    );
}

// =============================================================================
// Projection Through Commands
// =============================================================================

#[test]
fn test_zscore_and_zrank_absence() {
    let (mut conn, _requests) = scripted(vec!["$-1\r\n", "$-1\r\n", "$4\r\n1.25\r\n", ":0\r\n"]);

    assert_eq!(conn.zscore("z", "ghost").unwrap(), None);
    assert_eq!(conn.zrank("z", "ghost").unwrap(), None);
    assert_eq!(conn.zscore("z", "m").unwrap(), Some(1.25));
    assert_eq!(conn.zrank("z", "m").unwrap(), Some(0));
}

#[test]
fn test_blpop_pair_and_timeout() {
    let (mut conn, requests) = scripted(vec!["*2\r\n$1\r\nq\r\n$3\r\njob\r\n", "*-1\r\n"]);

    assert_eq!(
        conn.blpop(&["q"], 1).unwrap(),
        Some((b(b"q"), b(b"job")))
    );
    assert_eq!(conn.blpop(&["q"], 1).unwrap(), None);
    assert_eq!(words(&requests.recv().unwrap()), vec!["BLPOP", "q", "1"]);
}

#[test]
fn test_lastsave_large_counter() {
    let (mut conn, _requests) = scripted(vec![":1700000000\r\n", ":99999999999999999999\r\n"]);

    assert_eq!(conn.lastsave().unwrap(), 1_700_000_000);
    assert_eq!(conn.lastsave().unwrap(), 99_999_999_999_999_999_999);
}

#[test]
fn test_bool_commands_reject_other_integers() {
    let (mut conn, _requests) = scripted(vec![":2\r\n"]);

    assert!(matches!(
        conn.sadd("s", "m"),
        Err(RespError::ProjectionMismatch { .. })
    ));
}
