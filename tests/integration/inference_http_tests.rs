//! HttpDetector against a one-shot HTTP server on localhost.
//!
//! The server accepts a single connection, captures the raw request and
//! replies with a canned status and body.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread::{self, JoinHandle};

use pestlaser::adapters::inference::HttpDetector;
use pestlaser::app::ports::PestDetector;
use pestlaser::error::{CommsError, Error, ProtocolErrorKind};
use pestlaser::plane::Coordinate;

const FRAME: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Read one HTTP/1.1 request: headers, then either `Content-Length` bytes
/// or chunks up to the terminating zero-length chunk.
fn read_request(stream: &mut impl Read) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        if let Some(pos) = find(&buf, b"\r\n\r\n") {
            break pos + 4;
        }
        let n = stream.read(&mut chunk).unwrap();
        assert!(n > 0, "client closed before sending headers");
        buf.extend_from_slice(&chunk[..n]);
    };

    let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
    let content_length = headers
        .lines()
        .find_map(|l| l.strip_prefix("content-length:"))
        .map(|v| v.trim().parse::<usize>().unwrap());

    match content_length {
        Some(len) => {
            while buf.len() < header_end + len {
                let n = stream.read(&mut chunk).unwrap();
                assert!(n > 0, "client closed mid-body");
                buf.extend_from_slice(&chunk[..n]);
            }
        }
        None => {
            while find(&buf[header_end..], b"0\r\n\r\n").is_none() {
                let n = stream.read(&mut chunk).unwrap();
                assert!(n > 0, "client closed mid-body");
                buf.extend_from_slice(&chunk[..n]);
            }
        }
    }
    buf
}

/// Serve exactly one request.  The join handle yields the raw request.
fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<Vec<u8>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/find_pest", listener.local_addr().unwrap());

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let request = read_request(&mut stream);
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
        request
    });

    (url, handle)
}

#[test]
fn hit_is_parsed_and_frame_uploaded_as_multipart() {
    let (url, server) = serve_once("200 OK", "50,75");
    let mut detector = HttpDetector::new(url).unwrap();

    let found = detector.detect(FRAME).unwrap();
    assert_eq!(found, Some(Coordinate::new(50.0, 75.0)));

    let request = server.join().unwrap();
    let text = String::from_utf8_lossy(&request);
    assert!(text.starts_with("POST /find_pest HTTP/1.1\r\n"), "{}", text);
    assert!(text.to_ascii_lowercase().contains("content-type: multipart/form-data; boundary="));
    assert!(text.contains("name=\"file\""));
    assert!(text.contains("filename=\"pest.jpg\""));
    assert!(text.contains("image/jpeg"));
    assert!(find(&request, FRAME).is_some(), "frame bytes must be sent verbatim");
}

#[test]
fn empty_body_is_a_miss() {
    let (url, server) = serve_once("200 OK", "");
    let mut detector = HttpDetector::new(url).unwrap();

    assert_eq!(detector.detect(FRAME), Ok(None));
    server.join().unwrap();
}

#[test]
fn garbage_body_is_a_protocol_error() {
    let (url, server) = serve_once("200 OK", "pest at 50/75");
    let mut detector = HttpDetector::new(url).unwrap();

    match detector.detect(FRAME) {
        Err(Error::Protocol(e)) => {
            assert_eq!(e.kind, ProtocolErrorKind::WrongFieldCount);
            assert_eq!(e.body, "pest at 50/75");
        }
        other => panic!("expected protocol error, got {:?}", other),
    }
    server.join().unwrap();
}

#[test]
fn server_error_status_is_reported() {
    let (url, server) = serve_once("500 Internal Server Error", "boom");
    let mut detector = HttpDetector::new(url).unwrap();

    assert_eq!(
        detector.detect(FRAME),
        Err(Error::Comms(CommsError::HttpStatus(500)))
    );
    server.join().unwrap();
}

#[test]
fn unreachable_server_is_a_comms_error() {
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let mut detector = HttpDetector::new(format!("http://{}/find_pest", addr)).unwrap();

    assert!(matches!(
        detector.detect(FRAME),
        Err(Error::Comms(CommsError::RequestFailed(_)))
    ));
}
