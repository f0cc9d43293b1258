//! HttpFetcher against a throwaway local server

use noticias_domain::traits::PageFetcher;
use noticias_extractor::{FetchError, HttpFetcher};
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

/// Serve one connection with `response`, sending the raw request back
fn serve_once(response: &'static str, delay: Duration) -> (String, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}/", listener.local_addr().unwrap());
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut buf = [0u8; 4096];
        let n = stream.read(&mut buf).unwrap_or(0);
        let _ = tx.send(String::from_utf8_lossy(&buf[..n]).to_string());
        thread::sleep(delay);
        let _ = stream.write_all(response.as_bytes());
    });

    (url, rx)
}

#[test]
fn test_success_returns_body_and_sends_user_agent() {
    let (url, rx) = serve_once(
        "HTTP/1.1 200 OK\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: 24\r\nConnection: close\r\n\r\n<h2>Olá, notícias</h2>",
        Duration::ZERO,
    );
    let fetcher = HttpFetcher::new("noticias-test/1.0", Duration::from_secs(5));

    let body = fetcher.fetch(&url).unwrap();
    assert_eq!(body, "<h2>Olá, notícias</h2>");

    let request = rx.recv().unwrap().to_lowercase();
    assert!(request.contains("user-agent: noticias-test/1.0"));
}

#[test]
fn test_server_error_status() {
    let (url, _rx) = serve_once(
        "HTTP/1.1 500 Internal Server Error\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        Duration::ZERO,
    );
    let fetcher = HttpFetcher::new("noticias-test/1.0", Duration::from_secs(5));

    assert_eq!(fetcher.fetch(&url), Err(FetchError::Status(500)));
}

#[test]
fn test_not_found_status() {
    let (url, _rx) = serve_once(
        "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
        Duration::ZERO,
    );
    let fetcher = HttpFetcher::new("noticias-test/1.0", Duration::from_secs(5));

    assert_eq!(fetcher.fetch(&url), Err(FetchError::Status(404)));
}

#[test]
fn test_slow_server_times_out() {
    let (url, _rx) = serve_once(
        "HTTP/1.1 200 OK\r\nContent-Length: 0\r\n\r\n",
        Duration::from_secs(3),
    );
    let fetcher = HttpFetcher::new("noticias-test/1.0", Duration::from_millis(500));

    assert_eq!(fetcher.fetch(&url), Err(FetchError::Timeout));
}
