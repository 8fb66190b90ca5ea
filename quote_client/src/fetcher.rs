//! Fetching quotes from the remote over TCP.
//!
//! `RemoteSource` is the seam the sync loop depends on; `TcpRemote` is the real
//! implementation. The whole exchange (connect, write, read) shares one deadline of
//! `timeout` from the start of the request, and the reply may not exceed
//! [`MAX_REPLY_BYTES`], so a slow or chatty remote cannot hold a cycle forever.
use log::debug;
use quote_common::command::Command;
use quote_common::remote::Reply;
use quote_common::{Quote, QuoteError, Result};
use std::io::{BufRead, BufReader, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

/// Upper bound on the size of one reply line.
pub const MAX_REPLY_BYTES: usize = 1024 * 1024;

/// Anything that can hand over a batch of remote quotes.
pub trait RemoteSource {
    /// Fetch the current remote batch, already mapped into quotes.
    fn fetch(&self) -> Result<Vec<Quote>>;
}

/// Remote reached over the line-based TCP protocol.
#[derive(Debug, Clone)]
pub struct TcpRemote {
    addr: String,
    timeout: Duration,
    limit: Option<usize>,
}

impl TcpRemote {
    /// Remote at `addr` ("host:port"); every request must complete within `timeout`.
    pub fn new(addr: &str, timeout: Duration) -> Self {
        Self {
            addr: addr.to_string(),
            timeout,
            limit: None,
        }
    }

    /// Ask the remote for at most `limit` items per fetch.
    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Remote address as given.
    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Round-trip a `PING` and return how long it took.
    pub fn ping(&self) -> Result<Duration> {
        let started = Instant::now();
        self.request(&Command::ping())?;
        Ok(started.elapsed())
    }

    fn request(&self, command: &Command) -> Result<Reply> {
        let deadline = Instant::now() + self.timeout;
        let target = self
            .addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| QuoteError::Remote(format!("cannot resolve {}", self.addr)))?;

        let mut stream = TcpStream::connect_timeout(&target, remaining(deadline)?)?;
        stream.set_write_timeout(Some(remaining(deadline)?))?;

        debug!("Sending {} to {}", command.header, target);
        stream.write_all(&command.to_line()?)?;

        let raw = read_reply(&stream, deadline)?;
        let raw = String::from_utf8_lossy(&raw);
        if raw.trim().is_empty() {
            return Err(QuoteError::Remote(format!(
                "{} closed the connection without a reply",
                target
            )));
        }
        Ok(serde_json::from_str(raw.trim())?)
    }
}

/// Time left before `deadline`, or an error once it has passed.
fn remaining(deadline: Instant) -> Result<Duration> {
    let left = deadline.saturating_duration_since(Instant::now());
    if left.is_zero() {
        return Err(QuoteError::Remote("remote did not answer in time".to_string()));
    }
    Ok(left)
}

/// Read one reply line, re-arming the socket timeout with the time left before each read.
fn read_reply(stream: &TcpStream, deadline: Instant) -> Result<Vec<u8>> {
    let mut reader = BufReader::new(stream);
    let mut raw = Vec::new();

    loop {
        reader.get_ref().set_read_timeout(Some(remaining(deadline)?))?;
        let buf = reader.fill_buf()?;
        if buf.is_empty() {
            break;
        }
        let (chunk, done) = match buf.iter().position(|b| *b == b'\n') {
            Some(end) => (&buf[..=end], true),
            None => (buf, false),
        };
        if raw.len() + chunk.len() > MAX_REPLY_BYTES {
            return Err(QuoteError::Remote(format!(
                "reply exceeds {} bytes",
                MAX_REPLY_BYTES
            )));
        }
        raw.extend_from_slice(chunk);
        let used = chunk.len();
        reader.consume(used);
        if done {
            break;
        }
    }
    Ok(raw)
}

impl RemoteSource for TcpRemote {
    fn fetch(&self) -> Result<Vec<Quote>> {
        let reply = self.request(&Command::fetch(self.limit))?;
        debug!(
            "Remote returned {} item(s), served at {}",
            reply.items.len(),
            reply.served_at
        );
        reply.into_quotes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;
    use std::thread;

    /// One-shot server that answers the first connection with `reply`.
    fn serve_once(reply: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            let mut line = String::new();
            BufReader::new(&stream).read_line(&mut line).unwrap();
            assert!(line.ends_with('\n'));
            let _cmd = Command::from_line(&line).unwrap();
            (&stream).write_all(reply.as_bytes()).unwrap();
        });
        addr
    }

    #[test]
    fn test_fetch_maps_items() {
        let addr = serve_once(
            "{\"items\":[{\"id\":1,\"title\":\"Carpe diem.\",\"tag\":\"Latin\"}],\"served_at\":5}\n",
        );
        let quotes = TcpRemote::new(&addr, Duration::from_secs(2)).fetch().unwrap();
        assert_eq!(quotes, vec![Quote::new("Carpe diem.", "Latin").unwrap()]);
    }

    #[test]
    fn test_fetch_rejects_malformed_item() {
        let addr = serve_once(
            "{\"items\":[{\"id\":1,\"title\":\"Carpe diem.\",\"tag\":\"\"}],\"served_at\":5}\n",
        );
        let err = TcpRemote::new(&addr, Duration::from_secs(2)).fetch().unwrap_err();
        assert!(matches!(err, QuoteError::Remote(_)));
    }

    #[test]
    fn test_empty_reply_is_an_error() {
        let addr = serve_once("");
        let err = TcpRemote::new(&addr, Duration::from_secs(2)).fetch().unwrap_err();
        assert!(matches!(err, QuoteError::Remote(_)));
    }

    #[test]
    fn test_ping() {
        let addr = serve_once("{\"items\":[],\"served_at\":5}\n");
        assert!(TcpRemote::new(&addr, Duration::from_secs(2)).ping().is_ok());
    }

    #[test]
    fn test_silent_remote_times_out() {
        // Connections land in the backlog but nobody ever answers.
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        let started = Instant::now();
        let err = TcpRemote::new(&addr, Duration::from_millis(200))
            .fetch()
            .unwrap_err();
        assert!(matches!(err, QuoteError::Io(_) | QuoteError::Remote(_)));
        assert!(started.elapsed() < Duration::from_secs(5));
        drop(listener);
    }

    #[test]
    fn test_trickling_remote_hits_deadline() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let body = b"{\"items\":[],\"served_at\":5}\n";
            for byte in body {
                if stream.write_all(&[*byte]).is_err() {
                    return;
                }
                thread::sleep(Duration::from_millis(150));
            }
        });

        let started = Instant::now();
        let err = TcpRemote::new(&addr, Duration::from_millis(200))
            .fetch()
            .unwrap_err();
        assert!(matches!(err, QuoteError::Io(_) | QuoteError::Remote(_)));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[test]
    fn test_oversized_reply_is_rejected() {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap().to_string();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let chunk = vec![b'x'; 64 * 1024];
            for _ in 0..(MAX_REPLY_BYTES / chunk.len() + 2) {
                if stream.write_all(&chunk).is_err() {
                    return;
                }
            }
        });

        let err = TcpRemote::new(&addr, Duration::from_secs(5))
            .fetch()
            .unwrap_err();
        assert!(matches!(err, QuoteError::Remote(msg) if msg.contains("exceeds")));
    }

    #[test]
    fn test_unreachable_remote_fails() {
        let addr = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().to_string()
        };
        let remote = TcpRemote::new(&addr, Duration::from_millis(500));
        assert_eq!(remote.addr(), addr);
        assert!(remote.fetch().is_err());
    }
}
