use crate::model::catalog::Catalog;
use chrono::Utc;
use log::{debug, error, info, warn};
use quote_common::Result;
use quote_common::command::{Command, CommandKind};
use quote_common::net::FETCH_TIMEOUT_SECS;
use quote_common::remote::Reply;
use std::io::{BufRead, BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// TCP receiver that answers client commands from the shared catalog.
///
/// Every accepted connection is handled on its own thread and carries exactly one
/// command. A client that sends garbage only loses its own connection.
pub struct RemoteReceiver {
    /// The underlying TCP listening socket.
    pub(crate) socket: TcpListener,
}

impl RemoteReceiver {
    /// Bind a new TCP receiver to the provided `bind_addr` (e.g., `0.0.0.0:8090`).
    pub fn new(bind_addr: &str) -> Result<Self> {
        let socket = TcpListener::bind(bind_addr)?;
        Ok(Self { socket })
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    /// Blocking accept loop.
    pub fn serve(self, catalog: Arc<Mutex<Catalog>>) -> Result<()> {
        info!("Remote TCP server is started on {}", self.socket.local_addr()?);

        for stream in self.socket.incoming() {
            match stream {
                Ok(stream) => {
                    let catalog = Arc::clone(&catalog);
                    thread::spawn(move || {
                        let peer = stream.peer_addr().ok();
                        if let Err(e) = handle_connection(stream, &catalog) {
                            warn!("Client {:?} dropped: {}", peer, e);
                        }
                    });
                }
                Err(e) => error!("TCP connection error: {}", e),
            }
        }
        Ok(())
    }
}

/// Answer one command line against the catalog.
pub fn handle_request(line: &str, catalog: &Mutex<Catalog>) -> Result<Reply> {
    let cmd = Command::from_line(line)?;
    debug!("Received command {:?}", cmd);

    let items = match cmd.header {
        CommandKind::Fetch => catalog.lock()?.snapshot(cmd.limit),
        CommandKind::Ping => Vec::new(),
    };
    Ok(Reply {
        items,
        served_at: Utc::now().timestamp_millis(),
    })
}

fn handle_connection(stream: TcpStream, catalog: &Mutex<Catalog>) -> Result<()> {
    let timeout = Some(Duration::from_secs(FETCH_TIMEOUT_SECS));
    stream.set_read_timeout(timeout)?;
    stream.set_write_timeout(timeout)?;

    let mut line = String::new();
    BufReader::new(&stream).read_line(&mut line)?;
    let reply = handle_request(&line, catalog)?;

    let mut writer = &stream;
    serde_json::to_writer(&mut writer, &reply)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    info!(
        "Served {} item(s) to {}",
        reply.items.len(),
        stream.peer_addr()?
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote_common::QuoteError;
    use std::io::Read;

    fn catalog() -> Mutex<Catalog> {
        Mutex::new(Catalog::seeded())
    }

    #[test]
    fn test_fetch_returns_catalog() {
        let catalog = catalog();
        let reply = handle_request(r#"{"header":"FETCH"}"#, &catalog).unwrap();
        assert_eq!(reply.items, catalog.lock().unwrap().snapshot(None));
        assert!(reply.served_at > 0);
    }

    #[test]
    fn test_fetch_honours_limit() {
        let reply = handle_request(r#"{"header":"FETCH","limit":1}"#, &catalog()).unwrap();
        assert_eq!(reply.items.len(), 1);
        assert_eq!(reply.items[0].id, 1);
    }

    #[test]
    fn test_ping_has_no_items() {
        let reply = handle_request("{\"header\":\"PING\"}\n", &catalog()).unwrap();
        assert!(reply.items.is_empty());
    }

    #[test]
    fn test_bad_command_is_an_error() {
        assert!(matches!(
            handle_request("STREAM udp://127.0.0.1:9000", &catalog()),
            Err(QuoteError::SerdeJson(_))
        ));
    }

    #[test]
    fn test_serve_over_loopback() {
        let receiver = RemoteReceiver::new("127.0.0.1:0").unwrap();
        let addr = receiver.local_addr().unwrap();
        let shared = Arc::new(catalog());
        let served = Arc::clone(&shared);
        thread::spawn(move || receiver.serve(served));

        // A broken client must not take the server down.
        let mut bad = TcpStream::connect(addr).unwrap();
        bad.write_all(b"nonsense\n").unwrap();
        let mut ignored = Vec::new();
        bad.read_to_end(&mut ignored).unwrap();
        assert!(ignored.is_empty());

        let mut stream = TcpStream::connect(addr).unwrap();
        stream.write_all(&Command::fetch(None).to_line().unwrap()).unwrap();
        let mut raw = String::new();
        stream.read_to_string(&mut raw).unwrap();

        let reply: Reply = serde_json::from_str(raw.trim()).unwrap();
        assert_eq!(reply.items, shared.lock().unwrap().snapshot(None));
    }
}
