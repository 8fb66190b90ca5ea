//! Shared networking constants and helpers used by the client and the remote.

/// TCP port the mock remote listens on.
pub const REMOTE_PORT: u16 = 8090;
/// Seconds between two scheduled syncs.
pub const SYNC_INTERVAL_SECS: u64 = 30;
/// Upper bound for connecting to, writing to and reading from the remote.
pub const FETCH_TIMEOUT_SECS: u64 = 5;
/// Seconds between two random edits of the remote catalog.
pub const CHURN_INTERVAL_SECS: u64 = 20;

/// Helper to format an IPv4 address with a port like "ip:port".
pub fn addr(ip: &str, port: u16) -> String {
    format!("{}:{}", ip, port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addr_formats_ip_and_port() {
        assert_eq!(addr("127.0.0.1", REMOTE_PORT), "127.0.0.1:8090");
    }
}
