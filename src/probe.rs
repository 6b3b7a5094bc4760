//! HTTP connection probe.
//!
//! Sends a single `HEAD /` to a discovered address with the subdomain in the
//! `Host` header and reports the response headers.

use std::net::Ipv4Addr;

use log::debug;
use reqwest::header::HOST;

/// Whether an address may be probed over HTTP.
///
/// Private, loopback, link-local and unspecified addresses are skipped.
pub fn is_probe_target(ip: Ipv4Addr) -> bool {
    !(ip.is_private() || ip.is_loopback() || ip.is_link_local() || ip.is_unspecified())
}

/// Sends `HEAD http://{ip}:{port}/` with `Host: {host}`.
///
/// Redirects are not followed; the client decides the timeout.
///
/// # Arguments
///
/// * `client` - HTTP client from [`crate::initialization::init_client`]
/// * `ip` - Address to connect to
/// * `port` - TCP port
/// * `host` - Value of the `Host` header, usually the discovered subdomain
///
/// # Returns
///
/// The response headers in the order received, or `None` if the request failed.
pub async fn head_request(
    client: &reqwest::Client,
    ip: Ipv4Addr,
    port: u16,
    host: &str,
) -> Option<Vec<(String, String)>> {
    let url = format!("http://{ip}:{port}/");
    let response = match client.head(&url).header(HOST, host).send().await {
        Ok(response) => response,
        Err(e) => {
            debug!("HEAD {url} (Host: {host}) failed: {e}");
            return None;
        }
    };

    let headers = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect();
    Some(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initialization::init_client;
    use std::time::Duration;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_is_probe_target() {
        assert!(is_probe_target(Ipv4Addr::new(93, 184, 216, 34)));
        assert!(!is_probe_target(Ipv4Addr::new(10, 0, 0, 1)));
        assert!(!is_probe_target(Ipv4Addr::new(172, 16, 5, 4)));
        assert!(!is_probe_target(Ipv4Addr::new(192, 168, 1, 1)));
        assert!(!is_probe_target(Ipv4Addr::LOCALHOST));
        assert!(!is_probe_target(Ipv4Addr::new(169, 254, 0, 1)));
    }

    #[tokio::test]
    async fn test_head_request_sends_host_and_returns_headers() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .and(path("/"))
            .and(header("host", "www.example.com"))
            .respond_with(ResponseTemplate::new(200).insert_header("server", "nginx"))
            .expect(1)
            .mount(&server)
            .await;

        let client = init_client(Duration::from_secs(2)).unwrap();
        let headers = head_request(&client, Ipv4Addr::LOCALHOST, server.address().port(), "www.example.com")
            .await
            .expect("probe should succeed");

        assert!(headers
            .iter()
            .any(|(name, value)| name == "server" && value == "nginx"));
    }

    #[tokio::test]
    async fn test_head_request_does_not_follow_redirects() {
        let server = MockServer::start().await;
        Mock::given(method("HEAD"))
            .respond_with(
                ResponseTemplate::new(301).insert_header("location", "https://www.example.com/"),
            )
            .mount(&server)
            .await;

        let client = init_client(Duration::from_secs(2)).unwrap();
        let headers = head_request(&client, Ipv4Addr::LOCALHOST, server.address().port(), "www.example.com")
            .await
            .unwrap();

        assert!(headers
            .iter()
            .any(|(name, value)| name == "location" && value == "https://www.example.com/"));
    }

    #[tokio::test]
    async fn test_head_request_connection_refused() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = init_client(Duration::from_secs(2)).unwrap();
        assert!(head_request(&client, Ipv4Addr::LOCALHOST, port, "www.example.com")
            .await
            .is_none());
    }
}
