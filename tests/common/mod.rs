//! Shared utilities for integration testing: a throwaway certificate, a
//! real server on an ephemeral port and a TLS client that trusts it.

use std::net::SocketAddr;
use std::sync::Arc;

use tempfile::TempDir;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio_rustls::rustls::pki_types::{CertificateDer, ServerName};
use tokio_rustls::rustls::{ClientConfig, RootCertStore};
use tokio_rustls::TlsConnector;

use indexd::config::{IndexdConfig, TimeoutConfig};
use indexd::net::listener::Listener;
use indexd::{IndexServer, Shutdown};

/// A running indexd instance backed by throwaway directories.
pub struct TestServer {
    pub addr: SocketAddr,
    pub root: TempDir,
    client_config: Arc<ClientConfig>,
    shutdown: Shutdown,
    _tls_dir: TempDir,
}

/// A TLS client for one test server that can be moved into a task.
#[derive(Clone)]
pub struct TestClient {
    addr: SocketAddr,
    config: Arc<ClientConfig>,
}

/// Start a server with the given ACL, serving a fresh temp directory.
///
/// The listener takes an ephemeral port so tests can run in parallel, and
/// the accept loop runs on its own task until `stop`.
pub async fn start_server(acl: &[&str]) -> TestServer {
    let root = TempDir::new().unwrap();
    let (tls_dir, cert_der) = write_test_certificate();

    let config = IndexdConfig {
        indexd_directory: root.path().to_path_buf(),
        acl: acl.iter().map(|e| e.to_string()).collect(),
        address: "127.0.0.1".to_string(),
        port: 0,
        logfile: None,
        cert: tls_dir.path().join("cert.pem"),
        key: tls_dir.path().join("key.pem"),
        max_connections: 16,
        timeouts: TimeoutConfig {
            handshake_secs: 5,
            walk_secs: 5,
            write_secs: 5,
        },
    };

    let server = IndexServer::new(config.clone()).unwrap();
    let listener = Listener::bind(&config).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(server.run(listener, rx));

    let mut roots = RootCertStore::empty();
    roots.add(cert_der).unwrap();
    let client_config = Arc::new(
        ClientConfig::builder()
            .with_root_certificates(roots)
            .with_no_client_auth(),
    );

    TestServer {
        addr,
        root,
        client_config,
        shutdown,
        _tls_dir: tls_dir,
    }
}

fn write_test_certificate() -> (TempDir, CertificateDer<'static>) {
    let dir = TempDir::new().unwrap();
    let cert = rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
    std::fs::write(dir.path().join("cert.pem"), cert.serialize_pem().unwrap()).unwrap();
    std::fs::write(dir.path().join("key.pem"), cert.serialize_private_key_pem()).unwrap();
    let der = CertificateDer::from(cert.serialize_der().unwrap());
    (dir, der)
}

impl TestServer {
    /// Connect over TLS and read the whole response body.
    pub async fn fetch(&self) -> std::io::Result<String> {
        self.client().fetch().await
    }

    /// A client handle that can be moved into a spawned task.
    pub fn client(&self) -> TestClient {
        TestClient {
            addr: self.addr,
            config: self.client_config.clone(),
        }
    }

    /// Trigger shutdown of the accept loop.
    pub fn stop(&self) {
        self.shutdown.trigger();
    }
}

impl TestClient {
    /// Connect over TLS and read until the server closes.
    pub async fn fetch(&self) -> std::io::Result<String> {
        let stream = TcpStream::connect(self.addr).await?;
        let connector = TlsConnector::from(self.config.clone());
        let name = ServerName::try_from("localhost").unwrap();
        let mut stream = connector.connect(name, stream).await?;

        let mut body = String::new();
        stream.read_to_string(&mut body).await?;
        Ok(body)
    }
}
