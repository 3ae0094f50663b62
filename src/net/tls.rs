//! TLS configuration and certificate loading.

use std::path::Path;

use axum_server::tls_rustls::RustlsConfig;

use crate::config::ListenerConfig;

/// Load the rustls acceptor configuration named by the listener config.
pub async fn load_tls_config(listener: &ListenerConfig) -> Result<RustlsConfig, std::io::Error> {
    let cert_path = Path::new(&listener.cert_path);
    let key_path = Path::new(&listener.key_path);

    if !cert_path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Certificate file not found: {:?}", cert_path),
        ));
    }
    if !key_path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Private key file not found: {:?}", key_path),
        ));
    }

    RustlsConfig::from_pem_file(cert_path, key_path).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_certificate() {
        let listener = ListenerConfig {
            https: true,
            cert_path: "/nonexistent/cert.pem".into(),
            key_path: "/nonexistent/key.pem".into(),
            ..ListenerConfig::default()
        };
        let err = load_tls_config(&listener).await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
        assert!(err.to_string().contains("Certificate"));
    }

    #[tokio::test]
    async fn test_missing_key() {
        let dir = tempfile::tempdir().unwrap();
        let cert = dir.path().join("cert.pem");
        std::fs::write(&cert, "not really a cert").unwrap();

        let listener = ListenerConfig {
            https: true,
            cert_path: cert.to_string_lossy().into_owned(),
            key_path: dir.path().join("key.pem").to_string_lossy().into_owned(),
            ..ListenerConfig::default()
        };
        let err = load_tls_config(&listener).await.unwrap_err();
        assert!(err.to_string().contains("Private key"));
    }
}
