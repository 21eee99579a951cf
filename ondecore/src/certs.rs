//! TLS certificate lookup.

use std::path::{Path, PathBuf};

/// Resolves the certificate and key a frontend should serve TLS with.
pub trait CertificateProvider: Send + Sync {
    /// Returns `(certificate_path, key_path)`.
    ///
    /// The paths are handed to the frontend configuration as-is; the
    /// frontend itself reports an error if they do not exist yet.
    fn certificate_paths(&self) -> (PathBuf, PathBuf);
}

/// Certificates maintained by the ACME helper under a shared directory.
#[derive(Debug, Clone)]
pub struct AcmeCertificates {
    acme_dir: PathBuf,
}

impl AcmeCertificates {
    pub fn new(acme_dir: impl Into<PathBuf>) -> Self {
        Self {
            acme_dir: acme_dir.into(),
        }
    }

    pub fn acme_dir(&self) -> &Path {
        &self.acme_dir
    }
}

impl CertificateProvider for AcmeCertificates {
    fn certificate_paths(&self) -> (PathBuf, PathBuf) {
        (
            self.acme_dir.join("ssl.crt"),
            self.acme_dir.join("ssl.key"),
        )
    }
}
