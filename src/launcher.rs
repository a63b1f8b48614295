//! Backend process launcher - spawns and tears down the sidecar
//!
//! The data backend ships as a separate executable named with the host
//! target triple. The launcher locates the right binary for the platform,
//! starts it with suppressed stdio, and on exit sends a best-effort
//! shutdown request before killing the process.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::process::{Child, Command};

use crate::constants::SIDECAR_STEM;
use crate::gateway::client;

#[cfg(target_os = "windows")]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Errors raised while managing the backend process
#[derive(Debug, Error)]
pub enum LauncherError {
    #[error("backend executable not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to start backend: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Owns the backend child process for the application lifetime
pub struct BackendLauncher {
    child: Option<Child>,
    base_url: String,
}

impl BackendLauncher {
    /// Spawn the sidecar found in `backend_dir`
    pub fn start(backend_dir: &Path, base_url: String) -> Result<Self, LauncherError> {
        let path = sidecar_path(backend_dir);
        if !path.exists() {
            return Err(LauncherError::NotFound(path));
        }

        tracing::info!(path = %path.display(), "starting backend");

        let mut command = Command::new(&path);
        command
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .kill_on_drop(true);

        #[cfg(target_os = "windows")]
        command.creation_flags(CREATE_NO_WINDOW);

        let child = command.spawn()?;
        Ok(BackendLauncher {
            child: Some(child),
            base_url,
        })
    }

    /// Ask the backend to shut down, then kill the process.
    ///
    /// The shutdown request is fire-and-forget; the kill is the guarantee.
    pub async fn shutdown(mut self) {
        let http = client::create_client();
        client::shutdown(&http, &self.base_url).await;

        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill().await {
                tracing::warn!(error = %e, "failed to kill backend process");
            }
        }
    }
}

/// Path of the platform-specific sidecar inside `backend_dir`
pub fn sidecar_path(backend_dir: &Path) -> PathBuf {
    backend_dir.join(sidecar_file_name(
        SIDECAR_STEM,
        &host_triple(),
        std::env::consts::EXE_SUFFIX,
    ))
}

/// Compose the sidecar file name from stem, triple and executable suffix
pub fn sidecar_file_name(stem: &str, triple: &str, exe_suffix: &str) -> String {
    format!("{}-{}{}", stem, triple, exe_suffix)
}

/// Target triple of the host, as used in sidecar file names
pub fn host_triple() -> String {
    let arch = std::env::consts::ARCH;
    match std::env::consts::OS {
        "windows" => {
            let env = if cfg!(target_env = "gnu") { "gnu" } else { "msvc" };
            format!("{}-pc-windows-{}", arch, env)
        }
        "macos" => format!("{}-apple-darwin", arch),
        os => {
            let env = if cfg!(target_env = "musl") { "musl" } else { "gnu" };
            format!("{}-unknown-{}-{}", arch, os, env)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_triple_starts_with_arch() {
        let triple = host_triple();
        assert!(triple.starts_with(std::env::consts::ARCH));
        assert_eq!(triple.split('-').count(), if cfg!(target_os = "macos") { 3 } else { 4 });
    }

    #[test]
    fn sidecar_file_name_embeds_triple_and_suffix() {
        assert_eq!(
            sidecar_file_name("apppy", "x86_64-unknown-linux-gnu", ""),
            "apppy-x86_64-unknown-linux-gnu"
        );
        assert_eq!(
            sidecar_file_name("apppy", "x86_64-pc-windows-msvc", ".exe"),
            "apppy-x86_64-pc-windows-msvc.exe"
        );
    }

    #[test]
    fn missing_sidecar_is_reported_not_spawned() {
        let dir = tempfile::tempdir().unwrap();
        let err = BackendLauncher::start(dir.path(), "http://127.0.0.1:5000".to_string());
        assert!(matches!(err, Err(LauncherError::NotFound(_))));
    }
}
