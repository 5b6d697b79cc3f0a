//! API entry points and the login redirect hook.

use crate::config::ClientConfig;
use std::sync::Mutex;

/// Which API surface a transport talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Session {
    /// Regular user session
    User,
    /// Administrative session
    Admin,
}

impl Session {
    /// Where the UI should send the user when this session is rejected.
    pub const fn login_path(self) -> &'static str {
        match self {
            Session::User => "/login",
            Session::Admin => "/admin/login",
        }
    }

    pub(crate) fn prefix(self, config: &ClientConfig) -> &str {
        match self {
            Session::User => &config.api_prefix,
            Session::Admin => &config.admin_prefix,
        }
    }
}

/// Receives the "not authenticated" signal.
///
/// Called once per 401 response, before the failing call returns. The
/// transport does not wait for any navigation the handler starts.
pub trait LoginRedirect: Send + Sync {
    fn redirect(&self, login_path: &str);
}

/// Ignores the signal.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRedirect;

impl LoginRedirect for NoRedirect {
    fn redirect(&self, _login_path: &str) {}
}

/// Remembers every login path it was asked to open.
#[derive(Debug, Default)]
pub struct RecordingRedirect {
    paths: Mutex<Vec<String>>,
}

impl RecordingRedirect {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths requested so far, oldest first.
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().map(|p| p.clone()).unwrap_or_default()
    }

    /// Most recent path, if any.
    pub fn last(&self) -> Option<String> {
        self.paths.lock().ok().and_then(|p| p.last().cloned())
    }
}

impl LoginRedirect for RecordingRedirect {
    fn redirect(&self, login_path: &str) {
        if let Ok(mut paths) = self.paths.lock() {
            paths.push(login_path.to_string());
        }
    }
}
