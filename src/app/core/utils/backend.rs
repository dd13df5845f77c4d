// SPDX-License-Identifier: GPL-3.0

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Display servers the application window can be opened on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayBackend {
    Wayland,
    X11,
    /// The platform's own windowing (macOS, Windows, Redox)
    Native,
}

impl fmt::Display for DisplayBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayBackend::Wayland => write!(f, "Wayland"),
            DisplayBackend::X11 => write!(f, "X11"),
            DisplayBackend::Native => write!(f, "native"),
        }
    }
}

impl DisplayBackend {
    /// Candidates for this platform, in the order they're tried
    pub fn candidates() -> &'static [Self] {
        if cfg!(any(
            target_os = "linux",
            target_os = "freebsd",
            target_os = "openbsd",
            target_os = "netbsd",
            target_os = "dragonfly"
        )) {
            &[Self::Wayland, Self::X11]
        } else {
            &[Self::Native]
        }
    }

    fn is_available<E, X>(&self, session: &Session<E, X>) -> bool
    where
        E: Fn(&str) -> Option<OsString>,
        X: Fn(&Path) -> bool,
    {
        match self {
            // Without WAYLAND_DISPLAY clients connect to the default socket
            DisplayBackend::Wayland => {
                session.is_set("WAYLAND_DISPLAY")
                    || session
                        .var("XDG_RUNTIME_DIR")
                        .map(|dir| PathBuf::from(dir).join(DEFAULT_WAYLAND_SOCKET))
                        .is_some_and(|socket| (session.exists)(&socket))
            }
            DisplayBackend::X11 => session.is_set("DISPLAY"),
            DisplayBackend::Native => true,
        }
    }
}

const DEFAULT_WAYLAND_SOCKET: &str = "wayland-0";

/// Environment variables and filesystem of the running session
struct Session<E, X> {
    env: E,
    exists: X,
}

impl<E, X> Session<E, X>
where
    E: Fn(&str) -> Option<OsString>,
    X: Fn(&Path) -> bool,
{
    fn var(&self, key: &str) -> Option<OsString> {
        (self.env)(key).filter(|value| !value.is_empty())
    }

    fn is_set(&self, key: &str) -> bool {
        self.var(key).is_some()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error(
    "no display backend available (tried {tried}), run deckhand inside a Wayland compositor or an X11 session"
)]
pub struct BackendError {
    tried: String,
}

/// First available candidate, looking the environment up through `env` and
/// sockets up through `exists`
pub fn probe_with(
    candidates: &[DisplayBackend],
    env: impl Fn(&str) -> Option<OsString>,
    exists: impl Fn(&Path) -> bool,
) -> Result<DisplayBackend, BackendError> {
    let session = Session { env, exists };

    candidates
        .iter()
        .copied()
        .find(|backend| backend.is_available(&session))
        .ok_or_else(|| BackendError {
            tried: candidates
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", "),
        })
}

/// First available display backend of this session
pub fn probe() -> Result<DisplayBackend, BackendError> {
    probe_with(
        DisplayBackend::candidates(),
        |key| std::env::var_os(key),
        |path| path.exists(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIX: [DisplayBackend; 2] = [DisplayBackend::Wayland, DisplayBackend::X11];

    fn env_of(vars: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<OsString> {
        move |key| {
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| OsString::from(value))
        }
    }

    fn no_socket(_: &Path) -> bool {
        false
    }

    #[test]
    fn prefers_wayland() {
        let env = env_of(&[("WAYLAND_DISPLAY", "wayland-0"), ("DISPLAY", ":0")]);
        assert_eq!(probe_with(&UNIX, env, no_socket), Ok(DisplayBackend::Wayland));
    }

    #[test]
    fn falls_back_to_x11() {
        let env = env_of(&[("DISPLAY", ":0")]);
        assert_eq!(probe_with(&UNIX, env, no_socket), Ok(DisplayBackend::X11));
    }

    #[test]
    fn empty_variable_does_not_count() {
        let env = env_of(&[("WAYLAND_DISPLAY", ""), ("DISPLAY", ":1")]);
        assert_eq!(probe_with(&UNIX, env, no_socket), Ok(DisplayBackend::X11));
    }

    #[test]
    fn fails_when_nothing_is_available() {
        let err = probe_with(&UNIX, env_of(&[]), no_socket).unwrap_err();
        assert!(err.to_string().contains("tried Wayland, X11"));
    }

    #[test]
    fn native_is_always_available() {
        assert_eq!(
            probe_with(&[DisplayBackend::Native], env_of(&[]), no_socket),
            Ok(DisplayBackend::Native)
        );
    }

    #[test]
    fn default_wayland_socket_counts_without_wayland_display() {
        let env = env_of(&[("XDG_RUNTIME_DIR", "/run/user/1000")]);
        let socket = |path: &Path| path == Path::new("/run/user/1000/wayland-0");

        assert_eq!(probe_with(&UNIX, env, socket), Ok(DisplayBackend::Wayland));
    }

    #[test]
    fn runtime_dir_without_socket_is_not_wayland() {
        let env = env_of(&[("XDG_RUNTIME_DIR", "/run/user/1000"), ("DISPLAY", ":0")]);

        assert_eq!(probe_with(&UNIX, env, no_socket), Ok(DisplayBackend::X11));
    }
}
