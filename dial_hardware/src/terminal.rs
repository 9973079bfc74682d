//! Keyboard input from a terminal (or any readable fd).
//!
//! While a poll is in progress the terminal runs in cbreak mode (no line
//! buffering, no echo). The previous mode is restored when the poll returns,
//! on every path, by [`RawModeGuard`].
use std::collections::VecDeque;
use std::fs::File;
use std::io::{IsTerminal, Read};
use std::os::fd::{AsFd, BorrowedFd, OwnedFd};
use std::time::Duration;

use dial_traits::{KeyEvent, KeyInput};
use nix::errno::Errno;
use nix::sys::termios::{LocalFlags, SetArg, SpecialCharacterIndices, Termios, tcgetattr, tcsetattr};
use tracing::trace;

use crate::error::{HwError, Result};
use crate::keys::KeyDecoder;
use crate::util::wait_readable;

/// Scoped cbreak mode. Restores the saved attributes on drop.
pub struct RawModeGuard<'fd> {
    fd: BorrowedFd<'fd>,
    saved: Termios,
}

impl<'fd> RawModeGuard<'fd> {
    pub fn acquire(fd: BorrowedFd<'fd>) -> Result<Self> {
        let saved = tcgetattr(fd).map_err(|e| termios_error("tcgetattr", e))?;

        let mut cbreak = saved.clone();
        cbreak.local_flags.remove(LocalFlags::ICANON | LocalFlags::ECHO);
        cbreak.control_chars[SpecialCharacterIndices::VMIN as usize] = 1;
        cbreak.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;
        // TCSANOW keeps keys typed between polls
        tcsetattr(fd, SetArg::TCSANOW, &cbreak).map_err(|e| termios_error("tcsetattr", e))?;
        Ok(Self { fd, saved })
    }
}

/// EIO from a termios call means the terminal was hung up.
fn termios_error(op: &str, e: Errno) -> HwError {
    match e {
        Errno::EIO => HwError::InputClosed,
        e => HwError::Terminal(format!("{op}: {e}")),
    }
}

impl Drop for RawModeGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = tcsetattr(self.fd, SetArg::TCSADRAIN, &self.saved) {
            tracing::warn!(error = %e, "failed to restore terminal mode");
        }
    }
}

/// [`KeyInput`] over a file descriptor, normally a duplicate of stdin.
///
/// Terminal modes are only touched when the fd is a tty; piped input is read
/// as-is, which lets a calibration be scripted.
pub struct TerminalKeys {
    input: File,
    is_tty: bool,
    decoder: KeyDecoder,
    pending: VecDeque<KeyEvent>,
}

impl TerminalKeys {
    pub fn stdin() -> Result<Self> {
        let fd = std::io::stdin().as_fd().try_clone_to_owned()?;
        Ok(Self::from_fd(fd))
    }

    pub fn from_fd(fd: impl Into<OwnedFd>) -> Self {
        let input = File::from(fd.into());
        let is_tty = input.is_terminal();
        Self {
            input,
            is_tty,
            decoder: KeyDecoder::new(),
            pending: VecDeque::new(),
        }
    }

    pub fn is_tty(&self) -> bool {
        self.is_tty
    }

    fn poll_fd(&mut self, timeout: Duration) -> Result<Option<KeyEvent>> {
        if let Some(ev) = self.pending.pop_front() {
            return Ok(Some(ev));
        }
        let _guard = if self.is_tty {
            Some(RawModeGuard::acquire(self.input.as_fd())?)
        } else {
            None
        };
        if !wait_readable(self.input.as_fd(), timeout)? {
            return Ok(None);
        }
        // `File` reads are single unbuffered read(2) calls
        let mut buf = [0u8; 32];
        let n = match (&self.input).read(&mut buf) {
            Ok(0) => return Err(HwError::InputClosed),
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => return Ok(None),
            // a tty whose other side hung up reports EIO
            Err(e) if self.is_tty && e.raw_os_error() == Some(Errno::EIO as i32) => {
                return Err(HwError::InputClosed);
            }
            Err(e) => return Err(HwError::Io(e)),
        };
        trace!(bytes = n, "key input");
        self.pending.extend(self.decoder.feed_all(&buf[..n]));
        Ok(self.pending.pop_front())
    }
}

impl KeyInput for TerminalKeys {
    fn poll(
        &mut self,
        timeout: Duration,
    ) -> std::result::Result<Option<KeyEvent>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.poll_fd(timeout)?)
    }
}
