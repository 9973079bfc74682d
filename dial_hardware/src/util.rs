use std::os::fd::BorrowedFd;
use std::time::Duration;

use nix::errno::Errno;
use nix::poll::{PollFd, PollFlags, PollTimeout, poll};

use crate::error::{HwError, Result};

/// Wait until `fd` is readable (or has hung up), or a timeout expires.
///
/// Returns `Ok(false)` on timeout and when the wait was interrupted by a
/// signal, so callers get a chance to look at their shutdown flag. Timeouts
/// longer than `u16::MAX` ms are clamped; callers poll in a loop anyway.
pub fn wait_readable(fd: BorrowedFd<'_>, timeout: Duration) -> Result<bool> {
    let ms = u16::try_from(timeout.as_millis()).unwrap_or(u16::MAX);
    let mut fds = [PollFd::new(fd, PollFlags::POLLIN)];
    match poll(&mut fds, PollTimeout::from(ms)) {
        Ok(n) => Ok(n > 0),
        Err(Errno::EINTR) => Ok(false),
        Err(e) => Err(HwError::Io(e.into())),
    }
}
