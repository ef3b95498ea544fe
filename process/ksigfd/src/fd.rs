// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Signal file descriptors via `signalfd4(2)`.
//!
//! Descriptors returned here are plain [`RawFd`]s owned by the caller, who
//! closes them with [`close_signalfd`] (or any other `close(2)` wrapper).

use std::os::fd::RawFd;

use bitflags::bitflags;
use libc::{SFD_CLOEXEC, SFD_NONBLOCK, c_long};

use crate::{
    SIGINFO_SIZE, SigError, SigResult, SignalInfo, SignalSet, Sigmask, mask::KERNEL_SIGSET_SIZE,
};

bitflags! {
    /// Creation flags for [`signalfd`].
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct SfdFlags: u32 {
        /// Close the descriptor on `execve(2)`.
        const CLOEXEC = SFD_CLOEXEC as u32;
        /// Reads fail with `EAGAIN` instead of waiting for a signal.
        const NONBLOCK = SFD_NONBLOCK as u32;
    }
}

/// Create a signal descriptor for `set`, or rebind `existing` to it.
///
/// Rebinding keeps the descriptor number and only changes which signals it
/// reports. The signals must already be blocked (see [`Sigmask`]), otherwise
/// they are delivered the usual way and never show up on the descriptor.
pub fn signalfd(existing: Option<RawFd>, set: &SignalSet, flags: SfdFlags) -> SigResult<RawFd> {
    debug!("signalfd <= fd: {existing:?}, set: {set:?}, flags: {flags:?}");
    set.check_blockable()?;

    let fd = existing.unwrap_or(-1);
    // SAFETY: `set` is a live 8-byte kernel sigset.
    let ret = unsafe {
        libc::syscall(
            libc::SYS_signalfd4,
            fd as c_long,
            set as *const SignalSet,
            KERNEL_SIGSET_SIZE as c_long,
            flags.bits() as c_long,
        )
    };
    if ret < 0 {
        let err = SigError::last_os_error("signalfd4");
        warn!("signalfd rejected: {err}");
        return Err(err);
    }
    Ok(ret as RawFd)
}

/// Block `set` and create a new descriptor for it.
pub fn create_signalfd(set: &SignalSet, flags: SfdFlags) -> SigResult<RawFd> {
    Sigmask::new().block(set)?;
    signalfd(None, set, flags)
}

/// Read and decode one record from a signal descriptor.
///
/// `EAGAIN` on a non-blocking descriptor and `EINTR` are returned as
/// [`SigError::Syscall`]; see [`SigError::is_would_block`] and
/// [`SigError::is_interrupted`]. Retrying is up to the caller.
pub fn read_signalfd(fd: RawFd) -> SigResult<SignalInfo> {
    let mut buf = [0u8; SIGINFO_SIZE];
    // SAFETY: `buf` is valid for `SIGINFO_SIZE` bytes of writes.
    let n = unsafe { libc::read(fd, buf.as_mut_ptr().cast(), buf.len()) };
    if n < 0 {
        return Err(SigError::last_os_error("read"));
    }
    let info = SignalInfo::decode(&buf[..n as usize])?;
    trace!("read_signalfd => fd: {fd}, signo: {}", info.signo());
    Ok(info)
}

/// Close a descriptor returned by [`signalfd`].
pub fn close_signalfd(fd: RawFd) -> SigResult {
    debug!("close_signalfd <= fd: {fd}");
    // SAFETY: closing an integer descriptor has no memory-safety requirements.
    if unsafe { libc::close(fd) } < 0 {
        return Err(SigError::last_os_error("close"));
    }
    Ok(())
}
