// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Error types for signal mask, signalfd and record decoding operations.

use std::io;

/// Errors returned by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigError {
    /// The signal number is out of range or cannot be blocked.
    InvalidSignal(u32),
    /// The kernel rejected a system call.
    Syscall {
        /// Name of the failing call.
        call: &'static str,
        /// Raw OS error code.
        errno: i32,
    },
    /// A signalfd record was not exactly [`SIGINFO_SIZE`](crate::SIGINFO_SIZE) bytes.
    MalformedRecord {
        /// Length of the rejected buffer.
        len: usize,
    },
    /// The signal number has no canonical name.
    UnknownSignal(u32),
}

impl SigError {
    /// Capture `errno` of the last failed call.
    pub(crate) fn last_os_error(call: &'static str) -> Self {
        let errno = io::Error::last_os_error().raw_os_error().unwrap_or(0);
        SigError::Syscall { call, errno }
    }

    /// The raw OS error code, if this is a system call failure.
    pub fn raw_os_error(&self) -> Option<i32> {
        match self {
            SigError::Syscall { errno, .. } => Some(*errno),
            _ => None,
        }
    }

    /// A non-blocking descriptor had nothing to read.
    pub fn is_would_block(&self) -> bool {
        matches!(self.raw_os_error(), Some(libc::EAGAIN))
    }

    /// The call was interrupted by a signal handler and may be retried.
    pub fn is_interrupted(&self) -> bool {
        matches!(self.raw_os_error(), Some(libc::EINTR))
    }
}

impl core::fmt::Display for SigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SigError::InvalidSignal(signo) => write!(f, "invalid signal number {signo}"),
            SigError::Syscall { call, errno } => {
                write!(f, "{call} failed: {}", io::Error::from_raw_os_error(*errno))
            }
            SigError::MalformedRecord { len } => {
                write!(f, "malformed signalfd record: expected 128 bytes, got {len}")
            }
            SigError::UnknownSignal(signo) => write!(f, "no name for signal {signo}"),
        }
    }
}

impl std::error::Error for SigError {}

impl From<SigError> for io::Error {
    fn from(e: SigError) -> Self {
        match e {
            SigError::Syscall { errno, .. } => io::Error::from_raw_os_error(errno),
            SigError::MalformedRecord { .. } => io::Error::new(io::ErrorKind::InvalidData, e),
            SigError::InvalidSignal(_) | SigError::UnknownSignal(_) => {
                io::Error::new(io::ErrorKind::InvalidInput, e)
            }
        }
    }
}

/// Result type for signal operations.
pub type SigResult<T = ()> = Result<T, SigError>;
