// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Canonical signal names.

use strum::{EnumIter, EnumString, FromRepr, IntoStaticStr};

use crate::{SigError, SigResult};

/// Highest signal number understood by the kernel (`_NSIG`).
pub const NSIG: u32 = linux_raw_sys::general::_NSIG;

/// Signals with a canonical name.
///
/// Covers the standard Linux signals plus the two real-time markers as seen
/// by C library users (`SIGRTMIN` is 34 because the C library reserves 32
/// and 33 for itself).
#[allow(non_camel_case_types, missing_docs)]
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, FromRepr, IntoStaticStr)]
pub enum Signo {
    SIGHUP    = 1,
    SIGINT    = 2,
    SIGQUIT   = 3,
    SIGILL    = 4,
    SIGTRAP   = 5,
    SIGABRT   = 6,
    SIGBUS    = 7,
    SIGFPE    = 8,
    SIGKILL   = 9,
    SIGUSR1   = 10,
    SIGSEGV   = 11,
    SIGUSR2   = 12,
    SIGPIPE   = 13,
    SIGALRM   = 14,
    SIGTERM   = 15,
    SIGSTKFLT = 16,
    SIGCHLD   = 17,
    SIGCONT   = 18,
    SIGSTOP   = 19,
    SIGTSTP   = 20,
    SIGTTIN   = 21,
    SIGTTOU   = 22,
    SIGURG    = 23,
    SIGXCPU   = 24,
    SIGXFSZ   = 25,
    SIGVTALRM = 26,
    SIGPROF   = 27,
    SIGWINCH  = 28,
    SIGIO     = 29,
    SIGPWR    = 30,
    SIGSYS    = 31,
    SIGRTMIN  = 34,
    SIGRTMAX  = 64,
}

impl Signo {
    /// Canonical name, e.g. `"SIGTERM"`.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Signals the kernel never lets a process block or catch.
    pub fn is_unblockable(self) -> bool {
        matches!(self, Signo::SIGKILL | Signo::SIGSTOP)
    }

    /// Whether the signal lies in the real-time range.
    pub fn is_realtime(self) -> bool {
        self as u32 > 31
    }
}

impl From<Signo> for u32 {
    fn from(signo: Signo) -> Self {
        signo as u32
    }
}

impl TryFrom<u32> for Signo {
    type Error = SigError;

    fn try_from(signo: u32) -> SigResult<Self> {
        Signo::from_repr(signo).ok_or(SigError::UnknownSignal(signo))
    }
}

/// Look up the canonical name of `signo`.
///
/// Numbers without an entry in the table are reported as
/// [`SigError::UnknownSignal`].
pub fn signal_name(signo: u32) -> SigResult<&'static str> {
    Signo::try_from(signo).map(Signo::name)
}

/// Parse a signal given as a number (`"15"`) or a name with or without the
/// `SIG` prefix (`"SIGTERM"`, `"term"`).
///
/// Numbers are returned as-is; range checks happen when they are added to a
/// [`SignalSet`](crate::SignalSet).
pub fn parse_signal(s: &str) -> Option<u32> {
    let s = s.trim();
    if let Ok(signo) = s.parse::<u32>() {
        return Some(signo);
    }
    let upper = s.to_ascii_uppercase();
    let name = if upper.starts_with("SIG") {
        upper
    } else {
        format!("SIG{upper}")
    };
    name.parse::<Signo>().ok().map(u32::from)
}
