// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Decoding of `struct signalfd_siginfo` records.

use core::fmt;

use crate::{SigError, SigResult, Signo, signal_name};

/// Size of one record read from a signal descriptor.
pub const SIGINFO_SIZE: usize = 128;

/// Bytes reserved by the kernel at the end of each record.
pub const SIGINFO_PAD_SIZE: usize = 48;

const _: () = assert!(size_of::<libc::signalfd_siginfo>() == SIGINFO_SIZE);

/// One signal occurrence read from a signal descriptor.
///
/// Field meanings follow `signalfd(2)`; which ones are filled in depends on
/// the signal and on how it was sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignalInfo {
    signo: u32,
    errno: i32,
    code: i32,
    pid: u32,
    uid: u32,
    fd: i32,
    tid: u32,
    band: u32,
    overrun: u32,
    trapno: u32,
    status: i32,
    int_value: i32,
    ptr_value: u64,
    user_time: u64,
    system_time: u64,
    fault_addr: u64,
    padding: [u8; SIGINFO_PAD_SIZE],
}

/// Sequential native-endian reader over a record that is known to be
/// exactly [`SIGINFO_SIZE`] bytes long.
struct RecordReader<'a> {
    buf: &'a [u8; SIGINFO_SIZE],
    pos: usize,
}

impl RecordReader<'_> {
    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0; N];
        out.copy_from_slice(&self.buf[self.pos..self.pos + N]);
        self.pos += N;
        out
    }

    fn u32(&mut self) -> u32 {
        u32::from_ne_bytes(self.take())
    }

    fn i32(&mut self) -> i32 {
        i32::from_ne_bytes(self.take())
    }

    fn u64(&mut self) -> u64 {
        u64::from_ne_bytes(self.take())
    }
}

impl SignalInfo {
    /// Decode a record.
    ///
    /// `buf` must be exactly [`SIGINFO_SIZE`] bytes; anything else, such as a
    /// truncated read, is [`SigError::MalformedRecord`].
    pub fn decode(buf: &[u8]) -> SigResult<Self> {
        let buf: &[u8; SIGINFO_SIZE] = buf
            .try_into()
            .map_err(|_| SigError::MalformedRecord { len: buf.len() })?;
        let mut r = RecordReader { buf, pos: 0 };
        Ok(Self {
            signo: r.u32(),
            errno: r.i32(),
            code: r.i32(),
            pid: r.u32(),
            uid: r.u32(),
            fd: r.i32(),
            tid: r.u32(),
            band: r.u32(),
            overrun: r.u32(),
            trapno: r.u32(),
            status: r.i32(),
            int_value: r.i32(),
            ptr_value: r.u64(),
            user_time: r.u64(),
            system_time: r.u64(),
            fault_addr: r.u64(),
            padding: r.take(),
        })
    }

    /// Canonical name of the signal, e.g. `"SIGTERM"`.
    pub fn signal_name(&self) -> SigResult<&'static str> {
        signal_name(self.signo)
    }

    /// The signal as a [`Signo`], if it has a canonical name.
    pub fn signo_enum(&self) -> Option<Signo> {
        Signo::from_repr(self.signo)
    }

    /// Signal number.
    pub fn signo(&self) -> u32 {
        self.signo
    }

    /// Error number; unused by Linux.
    pub fn errno(&self) -> i32 {
        self.errno
    }

    /// Signal code (`SI_USER`, `SI_QUEUE`, `CLD_EXITED`, ...).
    pub fn code(&self) -> i32 {
        self.code
    }

    /// PID of the sender.
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Real UID of the sender.
    pub fn uid(&self) -> u32 {
        self.uid
    }

    /// File descriptor (`SIGIO`).
    pub fn fd(&self) -> i32 {
        self.fd
    }

    /// Kernel timer ID (POSIX timers).
    pub fn tid(&self) -> u32 {
        self.tid
    }

    /// Band event (`SIGIO`).
    pub fn band(&self) -> u32 {
        self.band
    }

    /// POSIX timer overrun count.
    pub fn overrun(&self) -> u32 {
        self.overrun
    }

    /// Trap number that caused the signal.
    pub fn trapno(&self) -> u32 {
        self.trapno
    }

    /// Exit status or signal (`SIGCHLD`).
    pub fn status(&self) -> i32 {
        self.status
    }

    /// Integer sent by `sigqueue(3)`.
    pub fn int_value(&self) -> i32 {
        self.int_value
    }

    /// Pointer sent by `sigqueue(3)`.
    pub fn ptr_value(&self) -> u64 {
        self.ptr_value
    }

    /// User CPU time consumed (`SIGCHLD`).
    pub fn user_time(&self) -> u64 {
        self.user_time
    }

    /// System CPU time consumed (`SIGCHLD`).
    pub fn system_time(&self) -> u64 {
        self.system_time
    }

    /// Address that generated the signal (hardware-generated signals).
    pub fn fault_addr(&self) -> u64 {
        self.fault_addr
    }

    /// Reserved tail of the record, as read.
    pub fn padding(&self) -> &[u8; SIGINFO_PAD_SIZE] {
        &self.padding
    }
}

impl fmt::Display for SignalInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.signo_enum() {
            Some(signo) => write!(f, "{}", signo.name())?,
            None => write!(f, "signal {}", self.signo)?,
        }
        write!(f, " (code {}, pid {}, uid {})", self.code, self.pid, self.uid)
    }
}
