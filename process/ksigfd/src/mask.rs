// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Signal mask control via `rt_sigprocmask(2)`.

use core::ptr;

use libc::c_long;
use linux_raw_sys::general::{SIG_BLOCK, SIG_SETMASK, SIG_UNBLOCK};

use crate::{SigError, SigResult, SignalSet};

/// Size of the kernel sigset passed to the signal syscalls.
pub(crate) const KERNEL_SIGSET_SIZE: usize = size_of::<u64>();

/// How [`Sigmask::set`] combines the given set with the current mask.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SigmaskHow {
    /// Add the signals to the blocked set.
    Block   = SIG_BLOCK,
    /// Remove the signals from the blocked set.
    Unblock = SIG_UNBLOCK,
    /// Replace the blocked set.
    SetMask = SIG_SETMASK,
}

/// Handle to the signal mask of the calling thread.
///
/// The kernel keeps one blocked set per thread and every new thread starts
/// with a copy of its creator's. Changing it from the main thread before any
/// other thread is spawned therefore sets the mask for the whole process.
/// All handles refer to the same kernel state; holding several of them does
/// not give separate masks, and nothing is restored when a handle is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sigmask {
    _private: (),
}

impl Sigmask {
    /// Handle for the calling thread's mask.
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Apply `set` according to `how` and return the previous mask.
    ///
    /// An empty set leaves the mask unchanged for [`SigmaskHow::Block`] and
    /// [`SigmaskHow::Unblock`] and clears it for [`SigmaskHow::SetMask`].
    pub fn set(&self, how: SigmaskHow, set: &SignalSet) -> SigResult<SignalSet> {
        debug!("sigprocmask <= how: {how:?}, set: {set:?}");
        set.check_blockable()?;
        rt_sigprocmask(how as u32, Some(set))
    }

    /// Add `set` to the blocked signals.
    pub fn block(&self, set: &SignalSet) -> SigResult<SignalSet> {
        self.set(SigmaskHow::Block, set)
    }

    /// Remove `set` from the blocked signals.
    pub fn unblock(&self, set: &SignalSet) -> SigResult<SignalSet> {
        self.set(SigmaskHow::Unblock, set)
    }

    /// Make `set` the blocked signals.
    pub fn replace(&self, set: &SignalSet) -> SigResult<SignalSet> {
        self.set(SigmaskHow::SetMask, set)
    }

    /// The currently blocked signals.
    pub fn current(&self) -> SigResult<SignalSet> {
        rt_sigprocmask(SIG_BLOCK, None)
    }
}

fn rt_sigprocmask(how: u32, set: Option<&SignalSet>) -> SigResult<SignalSet> {
    let set_ptr = set.map_or(ptr::null(), |s| s as *const SignalSet);
    let mut old = SignalSet::new();
    // SAFETY: both pointers refer to live 8-byte kernel sigsets.
    let ret = unsafe {
        libc::syscall(
            libc::SYS_rt_sigprocmask,
            how as c_long,
            set_ptr,
            &mut old as *mut SignalSet,
            KERNEL_SIGSET_SIZE as c_long,
        )
    };
    if ret < 0 {
        let err = SigError::last_os_error("rt_sigprocmask");
        warn!("sigprocmask rejected: {err}");
        return Err(err);
    }
    Ok(old)
}
