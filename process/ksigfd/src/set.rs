// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Kernel signal sets.

use core::fmt;

use crate::{NSIG, SigError, SigResult, Signo};

/// A set of signal numbers in `1..=NSIG`.
///
/// Stored in the kernel's sigset layout: bit `n - 1` stands for signal `n`.
#[repr(transparent)]
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct SignalSet(u64);

impl SignalSet {
    /// The empty set.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Every signal that can be blocked, i.e. all but SIGKILL and SIGSTOP.
    pub const fn full() -> Self {
        const KILL: u64 = 1 << (Signo::SIGKILL as u32 - 1);
        const STOP: u64 = 1 << (Signo::SIGSTOP as u32 - 1);
        Self(u64::MAX & !KILL & !STOP)
    }

    /// Wrap a raw kernel sigset word.
    pub const fn from_bits(bits: u64) -> Self {
        Self(bits)
    }

    /// The raw kernel sigset word.
    pub const fn bits(&self) -> u64 {
        self.0
    }

    /// Build a set from signal numbers, failing on the first out-of-range one.
    pub fn try_from_signals<I>(signals: I) -> SigResult<Self>
    where
        I: IntoIterator<Item = u32>,
    {
        let mut set = Self::new();
        for signo in signals {
            set.add(signo)?;
        }
        Ok(set)
    }

    fn bit(signo: u32) -> SigResult<u64> {
        if (1..=NSIG).contains(&signo) {
            Ok(1 << (signo - 1))
        } else {
            Err(SigError::InvalidSignal(signo))
        }
    }

    /// Add `signo`. Returns `false` if it was already a member.
    pub fn add(&mut self, signo: u32) -> SigResult<bool> {
        let bit = Self::bit(signo)?;
        let added = self.0 & bit == 0;
        self.0 |= bit;
        Ok(added)
    }

    /// Remove `signo`. Returns `false` if it was not a member.
    pub fn remove(&mut self, signo: u32) -> SigResult<bool> {
        let bit = Self::bit(signo)?;
        let removed = self.0 & bit != 0;
        self.0 &= !bit;
        Ok(removed)
    }

    /// Whether `signo` is a member. Out-of-range numbers never are.
    pub fn contains(&self, signo: u32) -> bool {
        Self::bit(signo).is_ok_and(|bit| self.0 & bit != 0)
    }

    /// Whether the set has no members.
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Number of members.
    pub const fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members of both sets.
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Members of `self` that are not in `other`.
    pub const fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// Signal numbers in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        (1..=NSIG).filter(move |&signo| self.contains(signo))
    }

    /// Reject signals the kernel would silently refuse to block.
    pub(crate) fn check_blockable(&self) -> SigResult {
        for signo in [Signo::SIGKILL, Signo::SIGSTOP] {
            if self.contains(signo.into()) {
                return Err(SigError::InvalidSignal(signo.into()));
            }
        }
        Ok(())
    }
}

impl From<Signo> for SignalSet {
    fn from(signo: Signo) -> Self {
        Self(1 << (signo as u32 - 1))
    }
}

impl FromIterator<Signo> for SignalSet {
    fn from_iter<T: IntoIterator<Item = Signo>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::new(), |set, signo| set.union(signo.into()))
    }
}

impl fmt::Debug for SignalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut list = f.debug_set();
        for signo in self.iter() {
            match Signo::from_repr(signo) {
                Some(s) => list.entry(&s),
                None => list.entry(&signo),
            };
        }
        list.finish()
    }
}
