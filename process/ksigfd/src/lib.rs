// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Signal masks and signal file descriptors for Linux processes.
//!
//! The usual flow is:
//!
//! 1. build a [`SignalSet`] of the signals to collect,
//! 2. block them with [`Sigmask::block`] so they are not delivered
//!    asynchronously,
//! 3. bind a descriptor to them with [`signalfd`],
//! 4. poll/read the descriptor and turn every 128-byte record into a
//!    [`SignalInfo`].
//!
//! [`create_signalfd`] and [`read_signalfd`] fold steps 2-3 and step 4 into
//! single calls.
#![warn(missing_docs)]

#[macro_use]
extern crate log;

cfg_if::cfg_if! {
    if #[cfg(target_os = "linux")] {
        mod fd;
        mod mask;
        pub use fd::*;
        pub use mask::*;
    } else {
        compile_error!("ksigfd requires Linux signalfd(2)");
    }
}

mod error;
pub use error::*;

mod info;
pub use info::*;

mod set;
pub use set::*;

mod signo;
pub use signo::*;
