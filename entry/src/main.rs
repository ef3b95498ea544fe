// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! `sigwatch`: block a set of signals and print every occurrence read from a
//! signal descriptor.

#[macro_use]
extern crate log;

use std::{os::fd::RawFd, process::ExitCode};

use clap::Parser;
use klogger::kprintln;
use ksigfd::{
    SfdFlags, SigError, SigResult, SignalInfo, SignalSet, Sigmask, close_signalfd, parse_signal,
    read_signalfd, signalfd,
};

#[derive(Debug, Parser)]
#[command(name = "sigwatch", version, about)]
struct Args {
    /// Signals to watch, by number or name (`15`, `SIGTERM`, `term`).
    #[arg(required = true, value_parser = parse_signo)]
    signals: Vec<u32>,

    /// Open the descriptor non-blocking and wait with poll(2).
    #[arg(long)]
    nonblock: bool,

    /// Close the descriptor on exec.
    #[arg(long)]
    cloexec: bool,

    /// Exit after this many signals.
    #[arg(short = 'n', long)]
    count: Option<u64>,

    /// Log level (`off`, `error`, `warn`, `info`, `debug`, `trace`).
    #[arg(long, env = "SIGWATCH_LOG", default_value = "warn")]
    log_level: String,
}

fn parse_signo(s: &str) -> Result<u32, String> {
    parse_signal(s).ok_or_else(|| format!("unknown signal `{s}`"))
}

fn main() -> ExitCode {
    let args = Args::parse();
    if let Err(e) = klogger::init_klogger() {
        eprintln!("sigwatch: cannot install logger: {e}");
    }
    klogger::set_log_level(&args.log_level);
    debug!("{args:?}");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> SigResult {
    let set = SignalSet::try_from_signals(args.signals.iter().copied())?;
    let mut flags = SfdFlags::empty();
    flags.set(SfdFlags::NONBLOCK, args.nonblock);
    flags.set(SfdFlags::CLOEXEC, args.cloexec);

    // No other thread exists yet, so this is the mask of the whole process.
    let mask = Sigmask::new();
    let original = mask.block(&set)?;
    let fd = match signalfd(None, &set, flags) {
        Ok(fd) => fd,
        Err(e) => {
            mask.replace(&original)?;
            return Err(e);
        }
    };
    info!("watching {set:?} on fd {fd} (pid {})", std::process::id());

    let result = watch(fd, args.nonblock, args.count);
    let closed = close_signalfd(fd);
    mask.replace(&original)?;
    result.and(closed)
}

fn watch(fd: RawFd, nonblock: bool, count: Option<u64>) -> SigResult {
    let mut seen = 0;
    while count.is_none_or(|n| seen < n) {
        if nonblock {
            wait_readable(fd)?;
        }
        let info = match read_signalfd(fd) {
            Ok(info) => info,
            Err(e) if e.is_interrupted() || e.is_would_block() => {
                debug!("retrying read: {e}");
                continue;
            }
            Err(e) => return Err(e),
        };
        seen += 1;
        print_record(&info);
    }
    Ok(())
}

fn print_record(info: &SignalInfo) {
    let printed = kprintln!(
        "{info}: status {} int {} ptr {:#x} utime {} stime {} addr {:#x}",
        info.status(),
        info.int_value(),
        info.ptr_value(),
        info.user_time(),
        info.system_time(),
        info.fault_addr(),
    );
    if let Err(e) = printed {
        warn!("cannot write record: {e}");
    }
}

fn wait_readable(fd: RawFd) -> SigResult {
    let mut pfd = libc::pollfd {
        fd,
        events: libc::POLLIN,
        revents: 0,
    };
    loop {
        // SAFETY: `pfd` is a single valid pollfd.
        if unsafe { libc::poll(&mut pfd, 1, -1) } >= 0 {
            return Ok(());
        }
        let errno = std::io::Error::last_os_error().raw_os_error().unwrap_or(0);
        if errno != libc::EINTR {
            return Err(SigError::Syscall {
                call: "poll",
                errno,
            });
        }
    }
}
