// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 KylinSoft Co., Ltd. <https://www.kylinos.cn/>
// See LICENSES for license details.

//! Colored, timestamped logger for the `log` facade.
//!
//! Log lines go to stderr so they never interleave with program output
//! written through [`kprintln!`].

extern crate log;

use std::{
    fmt::{self, Write as _},
    io::{self, Write},
    str::FromStr,
    sync::Mutex,
};

use log::{Level, LevelFilter, Log, Metadata, Record};
pub use log::{debug, error, info, trace, warn};

#[macro_export]
macro_rules! kprint {
    ($($arg:tt)*) => {
        $crate::print_fmt(format_args!($($arg)*))
    }
}

#[macro_export]
macro_rules! kprintln {
    () => { $crate::kprint!("\n") };
    ($($arg:tt)*) => {
        $crate::print_fmt(format_args!("{}\n", format_args!($($arg)*)))
    }
}

macro_rules! color_fmt {
    ($color_code:expr, $($arg:tt)*) => {
        format_args!("\u{1B}[{}m{}\u{1B}[m", $color_code as u8, format_args!($($arg)*))
    };
}

#[repr(u8)]
enum AnsiColor {
    Red         = 31,
    Green       = 32,
    Yellow      = 33,
    Cyan        = 36,
    White       = 37,
    BrightBlack = 90,
}

static OUTPUT_LOCK: Mutex<()> = Mutex::new(());

struct TermLogger;

impl Log for TermLogger {
    #[inline]
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = record.line().unwrap_or(0);
        let path = record.target();
        let color = match record.level() {
            Level::Error => AnsiColor::Red,
            Level::Warn => AnsiColor::Yellow,
            Level::Info => AnsiColor::Green,
            Level::Debug => AnsiColor::Cyan,
            Level::Trace => AnsiColor::BrightBlack,
        };

        let mut buf = String::new();
        let _ = writeln!(
            buf,
            "{}",
            color_fmt!(
                AnsiColor::White,
                "[{time} {path}:{line}] {args}",
                time = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.6f"),
                args = color_fmt!(color, "{}", record.args()),
            )
        );

        let _guard = OUTPUT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let _ = io::stderr().write_all(buf.as_bytes());
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// Write formatted program output to stdout.
pub fn print_fmt(args: fmt::Arguments) -> io::Result<()> {
    let _guard = OUTPUT_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    let mut out = io::stdout().lock();
    out.write_fmt(args)?;
    out.flush()
}

/// Install the logger with the default `warn` level.
///
/// Fails if another logger is already installed.
pub fn init_klogger() -> Result<(), log::SetLoggerError> {
    log::set_logger(&TermLogger)?;
    log::set_max_level(LevelFilter::Warn);
    Ok(())
}

/// Set the maximum level from a name such as `"info"` or `"trace"`.
///
/// Unrecognised names turn logging off.
pub fn set_log_level(level: &str) {
    let lf = LevelFilter::from_str(level)
        .ok()
        .unwrap_or(LevelFilter::Off);
    log::set_max_level(lf);
}
