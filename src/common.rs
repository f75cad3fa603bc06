//! Prototypes for functions shared by the help helper and its executable.

use once_cell::sync::OnceCell;
use std::io::{self, Write};
use std::os::fd::{AsRawFd, BorrowedFd, RawFd};

/// Name of the current program. Should be set at startup. Used by the debug library.
pub static PROGRAM_NAME: OnceCell<&'static str> = OnceCell::new();

/// Return the program name, or a placeholder if it has not been set.
pub fn program_name() -> &'static str {
    PROGRAM_NAME.get().copied().unwrap_or("fish_print_help")
}

/// Write all of `buf` to `fd`, repeating on short writes and on EINTR / EAGAIN.
///
/// Returns the number of bytes written or an IO error.
pub fn write_loop<Fd: AsRawFd>(fd: &Fd, buf: &[u8]) -> io::Result<usize> {
    let fd = fd.as_raw_fd();
    let mut total = 0;
    while total < buf.len() {
        match nix::unistd::write(unsafe { BorrowedFd::borrow_raw(fd) }, &buf[total..]) {
            Ok(0) => return Err(io::ErrorKind::WriteZero.into()),
            Ok(written) => {
                total += written;
            }
            Err(err) => {
                if matches!(err, nix::Error::EAGAIN | nix::Error::EINTR) {
                    continue;
                }
                return Err(io::Error::from(err));
            }
        }
    }
    Ok(total)
}

/// Like [`write_loop`], but for any writer whose `write()` may accept only part of the buffer.
///
/// Unlike `Write::write_all`, WouldBlock is retried as well as Interrupted.
pub fn write_loop_to<W: Write + ?Sized>(out: &mut W, buf: &[u8]) -> io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match out.write(&buf[total..]) {
            Ok(0) => return Err(io::ErrorKind::WriteZero.into()),
            Ok(written) => {
                total += written;
            }
            Err(err) => {
                if matches!(
                    err.kind(),
                    io::ErrorKind::Interrupted | io::ErrorKind::WouldBlock
                ) {
                    continue;
                }
                return Err(err);
            }
        }
    }
    Ok(total)
}

/// An unbuffered writer over a borrowed file descriptor.
/// Each `write()` is a single write(2), so it may be partial.
#[derive(Debug, Clone, Copy)]
pub struct FdWriter(pub RawFd);

impl FdWriter {
    pub fn stdout() -> Self {
        FdWriter(libc::STDOUT_FILENO)
    }

    pub fn stderr() -> Self {
        FdWriter(libc::STDERR_FILENO)
    }
}

impl Write for FdWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        nix::unistd::write(unsafe { BorrowedFd::borrow_raw(self.0) }, buf).map_err(io::Error::from)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl AsRawFd for FdWriter {
    fn as_raw_fd(&self) -> RawFd {
        self.0
    }
}

/// Format the arguments and write them fully to the given fd, ignoring errors.
#[macro_export]
macro_rules! fd_write {
    ($fd:expr, $($arg:tt)*) => {{
        let s = format!($($arg)*);
        let _ = $crate::common::write_loop(&$fd, s.as_bytes());
    }};
}

/// Write to stderr, like `eprint!` but through [`write_loop`].
#[macro_export]
macro_rules! eprintf {
    ($($arg:tt)*) => {
        $crate::fd_write!($crate::common::FdWriter::stderr(), $($arg)*)
    };
}

/// Write to stdout, like `print!` but through [`write_loop`].
#[macro_export]
macro_rules! printf {
    ($($arg:tt)*) => {
        $crate::fd_write!($crate::common::FdWriter::stdout(), $($arg)*)
    };
}
