use crate::common::{program_name, write_loop, write_loop_to, FdWriter};
use crate::tests::prelude::*;
use std::io::{self, Write};

#[test]
fn test_write_loop_to_short_writes() {
    let mut out = ChunkedWriter::new(3);
    let msg = b"Could not show help message\n";
    assert_eq!(write_loop_to(&mut out, msg).unwrap(), msg.len());
    assert_eq!(out.data, msg);
    assert_eq!(out.calls, (msg.len() + 2) / 3);
}

#[test]
fn test_write_loop_to_retries_interrupted() {
    let mut out = ChunkedWriter::new(1);
    out.interrupt_once = true;
    assert_eq!(write_loop_to(&mut out, b"abc").unwrap(), 3);
    assert_eq!(out.data, b"abc");
    assert_eq!(out.calls, 4);
}

#[test]
fn test_write_loop_to_zero_write() {
    let mut out = ChunkedWriter::new(0);
    let err = write_loop_to(&mut out, b"abc").unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::WriteZero);

    // Nothing to write is not an error.
    assert_eq!(write_loop_to(&mut out, b"").unwrap(), 0);
}

#[test]
fn test_write_loop_fd() {
    let (read_end, write_end) = nix::unistd::pipe().unwrap();
    let msg = "hello from write_loop\n".repeat(100);
    assert_eq!(write_loop(&write_end, msg.as_bytes()).unwrap(), msg.len());
    drop(write_end);
    assert_eq!(read_all(read_end), msg);
}

#[test]
fn test_write_loop_bad_fd() {
    // The read end of a pipe is not writable.
    let (read_end, _write_end) = nix::unistd::pipe().unwrap();
    let err = write_loop(&read_end, b"x").unwrap_err();
    assert_eq!(err.raw_os_error(), Some(libc::EBADF));
}

#[test]
fn test_fd_writer() {
    use std::os::fd::AsRawFd;
    let (read_end, write_end) = nix::unistd::pipe().unwrap();
    let mut w = FdWriter(write_end.as_raw_fd());
    w.write_all(b"abc").unwrap();
    writeln!(w, "{}", 42).unwrap();
    drop(write_end);
    assert_eq!(read_all(read_end), "abc42\n");
}

#[test]
fn test_program_name_default() {
    // Tests never set PROGRAM_NAME.
    assert_eq!(program_name(), "fish_print_help");
}
