mod common;
mod flog;

pub mod prelude {
    use std::io::{self, Read, Write};
    use std::os::fd::OwnedFd;

    /// A writer which accepts at most `chunk` bytes per call, and fails the first call with
    /// Interrupted if asked to.
    pub struct ChunkedWriter {
        pub chunk: usize,
        pub interrupt_once: bool,
        pub calls: usize,
        pub data: Vec<u8>,
    }

    impl ChunkedWriter {
        pub fn new(chunk: usize) -> Self {
            ChunkedWriter {
                chunk,
                interrupt_once: false,
                calls: 0,
                data: vec![],
            }
        }
    }

    impl Write for ChunkedWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.calls += 1;
            if self.interrupt_once {
                self.interrupt_once = false;
                return Err(io::ErrorKind::Interrupted.into());
            }
            let n = buf.len().min(self.chunk);
            self.data.extend_from_slice(&buf[..n]);
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Read everything from the read end of a pipe, once all write ends are closed.
    pub fn read_all(fd: OwnedFd) -> String {
        let mut out = String::new();
        std::fs::File::from(fd).read_to_string(&mut out).unwrap();
        out
    }
}
