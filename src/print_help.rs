//! Helper for executables (not builtins) to print a help message.
//! Uses the fish in PATH, not necessarily the matching fish binary.

use crate::common::{write_loop_to, FdWriter};
use crate::flog::FLOG;
use nix::sys::signal::{sigaction, SaFlags, SigAction, SigHandler, SigSet, Signal};
use std::io::{self, Write};
use std::os::unix::process::CommandExt;
use std::path::PathBuf;
use std::process::{Command, ExitStatus};

/// Capacity of the command line, including the terminating NUL.
pub const CMD_LEN: usize = 1024;

pub const HELP_ERR: &str = "Could not show help message\n";

/// Something that can run a command line through a command interpreter and wait for it.
pub trait HelpShell {
    /// Run `cmdline` to completion.
    /// An error means the interpreter itself could not be started; a failing
    /// command is still `Ok`.
    fn system(&mut self, cmdline: &str) -> io::Result<ExitStatus>;
}

/// Runs command lines through `<interpreter> -c`, like system(3): SIGINT and SIGQUIT are
/// ignored while waiting, and restored in the child.
#[derive(Debug, Clone)]
pub struct SystemShell {
    interpreter: PathBuf,
}

impl SystemShell {
    pub fn new(interpreter: impl Into<PathBuf>) -> Self {
        SystemShell {
            interpreter: interpreter.into(),
        }
    }
}

impl Default for SystemShell {
    fn default() -> Self {
        SystemShell::new("/bin/sh")
    }
}

impl HelpShell for SystemShell {
    fn system(&mut self, cmdline: &str) -> io::Result<ExitStatus> {
        FLOG!(help, "Running", cmdline, "with", self.interpreter.display());
        let ignored = IgnoreInterrupts::new();
        let saved = ignored.saved.clone();
        let mut cmd = Command::new(&self.interpreter);
        cmd.args(["-c", cmdline]);
        // Only async-signal-safe calls between fork and exec.
        unsafe {
            cmd.pre_exec(move || {
                for (sig, old) in &saved {
                    sigaction(*sig, old)?;
                }
                Ok(())
            });
        }
        cmd.status()
    }
}

/// Ignores SIGINT and SIGQUIT until dropped, so an interrupt meant for the help pager does not
/// kill us while it runs.
struct IgnoreInterrupts {
    saved: Vec<(Signal, SigAction)>,
}

impl IgnoreInterrupts {
    fn new() -> Self {
        let ignore = SigAction::new(SigHandler::SigIgn, SaFlags::empty(), SigSet::empty());
        let saved = [Signal::SIGINT, Signal::SIGQUIT]
            .into_iter()
            .filter_map(|sig| {
                unsafe { sigaction(sig, &ignore) }
                    .ok()
                    .map(|old| (sig, old))
            })
            .collect();
        IgnoreInterrupts { saved }
    }
}

impl Drop for IgnoreInterrupts {
    fn drop(&mut self) {
        for (sig, old) in &self.saved {
            let _ = unsafe { sigaction(*sig, old) };
        }
    }
}

/// Return the command line which prints help for `command`, or None if it would not fit in
/// [`CMD_LEN`].
pub fn help_cmdline(command: &str) -> Option<String> {
    let cmd = format!("fish -c '__fish_print_help {}'", command);
    if cmd.len() < CMD_LEN {
        Some(cmd)
    } else {
        None
    }
}

/// Print the help for `command`, reporting on stderr if no shell could be started.
pub fn print_help(command: &str) {
    print_help_with(&mut SystemShell::default(), &mut FdWriter::stderr(), command)
}

/// Print the help for `command` using `shell`, writing the diagnostic to `err` on launch failure.
/// The exit status of the help command is ignored.
pub fn print_help_with<S, W>(shell: &mut S, err: &mut W, command: &str)
where
    S: HelpShell + ?Sized,
    W: Write + ?Sized,
{
    // Overlong command lines are skipped without a diagnostic.
    let Some(cmd) = help_cmdline(command) else {
        FLOG!(help, "Command line too long, not showing help for", command.len(), "byte name");
        return;
    };

    match shell.system(&cmd) {
        Ok(status) => {
            FLOG!(help, "Help command", cmd, "finished with", status);
        }
        Err(e) => {
            FLOG!(help, "Could not run", cmd, "-", e);
            let _ = write_loop_to(err, HELP_ERR.as_bytes());
        }
    }
}
