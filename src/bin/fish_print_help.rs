//! Show the documentation for a fish command, via `__fish_print_help` in the fish found in PATH.

use std::fs::OpenOptions;
use std::ops::ControlFlow;
use std::os::fd::IntoRawFd;

use fish_print_help::{
    common::{program_name, PROGRAM_NAME},
    eprintf,
    flog::{self, activate_flog_categories_by_pattern, set_flog_file_fd},
    getopt::{
        lopt, ArgType, Getopter, LongOpt, MISSING_ARGUMENT, UNEXPECTED_ARGUMENT, UNKNOWN_OPTION,
    },
    print_help::print_help,
    printf,
};

const USAGE: &str = "Usage: fish_print_help [-d CATEGORIES] [-o FILE] COMMAND\n";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    OwnHelp,
    Version,
    DebugCategories,
    ShowHelp(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Options {
    mode: Mode,
    /// Patterns passed to -d, in order.
    debug_categories: Vec<String>,
    /// File path for debug output.
    debug_output: Option<String>,
}

fn parse_flags(args: &[String]) -> ControlFlow<i32, Options> {
    let short_opts: &str = "hvd:o:";
    let long_opts: &[LongOpt] = &[
        lopt("help", ArgType::NoArgument, 'h'),
        lopt("version", ArgType::NoArgument, 'v'),
        lopt("debug", ArgType::RequiredArgument, 'd'),
        lopt("debug-output", ArgType::RequiredArgument, 'o'),
        lopt("print-debug-categories", ArgType::NoArgument, 'P'),
    ];

    let mut want_help = false;
    let mut want_version = false;
    let mut want_categories = false;
    let mut debug_categories = vec![];
    let mut debug_output = None;

    let mut w = Getopter::new(short_opts, long_opts, args);
    while let Some(opt) = w.next_opt() {
        match opt {
            'h' => want_help = true,
            'v' => want_version = true,
            'P' => want_categories = true,
            'd' => debug_categories.push(w.optarg.unwrap_or_default().to_owned()),
            'o' => debug_output = w.optarg.map(str::to_owned),
            UNKNOWN_OPTION | MISSING_ARGUMENT | UNEXPECTED_ARGUMENT => {
                let problem = match opt {
                    UNKNOWN_OPTION => "unknown option",
                    MISSING_ARGUMENT => "option requires an argument",
                    _ => "option does not take an argument",
                };
                eprintf!("{}: {}: {}\n", program_name(), w.bad_opt, problem);
                eprintf!("{}", USAGE);
                return ControlFlow::Break(1);
            }
            _ => panic!("unexpected option {:?}", opt),
        }
    }

    let mode = if want_help {
        Mode::OwnHelp
    } else if want_version {
        Mode::Version
    } else if want_categories {
        Mode::DebugCategories
    } else {
        match w.operands() {
            [command] => Mode::ShowHelp(command.to_string()),
            operands => {
                eprintf!("Expected 1 argument, got {}\n", operands.len());
                eprintf!("{}", USAGE);
                return ControlFlow::Break(1);
            }
        }
    };

    ControlFlow::Continue(Options {
        mode,
        debug_categories,
        debug_output,
    })
}

/// One line per debug category: its name, padded, then its description.
fn debug_categories_listing() -> String {
    let cats = flog::categories::all_categories();
    let name_width = cats.iter().map(|cat| cat.name.len()).max().unwrap_or(0);
    cats.iter()
        .map(|cat| format!("{:width$} {}\n", cat.name, cat.description, width = name_width))
        .collect()
}

fn run(opts: Options) -> i32 {
    for pattern in &opts.debug_categories {
        activate_flog_categories_by_pattern(pattern);
    }

    // Direct any debug output right away.
    if let Some(debug_output) = &opts.debug_output {
        match OpenOptions::new().append(true).create(true).open(debug_output) {
            Ok(file) => set_flog_file_fd(file.into_raw_fd()),
            Err(e) => {
                eprintf!("Could not open file {}: {}\n", debug_output, e);
                return 1;
            }
        }
    }

    match opts.mode {
        Mode::OwnHelp => print_help("fish_print_help"),
        Mode::Version => printf!(
            "{}, version {}\n",
            program_name(),
            fish_print_help::BUILD_VERSION
        ),
        Mode::DebugCategories => printf!("{}", debug_categories_listing()),
        Mode::ShowHelp(command) => print_help(&command),
    }
    0
}

fn main() {
    let _ = PROGRAM_NAME.set("fish_print_help");
    std::process::exit(throwing_main())
}

fn throwing_main() -> i32 {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match parse_flags(&args) {
        ControlFlow::Continue(opts) => run(opts),
        ControlFlow::Break(status) => status,
    }
}
