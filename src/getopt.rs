//! A getopt-style option scanner for `&str` arguments.
//!
//! Options may be clustered (`-vd foo`, `-dfoo`), long options may be abbreviated to any unique
//! prefix and take their argument either as `--name=value` or as the following element.
//! Non-option elements are collected in order and handed back by [`Getopter::operands`]; a `--`
//! element ends option scanning.

/// Returned for an unknown or ambiguous option.
pub const UNKNOWN_OPTION: char = '?';
/// Returned when an option requiring an argument has none.
pub const MISSING_ARGUMENT: char = ':';
/// Returned for `--name=value` when `name` takes no argument.
pub const UNEXPECTED_ARGUMENT: char = ';';

/// Whether an option takes an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArgType {
    #[default]
    NoArgument,
    RequiredArgument,
}

/// A long-named option.
#[derive(Debug, Clone, Copy)]
pub struct LongOpt<'a> {
    pub name: &'a str,
    pub arg_type: ArgType,
    /// Returned by [`Getopter::next_opt`] when this option is found.
    pub val: char,
}

pub const fn lopt(name: &str, arg_type: ArgType, val: char) -> LongOpt<'_> {
    LongOpt {
        name,
        arg_type,
        val,
    }
}

enum LongOptMatch<'a> {
    Found(LongOpt<'a>),
    Ambiguous,
    NoMatch,
}

pub struct Getopter<'opts, 'args> {
    /// The arguments, not including the program name.
    argv: &'args [String],
    /// Short options; a letter followed by `:` requires an argument.
    shortopts: &'opts str,
    longopts: &'opts [LongOpt<'opts>],
    /// Index of the next element of `argv` to scan.
    index: usize,
    /// The rest of the short option cluster being scanned.
    remaining_text: &'args str,
    operands: Vec<&'args str>,
    /// The argument of the option last returned, if it takes one.
    pub optarg: Option<&'args str>,
    /// The offending option, as written, after an error return.
    pub bad_opt: String,
}

impl<'opts, 'args> Getopter<'opts, 'args> {
    pub fn new(shortopts: &'opts str, longopts: &'opts [LongOpt], argv: &'args [String]) -> Self {
        Getopter {
            argv,
            shortopts,
            longopts,
            index: 0,
            remaining_text: "",
            operands: vec![],
            optarg: None,
            bad_opt: String::new(),
        }
    }

    /// Return the next option character, one of the error characters
    /// ([`UNKNOWN_OPTION`], [`MISSING_ARGUMENT`], [`UNEXPECTED_ARGUMENT`]), or None when all
    /// options have been scanned.
    pub fn next_opt(&mut self) -> Option<char> {
        self.optarg = None;
        let argv = self.argv;
        if self.remaining_text.is_empty() {
            loop {
                let arg = argv.get(self.index)?;
                self.index += 1;
                if arg == "--" {
                    self.operands
                        .extend(argv[self.index..].iter().map(String::as_str));
                    self.index = argv.len();
                    return None;
                }
                if let Some(long) = arg.strip_prefix("--") {
                    return Some(self.handle_long_opt(long));
                }
                if arg.len() > 1 && arg.starts_with('-') {
                    self.remaining_text = &arg[1..];
                    break;
                }
                self.operands.push(arg);
            }
        }
        Some(self.handle_short_opt())
    }

    /// The non-option elements, in order. Only complete once `next_opt` has returned None.
    pub fn operands(&self) -> &[&'args str] {
        &self.operands
    }

    fn handle_short_opt(&mut self) -> char {
        let mut chars = self.remaining_text.chars();
        let Some(c) = chars.next() else {
            return UNKNOWN_OPTION;
        };
        self.remaining_text = chars.as_str();

        let shortopts = self.shortopts;
        let spec = match shortopts.find(c) {
            Some(pos) if c != ':' => &shortopts[pos + c.len_utf8()..],
            _ => {
                self.bad_opt = format!("-{}", c);
                return UNKNOWN_OPTION;
            }
        };
        if !spec.starts_with(':') {
            return c;
        }

        // The argument is the rest of this element, or else the next one.
        if !self.remaining_text.is_empty() {
            self.optarg = Some(self.remaining_text);
            self.remaining_text = "";
        } else if let Some(next) = self.argv.get(self.index) {
            self.optarg = Some(next.as_str());
            self.index += 1;
        } else {
            self.bad_opt = format!("-{}", c);
            return MISSING_ARGUMENT;
        }
        c
    }

    fn find_matching_long_opt(&self, name: &str) -> LongOptMatch<'opts> {
        if let Some(opt) = self.longopts.iter().find(|opt| opt.name == name) {
            return LongOptMatch::Found(*opt);
        }
        let mut candidates = self.longopts.iter().filter(|opt| opt.name.starts_with(name));
        match (candidates.next(), candidates.next()) {
            (Some(opt), None) => LongOptMatch::Found(*opt),
            (Some(_), Some(_)) => LongOptMatch::Ambiguous,
            (None, _) => LongOptMatch::NoMatch,
        }
    }

    fn handle_long_opt(&mut self, text: &'args str) -> char {
        let (name, value) = match text.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (text, None),
        };

        let opt = match self.find_matching_long_opt(name) {
            LongOptMatch::Found(opt) => opt,
            LongOptMatch::Ambiguous | LongOptMatch::NoMatch => {
                self.bad_opt = format!("--{}", name);
                return UNKNOWN_OPTION;
            }
        };

        match (opt.arg_type, value) {
            (ArgType::NoArgument, Some(_)) => {
                self.bad_opt = format!("--{}", opt.name);
                return UNEXPECTED_ARGUMENT;
            }
            (ArgType::NoArgument, None) => {}
            (ArgType::RequiredArgument, Some(value)) => self.optarg = Some(value),
            (ArgType::RequiredArgument, None) => match self.argv.get(self.index) {
                Some(next) => {
                    self.optarg = Some(next.as_str());
                    self.index += 1;
                }
                None => {
                    self.bad_opt = format!("--{}", opt.name);
                    return MISSING_ARGUMENT;
                }
            },
        }
        opt.val
    }
}
