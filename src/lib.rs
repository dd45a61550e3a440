//! Declarative command-line argument parsing.
//!
//! A caller builds an [InterfaceDesc] describing the flags, value options and
//! positional arguments a program accepts, then hands it the argument vector.
//! The parser binds every argument to the slot it was declared for, renders a
//! formatted help screen for `-h`/`--help`, and reports malformed input with
//! a single-line diagnostic.
//!
//! We provide:
//! * Short options, grouped short options (`-Uo out.txt`), long options with
//!   attached (`--output=out.txt`) or separate values, `--` to end option
//!   scanning, and a variable-length argument tail.
//! * Formatting of decent looking help messages, with `-h`/`--help` built in.
//! * A pure parsing core that never touches the process: terminating on
//!   errors and help is confined to [InterfaceDesc::parse_or_exit].
//!
//! We *do not* provide:
//! * Repeated or multi-valued options. Specifying an option twice silently
//!   overwrites the earlier value.
//! * Subcommands, environment-variable fallbacks or localized messages.
//!
//! # Examples
//!
//! ```rust
//! use clargs::{InterfaceDesc, ParseOutcome};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut desc = InterfaceDesc::new("copy");
//! desc.help_header("copy - copy a file, optionally uppercasing it");
//! let uppercase = desc.flag(Some('U'), None, "Make the output uppercase");
//! let output = desc.value(Some('o'), Some("output"), Some("file"), "Output file name");
//! let input = desc.positional("input-file", "Input file name");
//!
//! let matches = match desc.parse(["-U", "--output=out.txt", "in.txt"])? {
//!     ParseOutcome::Matches(matches) => matches,
//!     ParseOutcome::Help => return Ok(()),
//! };
//!
//! assert!(matches.flag(uppercase));
//! assert_eq!(matches.value(output), Some("out.txt"));
//! assert_eq!(matches.positional(input), "in.txt");
//! # Ok(()) }
//! ```
//!
//! In a binary the usual entry point is [InterfaceDesc::parse_or_exit], which
//! reads [std::env::args], prints help or an `error:` diagnostic as needed,
//! and only returns when every argument was bound.

#![deny(missing_docs)]

use std::error;
use std::fmt;
use std::iter::Peekable;
use std::process;

mod help;

pub use self::help::Help;

/// An error raised while parsing an argument vector.
#[derive(Debug)]
pub struct Error {
    kind: Box<ErrorKind>,
}

impl Error {
    /// Construct a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind: Box::new(kind),
        }
    }

    /// Access the underlying error kind.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind.as_ref() {
            ErrorKind::UnknownOption { token } => {
                write!(f, "unknown option `{}`", token)
            }
            ErrorKind::UnexpectedValue { option } => {
                write!(f, "unexpected value for flag `{}`", option)
            }
            ErrorKind::MissingValue { option } => {
                write!(f, "missing value for option `{}`", option)
            }
            ErrorKind::ArgumentCountMismatch { expected, found } => {
                write!(
                    f,
                    "unexpected number of arguments (expected {}, found {})",
                    expected, found
                )
            }
        }
    }
}

impl error::Error for Error {}

/// The kind of a parse error.
///
/// Every kind is fatal: parsing is all-or-nothing and the first error ends
/// the scan.
#[derive(Debug)]
pub enum ErrorKind {
    /// A token that looks like an option matched no registered name.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let mut desc = clargs::InterfaceDesc::new("tool");
    /// desc.flag(Some('v'), Some("verbose"), "Verbose output");
    ///
    /// let error = desc.parse(["--bogus"]).unwrap_err();
    /// assert!(matches!(error.kind(), clargs::ErrorKind::UnknownOption { .. }));
    /// ```
    UnknownOption {
        /// The offending token, exactly as given.
        token: Box<str>,
    },
    /// A flag was given an attached `=value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let mut desc = clargs::InterfaceDesc::new("tool");
    /// desc.flag(Some('v'), Some("verbose"), "Verbose output");
    ///
    /// let error = desc.parse(["--verbose=yes"]).unwrap_err();
    /// assert!(matches!(error.kind(), clargs::ErrorKind::UnexpectedValue { .. }));
    /// ```
    UnexpectedValue {
        /// The flag that was given a value, rendered with its dashes.
        option: Box<str>,
    },
    /// A value option reached the end of the arguments, or `--`, without a
    /// value to consume.
    ///
    /// # Examples
    ///
    /// ```rust
    /// let mut desc = clargs::InterfaceDesc::new("tool");
    /// desc.value(Some('o'), Some("output"), None, "Output file name");
    ///
    /// let error = desc.parse(["--output"]).unwrap_err();
    /// assert!(matches!(error.kind(), clargs::ErrorKind::MissingValue { .. }));
    /// ```
    MissingValue {
        /// The option that was missing its value, rendered with its dashes.
        option: Box<str>,
    },
    /// The wrong number of positional tokens remained after option scanning.
    ///
    /// Too few is always an error. Too many is an error unless a tail was
    /// configured with [InterfaceDesc::tail].
    ///
    /// # Examples
    ///
    /// ```rust
    /// let mut desc = clargs::InterfaceDesc::new("tool");
    /// desc.positional("input-file", "Input file name");
    ///
    /// let error = desc.parse(["a", "b"]).unwrap_err();
    /// assert!(matches!(
    ///     error.kind(),
    ///     clargs::ErrorKind::ArgumentCountMismatch { expected: 1, found: 2 }
    /// ));
    /// ```
    ArgumentCountMismatch {
        /// The number of declared positional arguments.
        expected: usize,
        /// The number of positional tokens that remained.
        found: usize,
    },
}

/// Handle to a registered option, returned by [InterfaceDesc::flag] and
/// [InterfaceDesc::value] and used to read the result out of [Matches].
#[derive(Debug, Clone, Copy)]
pub struct OptId(usize);

/// Handle to a registered positional argument, returned by
/// [InterfaceDesc::positional].
#[derive(Debug, Clone, Copy)]
pub struct ArgId(usize);

#[derive(Debug, Clone, Copy)]
enum OptKind {
    Flag,
    Value,
}

struct Opt {
    short: Option<char>,
    long: Option<Box<str>>,
    description: Box<str>,
    value_name: Option<Box<str>>,
    kind: OptKind,
}

impl Opt {
    /// The option rendered with its dashes, for diagnostics. The long name is
    /// preferred when both are registered.
    fn display_name(&self) -> Box<str> {
        match (&self.long, self.short) {
            (Some(long), _) => format!("--{}", long).into(),
            (None, Some(short)) => format!("-{}", short).into(),
            (None, None) => unreachable!("options have at least one name"),
        }
    }
}

struct Pos {
    name: Box<str>,
    description: Box<str>,
}

struct Tail {
    name: Option<Box<str>>,
}

/// The outcome of a successful scan over an argument vector.
#[derive(Debug)]
pub enum ParseOutcome {
    /// Every option and positional argument was bound.
    Matches(Matches),
    /// `-h` or `--help` was encountered. The rest of the argument vector was
    /// abandoned; the caller should display [InterfaceDesc::help] and stop.
    Help,
}

#[derive(Debug)]
enum Binding {
    Flag(bool),
    Value(Option<String>),
}

/// The arguments bound by a parse, read back through the handles returned at
/// registration.
#[derive(Debug)]
pub struct Matches {
    bindings: Vec<Binding>,
    positional: Vec<String>,
    tail: Vec<String>,
}

impl Matches {
    /// Whether the given flag was present.
    ///
    /// # Panics
    ///
    /// Panics if `id` refers to a value option.
    pub fn flag(&self, id: OptId) -> bool {
        match &self.bindings[id.0] {
            Binding::Flag(present) => *present,
            Binding::Value(..) => panic!("option takes a value, use `Matches::value`"),
        }
    }

    /// The value bound to the given option, or `None` if it was absent.
    ///
    /// # Panics
    ///
    /// Panics if `id` refers to a flag.
    pub fn value(&self, id: OptId) -> Option<&str> {
        match &self.bindings[id.0] {
            Binding::Value(value) => value.as_deref(),
            Binding::Flag(..) => panic!("option is a flag, use `Matches::flag`"),
        }
    }

    /// The token bound to the given positional argument.
    pub fn positional(&self, id: ArgId) -> &str {
        &self.positional[id.0]
    }

    /// The tokens bound to the tail, in order. Empty when no tail was
    /// configured or no tokens remained beyond the declared positionals.
    pub fn tail(&self) -> &[String] {
        &self.tail
    }
}

/// The declarative description of a command-line interface.
///
/// Options and positional arguments are registered in the order they should
/// be matched and displayed. The descriptor is immutable during parsing and
/// can be reused across any number of [parse][InterfaceDesc::parse] calls.
pub struct InterfaceDesc {
    program_name: Box<str>,
    help_header: Option<Box<str>>,
    help_footer: Option<Box<str>>,
    opts: Vec<Opt>,
    positional: Vec<Pos>,
    tail: Option<Tail>,
}

impl InterfaceDesc {
    /// Construct an empty descriptor. The program name is used in the usage
    /// line and in diagnostics.
    pub fn new(program_name: &str) -> Self {
        Self {
            program_name: program_name.into(),
            help_header: None,
            help_footer: None,
            opts: Vec::new(),
            positional: Vec::new(),
            tail: None,
        }
    }

    /// Free-form text printed before the usage line of the help screen.
    pub fn help_header(&mut self, text: &str) {
        self.help_header = Some(text.into());
    }

    /// Free-form text printed after the option listing of the help screen.
    pub fn help_footer(&mut self, text: &str) {
        self.help_footer = Some(text.into());
    }

    /// Register a presence-only flag.
    ///
    /// # Panics
    ///
    /// Panics if neither a short nor a long name is given.
    pub fn flag(&mut self, short: Option<char>, long: Option<&str>, description: &str) -> OptId {
        self.push_opt(Opt {
            short,
            long: long.map(Into::into),
            description: description.into(),
            value_name: None,
            kind: OptKind::Flag,
        })
    }

    /// Register an option taking exactly one value. `value_name` is only used
    /// in the help text and defaults to `value`.
    ///
    /// # Panics
    ///
    /// Panics if neither a short nor a long name is given.
    pub fn value(
        &mut self,
        short: Option<char>,
        long: Option<&str>,
        value_name: Option<&str>,
        description: &str,
    ) -> OptId {
        self.push_opt(Opt {
            short,
            long: long.map(Into::into),
            description: description.into(),
            value_name: value_name.map(Into::into),
            kind: OptKind::Value,
        })
    }

    fn push_opt(&mut self, opt: Opt) -> OptId {
        assert!(
            opt.short.is_some() || opt.long.is_some(),
            "an option needs a short or a long name"
        );
        self.opts.push(opt);
        OptId(self.opts.len() - 1)
    }

    /// Register a required positional argument. Registration order is the
    /// order tokens are consumed in.
    pub fn positional(&mut self, name: &str, description: &str) -> ArgId {
        self.positional.push(Pos {
            name: name.into(),
            description: description.into(),
        });
        ArgId(self.positional.len() - 1)
    }

    /// Accept a variable-length tail of positional tokens beyond the declared
    /// ones, available through [Matches::tail]. `name` is only used in the
    /// usage line.
    pub fn tail(&mut self, name: Option<&str>) {
        self.tail = Some(Tail {
            name: name.map(Into::into),
        });
    }

    /// The help screen for this descriptor as a [fmt::Display] value.
    ///
    /// Formatting is pure: rendering the same descriptor twice produces
    /// byte-identical output.
    pub fn help(&self) -> Help<'_> {
        Help::new(self)
    }

    /// Parse an argument vector, excluding the program name.
    ///
    /// A single left-to-right scan consumes options until the first `--`,
    /// bare `-` or non-dash token; everything from there on is positional.
    /// Encountering `-h` or `--help` abandons the scan and yields
    /// [ParseOutcome::Help]. Any malformed input yields an [Error]; no
    /// bindings are reported for a failed parse.
    pub fn parse<I>(&self, args: I) -> Result<ParseOutcome, Error>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut bindings = self
            .opts
            .iter()
            .map(|opt| match opt.kind {
                OptKind::Flag => Binding::Flag(false),
                OptKind::Value => Binding::Value(None),
            })
            .collect::<Vec<_>>();

        let mut rest = Vec::new();
        let mut it = args.into_iter().peekable();

        while let Some(token) = it.next() {
            let token = token.as_ref();

            if token == "--" {
                break;
            }

            if let Some(body) = long_body(token) {
                // The built-in help is matched exactly and cannot be shadowed
                // by a registered option.
                if body == "help" {
                    return Ok(ParseOutcome::Help);
                }

                let (index, attached) = match self.find_long(body) {
                    Some(found) => found,
                    None => {
                        return Err(Error::new(ErrorKind::UnknownOption {
                            token: token.into(),
                        }))
                    }
                };

                let opt = &self.opts[index];

                match opt.kind {
                    OptKind::Flag => {
                        if attached.is_some() {
                            return Err(Error::new(ErrorKind::UnexpectedValue {
                                option: opt.display_name(),
                            }));
                        }

                        bindings[index] = Binding::Flag(true);
                    }
                    OptKind::Value => {
                        let value = match attached {
                            Some(value) => value.to_owned(),
                            None => match next_value(&mut it) {
                                Some(value) => value,
                                None => {
                                    return Err(Error::new(ErrorKind::MissingValue {
                                        option: opt.display_name(),
                                    }))
                                }
                            },
                        };

                        bindings[index] = Binding::Value(Some(value));
                    }
                }
            } else if is_short(token) {
                // Grouped short options: scan the characters after the dash
                // one registered name at a time.
                let mut group = &token[1..];

                while let Some(c) = group.chars().next() {
                    group = &group[c.len_utf8()..];

                    if c == 'h' {
                        return Ok(ParseOutcome::Help);
                    }

                    let index = match self.find_short(c) {
                        Some(index) => index,
                        None => {
                            return Err(Error::new(ErrorKind::UnknownOption {
                                token: token.into(),
                            }))
                        }
                    };

                    match self.opts[index].kind {
                        OptKind::Flag => {
                            bindings[index] = Binding::Flag(true);
                        }
                        OptKind::Value => {
                            // A value option ends the group: the rest of the
                            // token is the value, or else the next token is.
                            let value = if !group.is_empty() {
                                group.to_owned()
                            } else {
                                match next_value(&mut it) {
                                    Some(value) => value,
                                    None => {
                                        return Err(Error::new(ErrorKind::MissingValue {
                                            option: format!("-{}", c).into(),
                                        }))
                                    }
                                }
                            };

                            bindings[index] = Binding::Value(Some(value));
                            break;
                        }
                    }
                }
            } else {
                rest.push(token.to_owned());
                break;
            }
        }

        rest.extend(it.map(|token| token.as_ref().to_owned()));

        let expected = self.positional.len();

        if rest.len() < expected || (rest.len() > expected && self.tail.is_none()) {
            return Err(Error::new(ErrorKind::ArgumentCountMismatch {
                expected,
                found: rest.len(),
            }));
        }

        let tail = rest.split_off(expected);

        Ok(ParseOutcome::Matches(Matches {
            bindings,
            positional: rest,
            tail,
        }))
    }

    /// Parse [std::env::args], terminating the process on anything but a
    /// fully bound argument vector.
    ///
    /// Help goes to stdout with exit status 0. Errors go to stderr as
    /// `error: <message>` followed by a `--help` hint, with exit status 1;
    /// the `error` prefix is red when stderr is an interactive terminal.
    pub fn parse_or_exit(&self) -> Matches {
        let mut args = std::env::args();
        args.next();

        match self.parse(args) {
            Ok(ParseOutcome::Matches(matches)) => matches,
            Ok(ParseOutcome::Help) => {
                print!("{}", self.help());
                process::exit(0);
            }
            Err(error) => {
                eprintln!("{}: {}", console::style("error").red().for_stderr(), error);
                eprintln!("Try {} --help for more information", self.program_name);
                process::exit(1);
            }
        }
    }

    /// Resolve a long option against the token body after `--`.
    ///
    /// The registered name has to be a prefix of the body; a `=` right after
    /// it attaches a value, any other trailing bytes are ignored. The first
    /// registered option wins when two long names share a prefix.
    fn find_long<'t>(&self, body: &'t str) -> Option<(usize, Option<&'t str>)> {
        for (index, opt) in self.opts.iter().enumerate() {
            let long = match opt.long.as_deref() {
                Some(long) => long,
                None => continue,
            };

            if let Some(trailing) = body.strip_prefix(long) {
                return Some((index, trailing.strip_prefix('=')));
            }
        }

        None
    }

    fn find_short(&self, c: char) -> Option<usize> {
        self.opts.iter().position(|opt| opt.short == Some(c))
    }
}

/// The body of a long option token, without the leading `--`.
///
/// Tokens like `---x` match neither option syntax and are positional.
fn long_body(token: &str) -> Option<&str> {
    let body = token.strip_prefix("--")?;

    if body.is_empty() || body.starts_with('-') {
        return None;
    }

    Some(body)
}

/// Whether a token is a short option or a group of them. A bare `-` is not.
fn is_short(token: &str) -> bool {
    let mut chars = token.chars();
    chars.next() == Some('-') && matches!(chars.next(), Some(c) if c != '-')
}

/// Take the next token as an option value. Everything qualifies except the
/// end of the arguments and a literal `--`.
fn next_value<I>(it: &mut Peekable<I>) -> Option<String>
where
    I: Iterator,
    I::Item: AsRef<str>,
{
    match it.peek() {
        Some(next) if next.as_ref() != "--" => it.next().map(|token| token.as_ref().to_owned()),
        _ => None,
    }
}
