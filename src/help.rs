use std::fmt;

use crate::{InterfaceDesc, OptKind};

/// Column at which argument and option descriptions start.
const HELP_ALIGNMENT: usize = 24;

/// Documentation for the built-in help option, listed first under `OPTIONS:`.
const HELP_OPT_DESCRIPTION: &str = "Print this help message and exit";

/// Helper that formats an [InterfaceDesc] into its help screen.
///
/// Obtained through [InterfaceDesc::help] and written out with the usual
/// formatting machinery, like `print!("{}", desc.help())`.
pub struct Help<'a> {
    desc: &'a InterfaceDesc,
}

impl<'a> Help<'a> {
    pub(crate) fn new(desc: &'a InterfaceDesc) -> Self {
        Self { desc }
    }
}

impl fmt::Display for Help<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let desc = self.desc;

        if let Some(header) = desc.help_header.as_deref() {
            writeln!(f, "{}\n", header)?;
        }

        // There is always at least one option, the built-in help.
        write!(f, "USAGE: {} [options] [--]", desc.program_name)?;

        for pos in &desc.positional {
            write!(f, " <{}>", pos.name)?;
        }

        if let Some(tail) = &desc.tail {
            match tail.name.as_deref() {
                Some(name) => write!(f, " <{}>...", name)?,
                None => write!(f, "...")?,
            }
        }

        writeln!(f)?;

        if !desc.positional.is_empty() {
            writeln!(f, "\nARGUMENTS:")?;

            for pos in &desc.positional {
                writeln!(
                    f,
                    "  {:<width$} {}",
                    pos.name,
                    pos.description,
                    width = HELP_ALIGNMENT - 3
                )?;
            }
        }

        writeln!(f, "\nOPTIONS:")?;

        write_opt(f, Some('h'), Some("help"), None, HELP_OPT_DESCRIPTION)?;

        for opt in &desc.opts {
            let value_name = match opt.kind {
                OptKind::Value => Some(opt.value_name.as_deref().unwrap_or("value")),
                OptKind::Flag => None,
            };

            write_opt(
                f,
                opt.short,
                opt.long.as_deref(),
                value_name,
                &opt.description,
            )?;
        }

        if let Some(footer) = desc.help_footer.as_deref() {
            writeln!(f, "\n{}", footer)?;
        }

        Ok(())
    }
}

/// Write one `OPTIONS:` row: the rendered names left-aligned to
/// [HELP_ALIGNMENT], then the description. A row whose names overrun the
/// column pushes the description onto its own line at that column instead.
fn write_opt(
    f: &mut fmt::Formatter<'_>,
    short: Option<char>,
    long: Option<&str>,
    value_name: Option<&str>,
    description: &str,
) -> fmt::Result {
    let mut prefix = String::from("  ");

    match short {
        Some(short) => {
            prefix.push('-');
            prefix.push(short);
        }
        None => prefix.push_str("  "),
    }

    if short.is_some() && long.is_some() {
        prefix.push_str(", ");
    }

    if let Some(long) = long {
        if short.is_none() {
            prefix.push_str("  ");
        }

        prefix.push_str("--");
        prefix.push_str(long);
    }

    if let Some(value_name) = value_name {
        prefix.push(if long.is_some() { '=' } else { ' ' });
        prefix.push('<');
        prefix.push_str(value_name);
        prefix.push('>');
    }

    prefix.push(' ');
    f.write_str(&prefix)?;

    if prefix.len() > HELP_ALIGNMENT {
        writeln!(f)?;
        writeln!(f, "{:width$}{}", "", description, width = HELP_ALIGNMENT)
    } else {
        writeln!(
            f,
            "{:width$}{}",
            "",
            description,
            width = HELP_ALIGNMENT - prefix.len()
        )
    }
}
