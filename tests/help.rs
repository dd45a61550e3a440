use clargs::InterfaceDesc;

fn example_descriptor() -> InterfaceDesc {
    let mut desc = InterfaceDesc::new("copy");
    desc.help_header("copy - copy a file, optionally uppercasing it");
    desc.help_footer("Report bugs to the mailing list.");
    desc.value(Some('o'), Some("output"), Some("file"), "Output file name");
    desc.flag(Some('U'), None, "Make the output uppercase");
    desc.positional("input-file", "Input file name");
    desc
}

#[test]
fn full_help_screen() {
    let expected = "\
copy - copy a file, optionally uppercasing it

USAGE: copy [options] [--] <input-file>

ARGUMENTS:
  input-file            Input file name

OPTIONS:
  -h, --help            Print this help message and exit
  -o, --output=<file>   Output file name
  -U                    Make the output uppercase

Report bugs to the mailing list.
";

    assert_eq!(example_descriptor().help().to_string(), expected);
}

#[test]
fn formatting_is_idempotent() {
    let desc = example_descriptor();
    assert_eq!(desc.help().to_string(), desc.help().to_string());
}

#[test]
fn minimal_help_screen() {
    let desc = InterfaceDesc::new("tool");

    let expected = "\
USAGE: tool [options] [--]

OPTIONS:
  -h, --help            Print this help message and exit
";

    assert_eq!(desc.help().to_string(), expected);
}

#[test]
fn tail_markers_in_the_usage_line() {
    let mut named = InterfaceDesc::new("tool");
    named.tail(Some("files"));
    assert!(named
        .help()
        .to_string()
        .starts_with("USAGE: tool [options] [--] <files>...\n"));

    let mut anonymous = InterfaceDesc::new("tool");
    anonymous.tail(None);
    assert!(anonymous
        .help()
        .to_string()
        .starts_with("USAGE: tool [options] [--]...\n"));
}

#[test]
fn long_option_rows_without_a_short_name_are_indented() {
    let mut desc = InterfaceDesc::new("tool");
    desc.flag(None, Some("dry-run"), "Do not write anything");

    let help = desc.help().to_string();
    assert!(help.contains("\n      --dry-run         Do not write anything\n"));
}

#[test]
fn short_only_value_row() {
    let mut desc = InterfaceDesc::new("tool");
    desc.value(Some('o'), None, None, "Output file name");

    let help = desc.help().to_string();
    assert!(help.contains("\n  -o <value>            Output file name\n"));
}

#[test]
fn overlong_rows_wrap_to_the_alignment_column() {
    let mut desc = InterfaceDesc::new("tool");
    desc.value(
        None,
        Some("configuration-file"),
        Some("path"),
        "Sets the configuration file",
    );

    let help = desc.help().to_string();
    assert!(help.contains(
        "\n      --configuration-file=<path> \n                        Sets the configuration file\n"
    ));
}
