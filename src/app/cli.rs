use crate::desktop_entry::{CreatePresets, Locale};
use crate::editor::EditorOptions;
use crate::shared::errors::EditorError;
use crate::shared::logging::DialogLog;
use argh::FromArgs;

#[derive(FromArgs, Debug, Clone, PartialEq, Eq)]
/// Edit or create desktop launchers and links.
pub struct DesktopItemEditArgs {
    /// create a new file instead of editing an existing one
    #[argh(switch, short = 'c')]
    pub create_new: bool,

    /// type of the new file, Application or Link
    #[argh(option, short = 't', long = "type")]
    pub entry_type: Option<String>,

    /// preset name when creating a file
    #[argh(option)]
    pub name: Option<String>,

    /// preset comment when creating a file
    #[argh(option)]
    pub comment: Option<String>,

    /// preset command when creating a launcher
    #[argh(option)]
    pub command: Option<String>,

    /// preset URL when creating a link
    #[argh(option)]
    pub url: Option<String>,

    /// preset icon when creating a file
    #[argh(option)]
    pub icon: Option<String>,

    /// print version information and exit
    #[argh(switch, short = 'V')]
    pub version: bool,

    /// window id of the parent window
    #[argh(option, hidden_help)]
    pub xid: Option<i64>,

    /// file or folder to edit
    #[argh(positional)]
    pub targets: Vec<String>,
}

impl DesktopItemEditArgs {
    /// Exactly one target is required. Presets only matter when creating.
    pub fn into_options(
        self,
        locale: Option<Locale>,
        log: DialogLog,
    ) -> Result<EditorOptions, EditorError> {
        let [target] = <[String; 1]>::try_from(self.targets).map_err(|_| EditorError::NoTarget)?;
        let presets = if self.create_new {
            CreatePresets {
                entry_type: self.entry_type,
                name: self.name,
                comment: self.comment,
                command: self.command,
                url: self.url,
                icon: self.icon,
            }
        } else {
            CreatePresets::default()
        };
        Ok(EditorOptions {
            target,
            create_new: self.create_new,
            presets,
            xid: self.xid,
            locale,
            log,
        })
    }
}

#[derive(FromArgs, Debug, Clone, PartialEq, Eq)]
/// Choose the preferred web browser, mail reader and terminal emulator.
pub struct PreferredApplicationsArgs {
    /// print version information and exit
    #[argh(switch, short = 'V')]
    pub version: bool,
}

/// Why parsing stopped before producing arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliExit {
    /// `--help` output, printed to stdout with success.
    Help(String),
    /// A usage error, printed to stderr with failure.
    Usage(String),
}

/// Splits `--option=value` into two arguments. Everything after `--` is
/// left alone.
pub fn normalize_args(args: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut out = Vec::new();
    let mut options_done = false;
    for arg in args {
        if options_done || !arg.starts_with("--") {
            out.push(arg);
            continue;
        }
        if arg == "--" {
            options_done = true;
            out.push(arg);
            continue;
        }
        match arg.split_once('=') {
            Some((flag, value)) => {
                out.push(flag.to_string());
                out.push(value.to_string());
            }
            None => out.push(arg),
        }
    }
    out
}

pub fn parse_args<T: FromArgs>(program: &str, args: Vec<String>) -> Result<T, CliExit> {
    let args = normalize_args(args);
    let refs: Vec<&str> = args.iter().map(String::as_str).collect();
    T::from_args(&[program], &refs).map_err(|exit| match exit.status {
        Ok(()) => CliExit::Help(exit.output),
        Err(()) => CliExit::Usage(exit.output),
    })
}

pub fn version_banner(program: &str) -> String {
    format!(
        "{program} {}\nPart of desktop-dialogs: desktop entry editing and preferred applications for the terminal.",
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn equals_form_is_split_until_double_dash() {
        assert_eq!(
            normalize_args(args(&["--name=My App", "-c", "--", "--url=x"])),
            args(&["--name", "My App", "-c", "--", "--url=x"])
        );
    }

    #[test]
    fn parses_create_presets_in_both_forms() {
        let parsed: DesktopItemEditArgs = parse_args(
            "desktop-item-edit",
            args(&["-c", "-t", "Link", "--name=Docs", "--url", "https://example.org", "/tmp/foo/"]),
        )
        .expect("parse");
        assert!(parsed.create_new);
        assert_eq!(parsed.entry_type.as_deref(), Some("Link"));
        assert_eq!(parsed.name.as_deref(), Some("Docs"));
        assert_eq!(parsed.targets, args(&["/tmp/foo/"]));

        let options = parsed
            .into_options(None, DialogLog::disabled())
            .expect("options");
        assert_eq!(options.target, "/tmp/foo/");
        assert_eq!(options.presets.url.as_deref(), Some("https://example.org"));
    }

    #[test]
    fn presets_are_dropped_outside_create_mode() {
        let parsed: DesktopItemEditArgs =
            parse_args("desktop-item-edit", args(&["--name", "x", "a.desktop"])).expect("parse");
        let options = parsed
            .into_options(None, DialogLog::disabled())
            .expect("options");
        assert_eq!(options.presets, CreatePresets::default());
    }

    #[test]
    fn target_count_must_be_exactly_one() {
        for targets in [args(&[]), args(&["a.desktop", "b.desktop"])] {
            let parsed: DesktopItemEditArgs =
                parse_args("desktop-item-edit", targets).expect("parse");
            let err = parsed
                .into_options(None, DialogLog::disabled())
                .expect_err("no target");
            assert_eq!(err.to_string(), "No file/folder specified");
        }
    }

    #[test]
    fn help_and_unknown_flags_exit_early() {
        let help = parse_args::<DesktopItemEditArgs>("desktop-item-edit", args(&["--help"]));
        assert!(matches!(help, Err(CliExit::Help(text)) if text.contains("--create-new")));

        let unknown = parse_args::<DesktopItemEditArgs>("desktop-item-edit", args(&["--bogus"]));
        assert!(matches!(unknown, Err(CliExit::Usage(_))));

        let hidden = parse_args::<DesktopItemEditArgs>("desktop-item-edit", args(&["--help"]));
        assert!(matches!(hidden, Err(CliExit::Help(text)) if !text.contains("--xid")));
    }

    #[test]
    fn xid_and_version_switches_parse() {
        let parsed: DesktopItemEditArgs =
            parse_args("desktop-item-edit", args(&["--xid=77", "-V"])).expect("parse");
        assert_eq!(parsed.xid, Some(77));
        assert!(parsed.version);

        let chooser: PreferredApplicationsArgs =
            parse_args("preferred-applications", args(&["--version"])).expect("parse");
        assert!(chooser.version);
    }
}
