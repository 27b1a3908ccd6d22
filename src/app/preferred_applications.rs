use super::cli::{parse_args, version_banner, CliExit, PreferredApplicationsArgs};
use crate::desktop_entry::Locale;
use crate::helpers::HelperDatabase;
use crate::shared::dirs::XdgDirs;
use crate::shared::logging::DialogLog;
use crate::tui::{is_interactive, ScriptedKeys, TerminalGuard, TerminalHost, TerminalKeys};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

pub const PROGRAM_NAME: &str = "preferred-applications";

pub fn run_cli(args: Vec<String>) -> Result<i32, String> {
    let args: PreferredApplicationsArgs = match parse_args(PROGRAM_NAME, args) {
        Ok(args) => args,
        Err(CliExit::Help(output)) => {
            println!("{output}");
            return Ok(0);
        }
        Err(CliExit::Usage(output)) => return Err(output),
    };
    if args.version {
        println!("{}", version_banner(PROGRAM_NAME));
        return Ok(0);
    }

    let dirs = XdgDirs::from_env();
    let log = DialogLog::from_dirs(&dirs);
    let locale = Locale::from_env();
    let mut registry =
        HelperDatabase::load(&dirs, locale.as_ref(), log.clone()).map_err(|err| err.to_string())?;

    let response = if let Some(keys) = ScriptedKeys::from_env()? {
        let terminal = Terminal::new(TestBackend::new(100, 30))
            .map_err(|e| format!("failed to create scripted terminal: {e}"))?;
        TerminalHost::new(terminal, keys, log.clone()).run_chooser(&mut registry)
    } else if is_interactive() {
        let (_guard, terminal) = TerminalGuard::enter().map_err(|err| err.to_string())?;
        TerminalHost::new(terminal, TerminalKeys, log.clone()).run_chooser(&mut registry)
    } else {
        return Err(format!("{PROGRAM_NAME} requires an interactive terminal"));
    }
    .map_err(|err| err.to_string())?;

    log.append("info", "chooser.closed", &format!("chooser response {response:?}"));
    Ok(0)
}
