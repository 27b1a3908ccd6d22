use super::cli::{parse_args, version_banner, CliExit, DesktopItemEditArgs};
use crate::desktop_entry::Locale;
use crate::editor::EditingSession;
use crate::shared::dirs::XdgDirs;
use crate::shared::logging::DialogLog;
use crate::tui::{is_interactive, ScriptedKeys, TerminalGuard, TerminalHost, TerminalKeys};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

pub const PROGRAM_NAME: &str = "desktop-item-edit";

const SCRIPTED_SCREEN: (u16, u16) = (100, 30);

/// Runs the editor and returns the process exit code. `Err` carries the
/// message for stderr.
pub fn run_cli(args: Vec<String>) -> Result<i32, String> {
    let args: DesktopItemEditArgs = match parse_args(PROGRAM_NAME, args) {
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
    let options = args
        .into_options(Locale::from_env(), log.clone())
        .map_err(|err| err.to_string())?;
    let cwd = std::env::current_dir()
        .map_err(|e| format!("failed to resolve working directory: {e}"))?;
    let session = EditingSession::prepare(options, &cwd).map_err(|err| {
        log.append("error", "session.load_failed", &err.to_string());
        err.to_string()
    })?;

    let outcome = if let Some(keys) = ScriptedKeys::from_env()? {
        let (width, height) = SCRIPTED_SCREEN;
        let terminal = Terminal::new(TestBackend::new(width, height))
            .map_err(|e| format!("failed to create scripted terminal: {e}"))?;
        let mut host = TerminalHost::new(terminal, keys, log.clone());
        session.run(&mut host)
    } else if is_interactive() {
        let (_guard, terminal) = TerminalGuard::enter().map_err(|err| err.to_string())?;
        let mut host = TerminalHost::new(terminal, TerminalKeys, log.clone());
        session.run(&mut host)
    } else {
        return Err(format!("{PROGRAM_NAME} requires an interactive terminal"));
    }
    .map_err(|err| err.to_string())?;

    log.append(
        "info",
        "session.finished",
        &format!("exit code {}", outcome.exit_code()),
    );
    Ok(outcome.exit_code())
}
