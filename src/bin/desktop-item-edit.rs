use desktop_dialogs::app::desktop_item_edit;

fn run() -> Result<i32, String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    desktop_item_edit::run_cli(args)
}

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
