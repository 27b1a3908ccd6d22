use desktop_dialogs::app::preferred_applications;

fn run() -> Result<i32, String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    preferred_applications::run_cli(args)
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
