fn main() {
    if let Err(err) = stowin_cli::run_cli() {
        eprintln!("stowin: {err}");
        std::process::exit(1);
    }
}
