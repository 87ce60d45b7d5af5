fn main() {
    if let Err(err) = gogr_cli::run() {
        eprintln!("gogr: {err:#}");
        std::process::exit(1);
    }
}
