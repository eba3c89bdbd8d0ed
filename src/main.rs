fn main() {
    if let Err(err) = swmap::cli::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
