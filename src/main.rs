fn main() {
    if let Err(err) = piter_catalog::run() {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
