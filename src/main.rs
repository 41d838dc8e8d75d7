fn main() {
    // Delegate to CLI runner; errors are printed nicely inside.
    match decomment::cli::run() {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(1);
        }
    }
}
