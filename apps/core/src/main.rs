fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match spotlight_core::runtime::parse_cli_args(&args) {
        Ok(options) => options,
        Err(error) => {
            eprintln!("[spotlight-core] {error}");
            std::process::exit(2);
        }
    };

    if let Err(error) = spotlight_core::runtime::run_with_options(options) {
        spotlight_core::logging::error(&format!("runtime failed: {error}"));
        eprintln!("[spotlight-core] runtime failed: {error}");
        std::process::exit(1);
    }
}
