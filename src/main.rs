fn main() {
    use clap::Parser;
    let args = docs2pdf::cli::Args::parse();
    if let Err(e) = docs2pdf::cli::init_logging() {
        eprintln!("{}", e);
        std::process::exit(e.exit_code());
    }
    if let Err(e) = docs2pdf::cli::run(&args) {
        for line in docs2pdf::cli::error_report(&e, args.verbose) {
            eprintln!("{}", line);
        }
        std::process::exit(e.exit_code());
    }
}
