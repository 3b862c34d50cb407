use check_http_core::logging;

mod cli;
mod output;

fn main() {
    // Initialize logging as early as possible; a probe must still run without a log file.
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    let verdict = cli::run_from_args();
    println!("{}", output::render(&verdict));
    std::process::exit(output::exit_code(verdict.severity));
}
