// Entrypoint for the CLI application.
// - Parse arguments, then hand off to `cli::run`.
// - Every failure, usage errors included, is printed to stdout and exits
//   with status 1.

use clap::Parser;
use datashop_cli::cli::{self, Cli};
use datashop_cli::{logging, ui};

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version are not failures
            if !err.use_stderr() {
                let _ = err.print();
                std::process::exit(0);
            }
            // usage errors share stdout with every other error
            println!("{}", err.render().to_string().trim_end());
            std::process::exit(1);
        }
    };

    logging::init(cli.verbose);

    if let Err(err) = cli::run(&cli) {
        ui::print_error(&err);
        std::process::exit(1);
    }
}
