pub mod cli;
pub mod codegen;
pub mod ir;
pub mod name;
pub mod normalize;
pub mod ops;
pub mod schema;
pub mod source;

use colored::Colorize;

fn main() {
    let command_line_interface = cli::CommandLineInterface::load();
    if let Err(error) = command_line_interface.run() {
        eprintln!("{} {error:#}", "error:".red().bold());
        std::process::exit(1);
    }
}
