//! Four-bar linkage position analysis from the command line.
mod cli;

fn main() {
    cli::Entry::main();
}
