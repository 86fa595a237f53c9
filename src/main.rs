use clap::Parser;
use pokedex::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Pokedex - Species Reference Lookup");
    println!("==================================");
    println!();
    println!("Loads species data from a CSV file into a local SQLite store on first use,");
    println!("then looks species up by name, number or type.");
    println!();
    println!("USAGE:");
    println!("    pokedex <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    name <NAME>        Look up a species by name (case-insensitive)");
    println!("    number <NUMBER>    Look up a species by national number");
    println!("    type <TYPE>        List species with the given primary or secondary type");
    println!("    names              List all species names");
    println!("    numbers            List all species numbers");
    println!("    types              List all types present in the store");
    println!("    load               Rebuild the store from the source file");
    println!("    status             Show store location and last load");
    println!();
    println!("EXAMPLES:");
    println!("    pokedex --source pokemon.csv name pikachu");
    println!("    pokedex number 25 --format json");
    println!("    pokedex type fire --format csv");
    println!("    pokedex load --lenient");
    println!();
    println!("For detailed help on any command, use:");
    println!("    pokedex <COMMAND> --help");
}
