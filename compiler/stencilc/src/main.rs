//! Stencil CLI
//!
//! Attribute discovery, rendering and header recognition for file templates.

use stencilc::commands::{self, CliError};

fn main() {
    stencilc::tracing_setup::init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        return;
    }

    let rest = &args[2..];
    let result = match args[1].as_str() {
        "attrs" => commands::attrs(rest),
        "render" => commands::render(rest),
        "pattern" => commands::pattern(rest),
        "extract" => commands::extract(rest),
        "explain" | "--explain" => commands::explain(rest),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        "version" | "--version" | "-V" => {
            println!("stencil {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => Err(CliError::Usage(format!(
            "unknown command `{other}`; run `stencil help` for the command list"
        ))),
    };

    if let Err(err) = result {
        eprint!("{}", err.report());
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("Stencil file template engine");
    println!();
    println!("Usage: stencil <command> [options]");
    println!();
    println!("Commands:");
    println!("  attrs <file>                 List the attributes a template needs");
    println!("  render <file> [NAME=VALUE]   Render a template");
    println!("  pattern <file> [NAME]...     Show the pattern derived from a template");
    println!("  extract <template> <file>    Recover attribute values from a rendered file");
    println!("  explain <code>               Explain an error code (e.g., E1004)");
    println!("  help                         Show this help message");
    println!("  version                      Show version information");
    println!();
    println!("Options:");
    println!("  --include-dir <dir>, -I      Load *.ft include templates from <dir>");
    println!("  --known <name>, -k           (attrs) Treat <name> as already supplied");
    println!("  --dummies                    (attrs) Also list escaped references");
    println!();
    println!("Environment:");
    println!("  RUST_LOG                     Log filter, e.g. stencilc=debug");
    println!("  STENCIL_TRACE_TREE           Indent log output by span");
}
