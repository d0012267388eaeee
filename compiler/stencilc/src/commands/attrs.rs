//! The `attrs` command: list the attributes a template needs.

use rustc_hash::FxHashSet;

use super::{load_template, CliError, CommandArgs};
use crate::collect_template_attributes;

const USAGE: &str = "stencil attrs <file> [--dummies] [--known NAME]... [--include-dir DIR]";

/// Print one attribute name per line, in first-seen order.
pub fn attrs(args: &[String]) -> Result<(), CliError> {
    let args = CommandArgs::parse(args)?;
    let path = args.required(0, "template file", USAGE)?;
    let template = load_template(path)?;
    let registry = args.registry()?;
    let known: FxHashSet<String> = args.known.iter().cloned().collect();

    let attributes = collect_template_attributes(&template, &known, args.dummies, &registry)
        .map_err(|err| CliError::template(path, &template.text, err))?;
    for name in attributes {
        println!("{name}");
    }
    Ok(())
}
