//! The `pattern` command: show the pattern derived from a template.

use rustc_hash::FxHashSet;

use super::{load_template, CliError, CommandArgs};
use crate::{collect_template_attributes, derive_pattern, NoIncludes};

const USAGE: &str = "stencil pattern <file> [NAME]...";

/// Print the regular expression, then `offset<TAB>NAME` per captured
/// attribute. Without names, the template's own attributes are used.
pub fn pattern(args: &[String]) -> Result<(), CliError> {
    let args = CommandArgs::parse(args)?;
    let path = args.required(0, "template file", USAGE)?;
    let template = load_template(path)?;

    let names: Vec<String> = if args.positional.len() > 1 {
        args.positional[1..].to_vec()
    } else {
        collect_template_attributes(&template, &FxHashSet::default(), false, &NoIncludes)
            .map_err(|err| CliError::template(path, &template.text, err))?
            .into_iter()
            .collect()
    };

    let pattern = derive_pattern(&template.text, &names)
        .map_err(|err| CliError::template(path, &template.text, err))?;
    println!("{}", pattern.as_str());
    for (offset, name) in pattern.offset_to_attribute() {
        println!("{offset}\t{name}");
    }
    Ok(())
}
