//! The `extract` command: recover attribute values from a rendered file.

use rustc_hash::FxHashSet;

use super::{load_template, read_file, CliError, CommandArgs};
use crate::{collect_template_attributes, derive_pattern, NoIncludes};

const USAGE: &str = "stencil extract <template-file> <document-file>";

/// Print `NAME=VALUE` for each attribute of the first instance of the
/// template found in the document.
pub fn extract(args: &[String]) -> Result<(), CliError> {
    let args = CommandArgs::parse(args)?;
    let template_path = args.required(0, "template file", USAGE)?;
    let document_path = args.required(1, "document file", USAGE)?;
    let template = load_template(template_path)?;
    let document = read_file(std::path::Path::new(document_path))?;

    let names: Vec<String> =
        collect_template_attributes(&template, &FxHashSet::default(), false, &NoIncludes)
            .map_err(|err| CliError::template(template_path, &template.text, err))?
            .into_iter()
            .collect();
    let pattern = derive_pattern(&template.text, &names)
        .map_err(|err| CliError::template(template_path, &template.text, err))?;

    let found = pattern
        .extract(&document)
        .map_err(|err| CliError::template(template_path, &template.text, err))?;
    let Some(found) = found else {
        return Err(CliError::NoMatch {
            template: template_path.to_owned(),
            document: document_path.to_owned(),
        });
    };
    tracing::debug!(start = found.range.start, end = found.range.end, "header found");
    for (name, value) in &found.properties {
        println!("{name}={value}");
    }
    Ok(())
}
