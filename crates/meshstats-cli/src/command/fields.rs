use std::path::PathBuf;

use clap::Args;
use meshstats_engine::FieldCatalog;

use crate::model::ModelSet;

#[derive(Debug, Clone, Args)]
pub(crate) struct FieldsArg {
    /// Paths to the model JSON files
    #[arg(required = true)]
    models: Vec<PathBuf>,
}

pub(crate) fn run(arg: &FieldsArg) -> anyhow::Result<()> {
    let models = ModelSet::load(&arg.models)?;
    let catalog = FieldCatalog::discover(models.provider(), models.names());

    println!("Models: {}", models.names().join(", "));
    println!();
    print_list("Fields", catalog.fields());
    print_list("Regions", catalog.regions());
    if !catalog.unavailable_fields().is_empty() {
        print_list("Unavailable fields", catalog.unavailable_fields());
    }
    Ok(())
}

fn print_list(title: &str, items: &[String]) {
    println!("{title} ({})", items.len());
    for item in items {
        println!("  {item}");
    }
    println!();
}
