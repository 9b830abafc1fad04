use folha_core::profile::builtin;
use folha_core::profile::schema::ExportProfile;
use std::path::Path;

pub fn list() -> Result<(), folha_core::error::FolhaError> {
    println!("Available predefined profiles:\n");
    for name in builtin::PRESETS {
        let p = builtin::load_preset(name)?;
        println!("  {:<12} {} ({} columns)", name, p.name, p.fields.len());
        if let Some(ref desc) = p.description {
            println!("               {}", desc);
        }
        println!();
    }
    Ok(())
}

pub fn show(preset: &str) -> Result<(), folha_core::error::FolhaError> {
    let p = builtin::load_preset(preset)?;
    print_profile(&p)
}

pub fn validate(file: &Path) -> Result<(), folha_core::error::FolhaError> {
    let p = folha_core::profile::load_profile(file)?;
    println!("Profile '{}' is valid.\n", p.name);
    print_profile(&p)
}

fn print_profile(p: &ExportProfile) -> Result<(), folha_core::error::FolhaError> {
    println!("{}\n", p.name);
    if let Some(ref desc) = p.description {
        println!("{}\n", desc);
    }
    println!("Sheet: {}\n", p.sheet_name());
    println!("Columns:");
    let selection = p.selection()?;
    for (i, field) in selection.fields().iter().enumerate() {
        println!("  {:>2}. {}", i + 1, field.name());
    }
    Ok(())
}
