use folha_core::model::Field;

pub fn list() -> Result<(), folha_core::error::FolhaError> {
    println!("Available fields (use the header or the key with --field):\n");

    let width = Field::ALL
        .iter()
        .map(|f| f.name().chars().count())
        .max()
        .unwrap_or(20);

    for field in Field::ALL {
        let default = match field.default_value() {
            "" => String::new(),
            d => format!("  (default {d})"),
        };
        println!(
            "  {}{}  {}{}",
            field.name(),
            " ".repeat(width - field.name().chars().count()),
            field.key(),
            default
        );
    }
    Ok(())
}
