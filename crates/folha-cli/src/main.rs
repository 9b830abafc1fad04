mod commands;
mod logging;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "folha",
    version,
    about = "Extract payment report fields (pension/payroll PDFs) into spreadsheets"
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides this.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a payment report (PDF or extracted text) and print the records
    Parse {
        /// Path to PDF or text file
        input_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Field to show (header or key, repeatable). Defaults to all fields
        #[arg(short = 'f', long = "field", value_name = "FIELD")]
        fields: Vec<String>,

        /// Extract PDF text without pdftotext -layout
        #[arg(long)]
        raw: bool,
    },
    /// Parse a payment report and write the records to an xlsx or csv file
    Export {
        /// Path to PDF or text file
        input_file: PathBuf,

        /// Destination file (.xlsx or .csv). Defaults to dados_financeiros_<timestamp>.xlsx
        #[arg(short = 'O', long = "out", value_name = "FILE")]
        out: Option<PathBuf>,

        /// Field to export (header or key, repeatable)
        #[arg(short = 'f', long = "field", value_name = "FIELD")]
        fields: Vec<String>,

        /// Predefined profile: completo, resumo, consignado
        #[arg(short, long, value_name = "NAME")]
        preset: Option<String>,

        /// Custom JSON profile file
        #[arg(long, value_name = "FILE", conflicts_with = "preset")]
        profile: Option<PathBuf>,

        /// Extract PDF text without pdftotext -layout
        #[arg(long)]
        raw: bool,
    },
    /// List the fields that can be extracted
    Fields,
    /// Manage and inspect export profiles
    Profiles {
        #[command(subcommand)]
        action: ProfilesAction,
    },
}

#[derive(Subcommand)]
enum ProfilesAction {
    /// List predefined profiles
    List,
    /// Show the columns of a predefined profile
    Show {
        /// Preset name (e.g., "resumo")
        preset: String,
    },
    /// Validate a custom profile file
    Validate {
        /// Path to JSON profile file
        file: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose);

    let result = match cli.command {
        Commands::Parse {
            input_file,
            output,
            fields,
            raw,
        } => commands::parse::run(input_file, &output, &fields, raw),
        Commands::Export {
            input_file,
            out,
            fields,
            preset,
            profile,
            raw,
        } => commands::export::run(commands::export::ExportArgs {
            input_file,
            out,
            fields,
            preset,
            profile,
            raw,
        }),
        Commands::Fields => commands::fields::list(),
        Commands::Profiles { action } => match action {
            ProfilesAction::List => commands::profiles::list(),
            ProfilesAction::Show { preset } => commands::profiles::show(&preset),
            ProfilesAction::Validate { file } => commands::profiles::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_and_preset_are_exclusive() {
        let err = Cli::try_parse_from([
            "folha", "export", "rel.pdf", "--profile", "p.json", "--preset", "resumo",
        ])
        .err()
        .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_preset_alone_is_accepted() {
        let cli = Cli::try_parse_from(["folha", "export", "rel.pdf", "-p", "resumo"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Export { preset: Some(ref p), profile: None, .. } if p == "resumo"
        ));
    }
}
