use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, Level};

use protoc_c_codegen::error::CodegenError;
use protoc_c_codegen::{generate_file, verify_file, EscapeStyle, GeneratorOptions};
use protoc_c_schema::SchemaModel;

#[derive(Parser)]
#[command(name = "pbc")]
#[command(about = "Generate protobuf-c C sources from a JSON schema model", long_about = None)]
struct Cli {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum EscapeArg {
    Hex,
    Octal,
}

#[derive(Subcommand)]
enum Commands {
    /// Write `.pb-c.h` / `.pb-c.c` files for every file in the model
    Generate {
        /// Input schema model (`.json`)
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory (defaults to the current directory)
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// How non-printable bytes in default values are escaped
        #[arg(long, value_enum, default_value = "hex")]
        escape_style: EscapeArg,

        /// Do not copy message comments into headers
        #[arg(long)]
        no_comments: bool,
    },

    /// Check the schema model without generating anything
    Verify {
        /// Input schema model (`.json`)
        #[arg(short, long)]
        input: PathBuf,
    },
}

fn load_model(input: &Path) -> Result<SchemaModel, CodegenError> {
    let text = fs::read_to_string(input).map_err(CodegenError::Io)?;
    Ok(SchemaModel::from_json(&text)?)
}

fn main() -> Result<(), CodegenError> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();

    match &cli.command {
        Commands::Generate { input, out_dir, escape_style, no_comments } => {
            let model = load_model(input)?;
            let options = GeneratorOptions {
                escape_style: match escape_style {
                    EscapeArg::Hex => EscapeStyle::Hex,
                    EscapeArg::Octal => EscapeStyle::Octal,
                },
                emit_comments: !no_comments,
            };

            for file in &model.files {
                verify_file(file)?;
                let generated = generate_file(file, &options)?;
                for (name, text) in [
                    (&generated.header_name, &generated.header),
                    (&generated.source_name, &generated.source),
                ] {
                    let out_path = out_dir.join(name);
                    if let Some(parent) = out_path.parent() {
                        fs::create_dir_all(parent).map_err(CodegenError::Io)?;
                    }
                    fs::write(&out_path, text).map_err(CodegenError::Io)?;
                    info!("Generated {} → {}", file.name, out_path.display());
                }
            }
            Ok(())
        }

        Commands::Verify { input } => {
            let model = load_model(input)?;
            for file in &model.files {
                verify_file(file)?;
            }
            info!("{} file(s) verified", model.files.len());
            Ok(())
        }
    }
}
