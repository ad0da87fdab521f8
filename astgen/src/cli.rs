//! Command-line front end.
//!
//! Any invocation problem (wrong argument count, unknown flag, bad value)
//! prints the usage line and exits successfully without touching the
//! filesystem.

use anyhow::{Context, Result};
use astgen_codegen::{GeneratorConfig, GuardStyle, OwnershipModel, generate_to_dir};
use astgen_schema::Schema;
use clap::{CommandFactory, Parser, error::ErrorKind};
use std::ffi::OsString;
use std::path::PathBuf;

const DEFAULT_PROGRAM: &str = "astgen";

/// Generate a visitor-dispatched C++ node hierarchy header
#[derive(Parser, Debug)]
#[command(name = "astgen", version)]
pub struct Cli {
    /// Directory the generated header is written into
    pub output_dir: PathBuf,

    /// XML schema file (the built-in Expr hierarchy if omitted)
    #[arg(long, value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// Ownership model: managed (unique_ptr) or manual (raw pointers and destructors)
    #[arg(long, default_value = "managed", value_parser = parse_model)]
    pub model: OwnershipModel,

    /// Inclusion guard: pragma or macro
    #[arg(long, default_value = "pragma", value_parser = parse_guard)]
    pub guard: GuardStyle,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Outcome of reading the command line.
#[derive(Debug)]
pub enum Invocation {
    /// Arguments are valid; generate.
    Generate(Cli),
    /// Print the message and exit successfully.
    Exit(String),
}

/// Parses command-line arguments, the first being the program name.
pub fn parse_args<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    let program = args
        .first()
        .map(|arg| arg.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_PROGRAM.to_string());

    match Cli::try_parse_from(args) {
        Ok(cli) => Invocation::Generate(cli),
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                Invocation::Exit(err.render().to_string())
            }
            _ => {
                tracing::debug!("invalid invocation: {}", err.render());
                Invocation::Exit(usage(&program))
            }
        },
    }
}

/// Returns the usage text naming `program`.
#[must_use]
pub fn usage(program: &str) -> String {
    let mut command = Cli::command().bin_name(program.to_string());
    format!("{}\n", command.render_usage())
}

impl Cli {
    /// Returns the generator configuration selected by the flags.
    #[must_use]
    pub fn config(&self) -> GeneratorConfig {
        GeneratorConfig::default()
            .with_model(self.model)
            .with_guard(self.guard)
    }

    /// Loads the schema file, or the built-in hierarchy.
    ///
    /// # Errors
    /// Returns an error if the schema file cannot be read or parsed.
    pub fn load_schema(&self) -> Result<Schema> {
        match &self.schema {
            Some(path) => astgen_schema::parser::parse_schema_file(path)
                .with_context(|| format!("failed to load schema {}", path.display())),
            None => Ok(astgen_schema::expr_schema()),
        }
    }

    /// Generates the header and writes it into the output directory.
    ///
    /// # Errors
    /// Returns an error if the schema is invalid or the header cannot be written.
    pub fn run(&self) -> Result<PathBuf> {
        let schema = self.load_schema()?;
        let config = self.config();
        tracing::debug!(
            "generating {} ({} variants, {} model, {} guard)",
            schema.header_name,
            schema.variants.len(),
            config.model.as_str(),
            config.guard.as_str()
        );

        let path = generate_to_dir(&schema, &config, &self.output_dir).with_context(|| {
            format!(
                "failed to generate {} into {}",
                schema.header_name,
                self.output_dir.display()
            )
        })?;

        tracing::info!("wrote {}", path.display());
        Ok(path)
    }
}

fn parse_model(s: &str) -> Result<OwnershipModel, String> {
    OwnershipModel::parse(s)
        .ok_or_else(|| format!("unknown ownership model '{}' (expected managed or manual)", s))
}

fn parse_guard(s: &str) -> Result<GuardStyle, String> {
    GuardStyle::parse(s)
        .ok_or_else(|| format!("unknown guard style '{}' (expected pragma or macro)", s))
}
