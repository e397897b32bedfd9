//! asset-canon cli interface

use clap::{Parser, Subcommand, ValueEnum};
use std::fmt::Formatter;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the canonical form of templates
    ///
    /// Reads a template from stdin unless any other source is provided (via --input-*).
    /// Multiple templates are printed as an array.
    #[command(alias = "canon")]
    Canonicalize(CanonicalizeCommand),

    /// Compare the canonical forms of two templates
    ///
    /// Exits with status 1 and lists the differing paths when they are not equal
    Compare(CompareCommand),

    /// Print debug information for development
    Dev(DevCommand),
}

#[derive(Parser, Debug)]
pub struct CanonicalizeCommand {
    #[clap(flatten)]
    pub input: InputArgs,

    #[clap(flatten)]
    pub ignore: IgnoreArgs,

    #[clap(flatten)]
    pub output: OutputArgs,
}

#[derive(Parser, Debug)]
pub struct CompareCommand {
    #[clap(flatten)]
    pub ignore: IgnoreArgs,

    /// Expected template
    pub expected: PathBuf,

    /// Actual template
    pub actual: PathBuf,
}

#[derive(Parser, Debug)]
pub struct InputArgs {
    /// Load a template file
    ///
    /// Files ending in .yaml or .yml are read as yaml, everything else as json
    #[clap(short = 'f', long = "input-file")]
    pub files: Vec<PathBuf>,

    /// Load *.template.{json,yaml,yml} files from given directory
    #[clap(short = 'd', long = "input-dir")]
    pub directories: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct IgnoreArgs {
    /// Mask the code location of resources starting with this prefix
    #[clap(short = 'i', long = "ignore-prefix")]
    pub prefixes: Vec<String>,

    /// Load ignore prefixes from a file, one per line
    #[clap(long = "ignore-file")]
    pub ignore_files: Vec<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct OutputArgs {
    #[arg(short = 'F', long = "output-format", default_value_t)]
    pub format: OutputFormat,
}

#[derive(ValueEnum, Clone, Default, Debug)]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Yaml => f.write_str("yaml"),
        }
    }
}

#[derive(Parser, Debug)]
pub struct DevCommand {
    #[command(subcommand)]
    pub command: DevSubCommand,
}

#[derive(Subcommand, Debug)]
pub enum DevSubCommand {
    /// Print the substitution rules discovered for each template
    Rules {
        #[clap(flatten)]
        input: InputArgs,

        #[clap(flatten)]
        ignore: IgnoreArgs,
    },
    /// Print the loaded templates
    Documents {
        #[clap(flatten)]
        input: InputArgs,
    },
}
