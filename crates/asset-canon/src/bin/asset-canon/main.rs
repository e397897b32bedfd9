mod cli;

use anyhow::Context;
use asset_canon::ignore_list::IgnoreList;
use asset_canon::substitution::Substitutions;
use asset_canon::template_documents::TemplateDocuments;
use asset_canon::value::Value;

fn main() {
    use clap::Parser;
    let cli = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_env("ASSET_CANON_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let command_result = match cli.command {
        cli::Command::Canonicalize(canonicalize_cli) => canonicalize(canonicalize_cli),
        cli::Command::Compare(compare_cli) => compare(compare_cli),
        cli::Command::Dev(dev_cli) => dev(dev_cli),
    };

    match command_result {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            for error in e.chain() {
                eprintln!("{error}")
            }
            std::process::exit(2);
        }
    }
}

pub fn canonicalize(cli: cli::CanonicalizeCommand) -> anyhow::Result<bool> {
    let ignore = ignore_list(&cli.ignore)?;
    let template = load(&cli.input)?.into_value();

    let canonical = asset_canon::canonicalize(&template, &ignore)?;

    output(&cli.output, &canonical)?;
    Ok(true)
}

/// Returns `false` when the templates differ
pub fn compare(cli: cli::CompareCommand) -> anyhow::Result<bool> {
    let ignore = ignore_list(&cli.ignore)?;

    let mut expected = TemplateDocuments::default();
    expected
        .load_file(&cli.expected)
        .with_context(|| format!("Failed to load {}", cli.expected.display()))?;

    let mut actual = TemplateDocuments::default();
    actual
        .load_file(&cli.actual)
        .with_context(|| format!("Failed to load {}", cli.actual.display()))?;

    let differences =
        asset_canon::canonical_diff(&expected.into_value(), &actual.into_value(), &ignore)?;

    if differences.is_empty() {
        tracing::info!("templates are equal");
        return Ok(true);
    }

    for difference in &differences {
        println!("{difference}");
    }
    Ok(false)
}

fn load(input: &cli::InputArgs) -> anyhow::Result<TemplateDocuments> {
    if input.files.is_empty() && input.directories.is_empty() {
        let mut documents = TemplateDocuments::default();
        documents
            .load_reader(std::io::stdin())
            .context("Failed to read template from stdin")?;
        return Ok(documents);
    }

    let mut documents = TemplateDocuments::default();

    for file_path in &input.files {
        documents
            .load_file(file_path)
            .with_context(|| format!("Failed to load {}", file_path.display()))?;
    }

    for dir_path in &input.directories {
        documents
            .load_directory(dir_path)
            .with_context(|| format!("Failed to load directory {}", dir_path.display()))?;
    }

    anyhow::ensure!(documents.source_count() > 0, "No templates loaded");

    Ok(documents)
}

fn ignore_list(args: &cli::IgnoreArgs) -> anyhow::Result<IgnoreList> {
    let mut ignore = IgnoreList::new(args.prefixes.iter().cloned());

    for file_path in &args.ignore_files {
        ignore
            .load_file(file_path)
            .with_context(|| format!("Failed to load ignore file {}", file_path.display()))?;
    }

    tracing::debug!(prefixes = ?ignore.prefixes(), "ignore list");
    Ok(ignore)
}

fn output(output: &cli::OutputArgs, value: &Value) -> anyhow::Result<()> {
    match output.format {
        cli::OutputFormat::Yaml => serde_yaml::to_writer(std::io::stdout(), value)?,
        cli::OutputFormat::Json => {
            serde_json::to_writer_pretty(std::io::stdout(), value)?;
            println!();
        }
    };

    Ok(())
}

/// developer utilities
///
/// A quick way to expose internal structures for debugging purposes
pub fn dev(cli: cli::DevCommand) -> anyhow::Result<bool> {
    use cli::DevSubCommand::*;

    match cli.command {
        Rules { input, ignore } => {
            let ignore = ignore_list(&ignore)?;
            let documents = load(&input)?;

            for (source, template) in documents.iter() {
                let templates: Vec<&Value> = match template {
                    Value::Array(batch) => batch.iter().collect(),
                    template => vec![template],
                };

                for (index, template) in templates.into_iter().enumerate() {
                    let name = match source {
                        Some(path) => format!("{}#{index}", path.display()),
                        None => format!("<stdin>#{index}"),
                    };
                    println!("{name}");

                    let substitutions = Substitutions::discover(template, &ignore)
                        .with_context(|| format!("Failed to discover rules of {name}"))?;
                    for rule in substitutions.rules() {
                        println!("  {rule}");
                    }
                }
            }
        }
        Documents { input } => {
            let documents = load(&input)?;
            println!("{documents:#?}");
        }
    }

    Ok(true)
}
