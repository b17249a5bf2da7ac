//! typefmt CLI binary entry point.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use typefmt::diff::unified_diff;
use typefmt::generics::plan_generics_with;
use typefmt::output::{materialize, Edit};
use typefmt::quotes::plan_quotes;
use typefmt::splice::splice;
use typefmt::{GenericsOptions, TypeRegistry, DEFAULT_WIDTH};

/// Span-preserving reformatter for Python type expressions and string quotes.
#[derive(Parser)]
#[command(name = "typefmt")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Python source files to reformat in place.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Report changes as unified diffs without writing any file.
    #[arg(long)]
    check: bool,

    /// Report planned edits as JSON without writing any file.
    #[arg(long, conflicts_with = "check")]
    json: bool,

    /// Column budget for single-line type expressions.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: usize,

    /// Additional generic names to recognize, comma separated.
    #[arg(long, value_delimiter = ',', value_name = "NAME")]
    extend_names: Vec<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let options = GenericsOptions {
        width: cli.width,
        registry: TypeRegistry::default().with_names(cli.extend_names.iter().cloned()),
    };

    let mut any_changed = false;
    let mut all_edits: Vec<Edit> = Vec::new();

    for path in &cli.files {
        let path_display = path.display().to_string();
        let source = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                eprintln!("typefmt: cannot read {}: {}", path_display, err);
                return ExitCode::from(2);
            }
        };

        // Quotes first, so the generics pass sees normalized delimiters
        // when it parses string atoms inside subscripts.
        let quote_plan = plan_quotes(&source);
        let after_quotes = splice(&source, &quote_plan);
        let generic_plan = plan_generics_with(&after_quotes, &options);
        let rewritten = splice(&after_quotes, &generic_plan);

        let changed = rewritten != source;
        any_changed |= changed;
        tracing::debug!(
            file = %path_display,
            quote_edits = quote_plan.len(),
            generic_edits = generic_plan.len(),
            "reformatted"
        );

        if cli.json {
            all_edits.extend(materialize(&path_display, "quotes", &source, &quote_plan));
            all_edits.extend(materialize(
                &path_display,
                "generics",
                &after_quotes,
                &generic_plan,
            ));
        } else if changed {
            print!("{}", unified_diff(&source, &rewritten, &path_display));
            if !cli.check {
                if let Err(err) = fs::write(path, &rewritten) {
                    eprintln!("typefmt: cannot write {}: {}", path_display, err);
                    return ExitCode::from(2);
                }
            }
        }
    }

    if cli.json {
        match serde_json::to_string_pretty(&all_edits) {
            Ok(body) => println!("{}", body),
            Err(err) => {
                eprintln!("typefmt: cannot serialize edits: {}", err);
                return ExitCode::from(2);
            }
        }
    }

    if any_changed {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }
}
