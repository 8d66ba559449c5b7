//! Standalone validator for industry catalog files.
//!
//! Checks a catalog JSON file for structure, duplicate names, empty keyword
//! lists and out-of-range trend figures before the bot is pointed at it.

use std::process::ExitCode;

use clap::Parser;

use marketing_insights_bot::config::IndustryCatalog;

/// Industry catalog validator.
#[derive(Parser, Debug)]
#[command(name = "validate_catalog")]
#[command(about = "Validates industry catalog files for the marketing bot")]
#[command(version)]
struct Args {
    /// Path to the JSON catalog file to validate.
    #[arg(short, long, default_value = "industries.json")]
    file: String,

    /// Generate an example catalog at the specified path.
    #[arg(long)]
    generate_example: Option<String>,

    /// Show detailed information for each industry.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Some(output_path) = args.generate_example {
        return generate_example(&output_path);
    }

    validate_catalog(&args.file, args.verbose)
}

fn generate_example(output_path: &str) -> ExitCode {
    let example = IndustryCatalog::builtin();

    match example.save_to_file(output_path) {
        Ok(()) => {
            println!("✓ Example catalog written to: {output_path}");
            println!("\nThe file contains {} example industries.", example.len());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("✗ Failed to write example file: {e}");
            ExitCode::FAILURE
        }
    }
}

fn validate_catalog(path: &str, verbose: bool) -> ExitCode {
    println!("Validating: {path}\n");

    let catalog = match IndustryCatalog::load_from_file(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("✗ Failed to load catalog: {e}");
            return ExitCode::FAILURE;
        }
    };

    if verbose {
        for industry in &catalog.industries {
            let trend = industry.trend.map_or_else(
                || "no trend data".to_owned(),
                |t| format!("CPC {}, CTR {}", t.cpc, t.ctr),
            );
            println!(
                "[{}] {} keyword(s), {trend}",
                industry.name,
                industry.keywords.len()
            );
        }
        println!();
    }

    let errors: Vec<_> = catalog
        .validate_all()
        .into_iter()
        .filter_map(Result::err)
        .collect();

    for e in &errors {
        println!("  ✗ Error: {e}");
    }

    let total = catalog.len();

    if errors.is_empty() {
        println!("✓ All {total} industries are valid!");

        if catalog.suggestions.is_empty() {
            println!("  (warning: no suggestions configured - keyword replies will list keywords only)");
        }

        println!("\nFallback keywords: {}", catalog.fallback_keywords.join(", "));
        ExitCode::SUCCESS
    } else {
        println!(
            "\n✗ Validation failed: {} error(s) in {total} industries",
            errors.len()
        );
        ExitCode::FAILURE
    }
}
