//! cfn-forge CLI
//!
//! Usage:
//!   cfn-forge [OPTIONS] [TEMPLATE]
//!
//! Options:
//!   -p, --profile <FILE>  Metadata profile (TOML format)
//!   -l, --list            List catalog templates
//!   -c, --compact         Emit compact JSON instead of pretty-printed
//!   -h, --help            Print help

use std::path::PathBuf;

use clap::Parser;

use cfn_forge::{catalog, Profile};

#[derive(Parser)]
#[command(name = "cfn-forge")]
#[command(about = "Assemble infrastructure templates from the built-in catalog")]
struct Cli {
    /// Catalog template to render (see --list)
    template: Option<String>,

    /// Metadata profile stamped into the template (TOML format)
    #[arg(short, long)]
    profile: Option<PathBuf>,

    /// List catalog templates
    #[arg(short, long)]
    list: bool,

    /// Emit compact JSON instead of pretty-printed
    #[arg(short, long)]
    compact: bool,
}

fn main() {
    let cli = Cli::parse();

    if cli.list {
        print_catalog();
        return;
    }

    let name = match &cli.template {
        Some(name) => name.as_str(),
        None => {
            print_catalog();
            return;
        }
    };

    // Load metadata profile
    let profile = match &cli.profile {
        Some(path) => match Profile::from_file(path) {
            Ok(p) => p,
            Err(e) => {
                eprintln!("Error loading profile '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Profile::default(),
    };

    let template = match catalog::build(name, &profile) {
        Some(Ok(template)) => template,
        Some(Err(e)) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
        None => {
            eprintln!("Error: unknown template '{}'", name);
            eprintln!();
            print_catalog();
            std::process::exit(1);
        }
    };

    let rendered = if cli.compact {
        template.to_json_compact()
    } else {
        template.to_json()
    };

    match rendered {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_catalog() {
    println!("Available templates:");
    for (name, summary, _) in catalog::ENTRIES {
        println!("    {:<16}{}", name, summary);
    }
    println!();
    println!("Render one with: cfn-forge <template> > stack.json");
}
