//! Structured values from a Dart Sass manifest.
//!
//! Run with: cargo run --example dartsass

use css_styleguide::{from_str_with_options, CompilerSupport, SerializerOptions};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let css = r#"
        .styleguide-metas-compiler { --support: "dartsass"; }
        .styleguide-metas-references { --auto: "true"; --excludes: "drafts"; }

        .styleguide-reference-breakpoints {
            --structure: "flat";
            --splitter: "object-list";
            --keys: "['small', 'medium', 'large']";
            --values: "[576, 768, 992]";
        }

        .styleguide-reference-config {
            --structure: "object-complex";
            --object: "{'debug': False, 'sizes': (1, 2.5), 'theme': None}";
        }

        .styleguide-reference-drafts {
            --structure: "string";
            --value: "not ready";
        }
    "#;

    // The compiler meta rule wins over this option, it is only a fallback
    let options = SerializerOptions::new()
        .with_compiler_support(CompilerSupport::Libsass)
        .with_evaluation_limit(5000);
    let manifest = from_str_with_options(css, options)?;

    println!("Compiler: {:?}", manifest.metas().compiler_support);
    println!("References: {:?}", manifest.metas().references);

    for warning in manifest.warnings() {
        println!("Warning: {}", warning);
    }

    println!("{}", manifest.to_json(2)?);

    Ok(())
}
