//! Load a CSS manifest and dump it to JSON.
//!
//! Run with: cargo run --example simple

use css_styleguide::{from_str, Manifest};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let css = r##"
        .styleguide-metas-references { --names: "palette text_color spaces"; }

        .styleguide-reference-palette {
            --structure: "flat";
            --keys: "black white";
            --values: "#000000 #ffffff";
        }

        .styleguide-reference-text_color {
            --structure: "nested";
            --keys: "black white";
            --selectors: ".bg-black .bg-white";
            --values: "#000000 #ffffff";
        }

        .styleguide-reference-spaces {
            --structure: "list";
            --items: "tiny short normal large wide";
        }
    "##;

    let manifest = from_str(css)?;

    for name in manifest.reference_names() {
        if let Some(reference) = manifest.get_reference(name) {
            println!("{} ({}): {}", name, reference.structure(), reference.to_value());
        }
    }

    // Dump to JSON then restore without any CSS
    let json = manifest.to_json(4)?;
    println!("\nJSON output:\n{}\n", json);

    let restored = Manifest::from_json(&json)?;
    assert_eq!(restored.to_dict(), manifest.to_dict());
    println!("✓ Round-trip successful");

    Ok(())
}
