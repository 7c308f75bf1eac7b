use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use sitekit_model::{create_element, display_name, variant_ids, BaseKind, ElementType, IDGenerator};

#[derive(Args, Debug)]
pub struct TypesArgs {
    /// Show the element a type token builds, e.g. `cyber-button:cb-3`
    pub preview: Option<String>,
}

pub fn types(args: TypesArgs) -> Result<()> {
    match args.preview {
        Some(token) => preview(&token),
        None => {
            list();
            Ok(())
        }
    }
}

fn list() {
    println!("{}", "Element types".bold());
    println!();

    for &kind in BaseKind::ALL {
        let variants = variant_ids(kind);
        let token = kind.token();

        if variants.is_empty() {
            println!("  {:<14} {}", token.cyan(), display_name(token));
        } else {
            println!(
                "  {:<14} {} {}",
                token.cyan(),
                display_name(token),
                format!("({})", variants.join(", ")).dimmed()
            );
        }
    }
}

fn preview(token: &str) -> Result<()> {
    let kind: ElementType = token
        .parse()
        .with_context(|| format!("invalid element type {:?}", token))?;

    let mut ids = IDGenerator::from_seed("preview".to_string());
    let element = create_element(&kind, &mut ids);

    println!("{}", serde_json::to_string_pretty(&element)?);
    Ok(())
}
