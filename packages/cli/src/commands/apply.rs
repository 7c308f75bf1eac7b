use super::{load_session, open_store};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use serde::Deserialize;
use sitekit_editor::{Mutation, Outcome};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct ApplyArgs {
    /// Project id
    pub project_id: String,

    /// JSON file with one mutation or an array of mutations
    pub mutations: PathBuf,

    /// Apply in memory only, without saving
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Batch {
    Many(Vec<Mutation>),
    One(Mutation),
}

/// Parse a mutation file body
pub fn parse_batch(json: &str) -> Result<Vec<Mutation>> {
    let batch: Batch = serde_json::from_str(json).context("not a mutation or list of mutations")?;

    Ok(match batch {
        Batch::Many(mutations) => mutations,
        Batch::One(mutation) => vec![mutation],
    })
}

pub fn apply(args: ApplyArgs, cwd: &Path) -> Result<()> {
    let path = cwd.join(&args.mutations);
    let json = fs::read_to_string(&path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let mutations = parse_batch(&json)?;

    let store = open_store(cwd)?;
    let mut session = load_session(&store, &args.project_id)?;

    println!(
        "🔧 {} {} mutations to {}",
        "Applying".green().bold(),
        mutations.len(),
        args.project_id
    );
    println!();

    let mut applied = 0;
    for mutation in mutations {
        let name = mutation.name();
        match session.apply(mutation) {
            Outcome::Applied { changes } => {
                applied += 1;
                println!("   {} {} ({} changes)", "✓".green(), name, changes.len());
            }
            Outcome::Noop { error } => {
                println!("   {} {}: {}", "✗".red(), name, error);
            }
        }
    }

    println!();
    if args.dry_run {
        println!("   {} nothing saved", "Dry run:".yellow());
    } else if applied > 0 {
        session.save(&store)?;
        println!("✨ {} {} mutations applied", "Saved".green().bold(), applied);
    } else {
        println!("   Nothing changed");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_and_many() {
        let one = r#"{ "AddPage": { "name": "About" } }"#;
        assert_eq!(parse_batch(one).unwrap().len(), 1);

        let many = r#"[
            { "AddPage": { "name": "About" } },
            { "DeleteElement": { "element_id": "x" } }
        ]"#;
        let mutations = parse_batch(many).unwrap();
        assert_eq!(mutations.len(), 2);
        assert_eq!(mutations[1].name(), "delete_element");
    }

    #[test]
    fn test_parse_rejects_unknown_mutation() {
        assert!(parse_batch(r#"{ "Explode": {} }"#).is_err());
    }
}
