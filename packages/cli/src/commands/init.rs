use super::open_store;
use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use sitekit_editor::{EditSession, GatewayError, PersistenceGateway};
use sitekit_model::Project;
use std::fs;
use std::path::Path;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Project id (letters, digits, '-' and '_')
    pub project_id: String,

    /// Site name
    #[arg(short, long, default_value = "My Site")]
    pub name: String,

    /// Force overwrite an existing project
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    println!("{}", "📝 Initializing Sitekit project...".bright_blue().bold());

    let config_path = cwd.join(DEFAULT_CONFIG_NAME);
    if !config_path.exists() {
        let config_json = serde_json::to_string_pretty(&Config::default())?;
        fs::write(&config_path, config_json)
            .with_context(|| format!("cannot write {}", config_path.display()))?;
        println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    }

    let store = open_store(cwd)?;

    match store.load(&args.project_id) {
        Ok(_) if !args.force => {
            println!(
                "{} Project {} already exists",
                "⚠️".yellow(),
                args.project_id.bright_white()
            );
            println!("Use --force to overwrite");
            return Ok(());
        }
        Ok(_) | Err(GatewayError::NotFound(_)) => {}
        Err(err) => return Err(err).context("cannot check for an existing project"),
    }

    let mut session = EditSession::new(Project::new(args.project_id.as_str(), args.name.as_str()));
    session.add_page("Home");
    session.add_section("Hero")?;
    session.save(&store)?;

    println!("  {} Created project {}", "✓".green(), args.project_id);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Run: sitekit types");
    println!("  2. Run: sitekit apply {} mutations.json", args.project_id);
    println!("  3. Run: sitekit show {}", args.project_id);

    Ok(())
}
