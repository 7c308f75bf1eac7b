use super::{load_session, open_store};
use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use serde_json::Value;
use sitekit_editor::{ElementUpdate, Outcome};
use sitekit_model::PropertyMap;
use std::path::Path;

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Project id
    pub project_id: String,

    /// Element to update
    pub element_id: String,

    /// Fields as key=value; keys are routed to content or style
    #[arg(required = true)]
    pub fields: Vec<String>,
}

/// Parse `key=value` pairs. Values that read as JSON keep their type.
pub fn parse_fields(pairs: &[String]) -> Result<PropertyMap> {
    let mut fields = PropertyMap::new();

    for pair in pairs {
        let Some((key, raw)) = pair.split_once('=') else {
            bail!("expected key=value, got {:?}", pair);
        };
        if key.is_empty() {
            bail!("empty field name in {:?}", pair);
        }

        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        fields.insert(key.to_string(), value);
    }

    Ok(fields)
}

pub fn set(args: SetArgs, cwd: &Path) -> Result<()> {
    let update = ElementUpdate::from_fields(parse_fields(&args.fields)?);
    if update.is_empty() {
        bail!("none of the given fields are element content or style fields");
    }

    let store = open_store(cwd)?;
    let mut session = load_session(&store, &args.project_id)?;

    match session.update_element(&args.element_id, update) {
        Outcome::Applied { .. } => {
            session.save(&store)?;
            println!("{} Updated {}", "✓".green(), args.element_id);
            Ok(())
        }
        Outcome::Noop { error } => bail!(error),
    }
}
