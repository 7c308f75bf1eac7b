use super::{load_session, open_store};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use sitekit_common::TreeStats;
use sitekit_model::{Element, Project};
use std::path::Path;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Project id
    pub project_id: String,

    /// Print the stored JSON instead of a tree
    #[arg(long)]
    pub json: bool,
}

pub fn show(args: ShowArgs, cwd: &Path) -> Result<()> {
    let store = open_store(cwd)?;
    let session = load_session(&store, &args.project_id)?;
    let project = session.project();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&project.content)?);
        return Ok(());
    }

    print!("{}", render_tree(project));

    let stats = TreeStats::of(project);
    println!();
    println!(
        "   Pages: {}  Sections: {}  Elements: {}  Depth: {}",
        stats.pages, stats.sections, stats.elements, stats.max_depth
    );

    Ok(())
}

/// Indented outline of pages, their sections and elements
pub fn render_tree(project: &Project) -> String {
    let mut out = format!(
        "{} ({})\n",
        project.content.settings.site_name.bold(),
        project.id.dimmed()
    );

    for page in &project.content.pages {
        out.push_str(&format!("  {} {}\n", page.name.bright_blue(), page.path.dimmed()));

        for section_id in &page.sections {
            match project.section(section_id) {
                Some(section) => {
                    out.push_str(&format!(
                        "    {} [{}]\n",
                        section.name.bright_white(),
                        section.id.dimmed()
                    ));
                    for element in &section.elements {
                        push_element(&mut out, element, 3);
                    }
                }
                None => out.push_str(&format!("    {} {}\n", "missing".red(), section_id)),
            }
        }
    }

    let orphaned = project.orphaned_sections();
    if !orphaned.is_empty() {
        out.push_str(&format!("  {} {}\n", "Unlisted sections:".yellow(), orphaned.join(", ")));
    }

    out
}

fn push_element(out: &mut String, element: &Element, depth: usize) {
    out.push_str(&format!(
        "{}- {} {} [{}]\n",
        "  ".repeat(depth),
        element.name,
        element.kind.to_string().cyan(),
        element.id.dimmed()
    ));

    for child in &element.children {
        push_element(out, child, depth + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitekit_model::{Page, Section};

    #[test]
    fn test_render_tree_lists_every_level() {
        colored::control::set_override(false);

        let mut project = Project::new("site", "Studio");
        let mut hero = Section::new("hero", "Hero");
        hero.elements.push(Element {
            id: "title".to_string(),
            name: "Heading".to_string(),
            kind: "heading:h-1".parse().unwrap(),
            content: Default::default(),
            style: Default::default(),
            children: vec![],
        });
        project.content.sections.insert(hero);
        project.content.sections.insert(Section::new("spare", "Spare"));

        let mut home = Page::new("home", "Home");
        home.sections.push("hero".to_string());
        project.content.pages.push(home);

        let tree = render_tree(&project);

        assert!(tree.contains("Studio (site)"));
        assert!(tree.contains("  Home /home"));
        assert!(tree.contains("    Hero [hero]"));
        assert!(tree.contains("      - Heading heading:h-1 [title]"));
        assert!(tree.contains("Unlisted sections: spare"));
    }
}
