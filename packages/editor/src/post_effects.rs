//! # Post-Effect System
//!
//! Mutations can require further changes to keep the tree consistent. For
//! example, deleting a section must also drop every page's reference to it.
//!
//! Post-effects are:
//! - **Deterministic**: Same mutation on the same tree always produces the same effects
//! - **Applied in the same fork**: primary and secondary changes land together or not at all
//! - **Minimal**: Only generate necessary secondary mutations

use crate::mutations::{Change, Mutation, MutationError, MutationResult, Outcome};
use sitekit_model::{fork_project, IDGenerator, Project};

/// Post-effect that can be triggered by a mutation
pub trait PostEffect: std::fmt::Debug {
    /// Inspect the mutation and the already-patched tree, return secondary mutations
    fn analyze(&self, mutation: &Mutation, doc: &Project) -> Vec<Mutation>;
}

/// Remove references to a deleted section from every page
#[derive(Debug)]
pub struct DetachDeletedSection;

impl PostEffect for DetachDeletedSection {
    fn analyze(&self, mutation: &Mutation, doc: &Project) -> Vec<Mutation> {
        match mutation {
            Mutation::DeleteSection { section_id } => doc
                .content
                .pages
                .iter()
                .filter(|page| page.sections.iter().any(|s| s == section_id))
                .map(|page| Mutation::DetachSection {
                    page_id: page.id.clone(),
                    section_id: section_id.clone(),
                })
                .collect(),
            _ => vec![],
        }
    }
}

/// Post-effect engine that applies all registered effects
#[derive(Debug)]
pub struct PostEffectEngine {
    effects: Vec<Box<dyn PostEffect>>,
}

impl PostEffectEngine {
    /// Create engine with default effects
    pub fn new() -> Self {
        Self {
            effects: vec![Box::new(DetachDeletedSection)],
        }
    }

    /// Engine with no effects at all
    pub fn empty() -> Self {
        Self { effects: vec![] }
    }

    pub fn with_effect(mut self, effect: impl PostEffect + 'static) -> Self {
        self.effects.push(Box::new(effect));
        self
    }

    /// Analyze a mutation and generate all secondary mutations
    pub fn analyze(&self, mutation: &Mutation, doc: &Project) -> Vec<Mutation> {
        let mut secondary_mutations = Vec::new();

        for effect in &self.effects {
            let mut effect_mutations = effect.analyze(mutation, doc);
            secondary_mutations.append(&mut effect_mutations);
        }

        secondary_mutations
    }

    /// Apply a mutation with all its post-effects to a fork of `tree`.
    ///
    /// On any failure the result carries a fresh, unmodified fork.
    pub fn apply_with_effects(
        &self,
        mutation: &Mutation,
        tree: &Project,
        ids: &mut IDGenerator,
    ) -> MutationResult {
        let mut working = fork_project(tree);

        match self.patch_all(mutation, &mut working, ids) {
            Ok(changes) => {
                tracing::debug!(
                    mutation = mutation.name(),
                    changes = changes.len(),
                    "mutation applied"
                );
                MutationResult {
                    project: working,
                    outcome: Outcome::Applied { changes },
                }
            }
            Err(error) => {
                tracing::warn!(mutation = mutation.name(), %error, "mutation skipped");
                MutationResult {
                    project: fork_project(tree),
                    outcome: Outcome::Noop { error },
                }
            }
        }
    }

    fn patch_all(
        &self,
        mutation: &Mutation,
        doc: &mut Project,
        ids: &mut IDGenerator,
    ) -> Result<Vec<Change>, MutationError> {
        let mut changes = vec![mutation.patch(doc, ids)?];

        for secondary in self.analyze(mutation, doc) {
            changes.push(secondary.patch(doc, ids)?);
        }

        Ok(changes)
    }
}

impl Default for PostEffectEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitekit_model::{Page, Section};

    fn shared_section_project() -> Project {
        let mut project = Project::new("p", "Site");
        project.content.sections.insert(Section::new("hero", "Hero"));
        for id in ["home", "about"] {
            let mut page = Page::new(id, id);
            page.sections.push("hero".to_string());
            project.content.pages.push(page);
        }
        project
    }

    #[test]
    fn test_post_effect_engine_creation() {
        let engine = PostEffectEngine::new();
        assert_eq!(engine.effects.len(), 1);
        assert!(PostEffectEngine::empty().effects.is_empty());
    }

    #[test]
    fn test_analyze_returns_empty_for_simple_mutations() {
        let engine = PostEffectEngine::new();
        let mutation = Mutation::DeleteElement {
            element_id: "x".to_string(),
        };

        assert!(engine.analyze(&mutation, &shared_section_project()).is_empty());
    }

    #[test]
    fn test_delete_section_detaches_from_every_page() {
        let project = shared_section_project();
        let mut ids = IDGenerator::new("p");
        let mutation = Mutation::DeleteSection {
            section_id: "hero".to_string(),
        };

        let result = PostEffectEngine::new().apply_with_effects(&mutation, &project, &mut ids);

        assert_eq!(result.outcome.changes().len(), 3);
        assert!(result.project.section("hero").is_none());
        assert!(result.project.content.pages.iter().all(|p| p.sections.is_empty()));
    }

    #[test]
    fn test_without_effects_references_dangle() {
        let project = shared_section_project();
        let mut ids = IDGenerator::new("p");
        let mutation = Mutation::DeleteSection {
            section_id: "hero".to_string(),
        };

        let result = PostEffectEngine::empty().apply_with_effects(&mutation, &project, &mut ids);

        assert!(result.project.section("hero").is_none());
        assert_eq!(result.project.content.pages[0].sections, vec!["hero"]);
    }
}
