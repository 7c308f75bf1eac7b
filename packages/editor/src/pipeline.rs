//! # Render Pipeline
//!
//! Coordinates the edit loop: Event → Mutate → Replace → Render
//!
//! The Pipeline owns an [`EditSession`] and a [`Renderer`]. The renderer only
//! ever reads the tree. What it reports back (clicks, completed drags) is
//! routed into selection changes or mutations here.

use crate::mutations::{DropPosition, Mutation, Outcome};
use crate::selection::Selection;
use crate::session::EditSession;
use serde::{Deserialize, Serialize};
use sitekit_model::Project;

/// Read-only view of the document, e.g. the editor canvas
pub trait Renderer {
    fn render(&mut self, project: &Project, selection: &Selection);
}

/// What the renderer reports back
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RendererEvent {
    ElementClicked {
        element_id: String,
    },
    DragCompleted {
        element_id: String,
        target_id: String,
        position: DropPosition,
    },
}

/// Manages the full edit → render loop
pub struct Pipeline<R: Renderer> {
    session: EditSession,
    renderer: R,

    /// Session version and selection shown by the last render
    last_render: Option<(u64, Selection)>,
}

impl<R: Renderer> Pipeline<R> {
    pub fn new(session: EditSession, renderer: R) -> Self {
        Self {
            session,
            renderer,
            last_render: None,
        }
    }

    /// Apply mutation and re-render if anything changed
    pub fn apply_mutation(&mut self, mutation: Mutation) -> PipelineResult {
        let outcome = self.session.apply(mutation);
        let rendered = self.render_if_stale();

        PipelineResult {
            version: self.session.version(),
            outcome: Some(outcome),
            rendered,
        }
    }

    /// Route a renderer event back into the session
    pub fn handle_event(&mut self, event: RendererEvent) -> PipelineResult {
        tracing::debug!(?event, "renderer event");

        match event {
            RendererEvent::ElementClicked { element_id } => {
                if !self.session.select_element(&element_id) {
                    tracing::warn!(element_id = %element_id, "clicked element is not selectable");
                }

                let rendered = self.render_if_stale();
                PipelineResult {
                    version: self.session.version(),
                    outcome: None,
                    rendered,
                }
            }
            RendererEvent::DragCompleted {
                element_id,
                target_id,
                position,
            } => self.apply_mutation(Mutation::MoveElement {
                element_id,
                target_id,
                position,
            }),
        }
    }

    /// Unconditional render (initial paint, recovery)
    pub fn full_render(&mut self) {
        self.renderer
            .render(self.session.project(), self.session.selection());
        self.last_render = Some((self.session.version(), self.session.selection().clone()));
    }

    pub fn session(&self) -> &EditSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut EditSession {
        &mut self.session
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Version shown by the last render, if any
    pub fn last_rendered_version(&self) -> Option<u64> {
        self.last_render.as_ref().map(|(version, _)| *version)
    }

    /// Forget the last render (force a render on the next change check)
    pub fn invalidate(&mut self) {
        self.last_render = None;
    }

    fn render_if_stale(&mut self) -> bool {
        let fresh = matches!(
            &self.last_render,
            Some((version, selection))
                if *version == self.session.version() && selection == self.session.selection()
        );

        if fresh {
            return false;
        }

        self.full_render();
        true
    }
}

/// Result of pipeline execution
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Session version after the step
    pub version: u64,

    /// Set when the step ran a mutation
    pub outcome: Option<Outcome>,

    /// Whether the renderer was called
    pub rendered: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitekit_model::Page;

    #[derive(Default)]
    struct Frames {
        count: usize,
        last_selection: Selection,
    }

    impl Renderer for Frames {
        fn render(&mut self, _project: &Project, selection: &Selection) {
            self.count += 1;
            self.last_selection = selection.clone();
        }
    }

    fn pipeline() -> Pipeline<Frames> {
        let mut project = Project::new("p", "Site");
        project.content.pages.push(Page::new("home", "Home"));
        Pipeline::new(EditSession::new(project), Frames::default())
    }

    #[test]
    fn test_pipeline_initial_render() {
        let mut pipeline = pipeline();
        assert_eq!(pipeline.last_rendered_version(), None);

        pipeline.full_render();

        assert_eq!(pipeline.renderer().count, 1);
        assert_eq!(pipeline.last_rendered_version(), Some(0));
    }

    #[test]
    fn test_noop_mutation_does_not_rerender() {
        let mut pipeline = pipeline();
        pipeline.full_render();

        let result = pipeline.apply_mutation(Mutation::DeletePage {
            page_id: "missing".to_string(),
        });

        assert!(!result.rendered);
        assert_eq!(result.version, 0);
        assert_eq!(pipeline.renderer().count, 1);
    }

    #[test]
    fn test_applied_mutation_rerenders_with_new_selection() {
        let mut pipeline = pipeline();
        pipeline.full_render();

        let result = pipeline.apply_mutation(Mutation::AddPage {
            name: "About".to_string(),
        });

        assert!(result.rendered);
        assert_eq!(result.version, 1);
        let about = &pipeline.session().project().content.pages[1];
        assert_eq!(pipeline.renderer().last_selection.page_id(), Some(about.id.as_str()));
    }
}
