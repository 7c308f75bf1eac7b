//! # Sitekit Editor
//!
//! Document editing engine for the site builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Project tree, factory, id generator  │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession + mutations             │
//! │  - Fork, patch, replace                     │
//! │  - Post-effects in the same fork            │
//! │  - Selection follows changes                │
//! │  - Save/load through a gateway              │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer: reads the tree, reports events    │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Tree is source of truth**: the renderer only reads it
//! 2. **Replace, don't edit**: every mutation produces a new tree
//! 3. **Fail closed**: bad ids give an unchanged tree, never a panic
//! 4. **Single writer**: one session owns one tree
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sitekit_editor::{EditSession, FileGateway};
//! use sitekit_model::Project;
//!
//! let mut session = EditSession::new(Project::new("site-1", "My Site"));
//!
//! session.add_page("Home");
//! session.add_section("Hero")?;
//!
//! let section_id = session.selection().section_id().unwrap().to_string();
//! session.add_element(&section_id, "cyber-button:cb-3".parse()?);
//!
//! session.save(&FileGateway::new(".sitekit"))?;
//! ```

mod capability;
mod errors;
mod mutations;
mod persistence;
mod pipeline;
mod post_effects;
mod selection;
mod session;

pub use capability::{premium, CapabilityCache, SubscriptionCheck, DEFAULT_CAPABILITY_TTL};
pub use errors::EditorError;
pub use mutations::{
    Change, DropPosition, ElementUpdate, Mutation, MutationError, MutationResult, Outcome,
    SettingsUpdate, DEFAULT_DROP_POSITION,
};
pub use persistence::{FileGateway, GatewayError, MemoryGateway, PersistenceGateway, RetryingGateway};
pub use pipeline::{Pipeline, PipelineResult, Renderer, RendererEvent};
pub use post_effects::{DetachDeletedSection, PostEffect, PostEffectEngine};
pub use selection::Selection;
pub use session::EditSession;
