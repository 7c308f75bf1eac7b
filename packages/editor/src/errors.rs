//! Error types for the editor

use crate::mutations::MutationError;
use crate::persistence::GatewayError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Persistence error: {0}")]
    Persistence(#[from] GatewayError),

    #[error("Mutation error: {0}")]
    Mutation(#[from] MutationError),

    #[error("No page selected")]
    NoPageSelected,
}
