//! Core module for the catalog editor
//!
//! 包含核心组件:
//! - CatalogStore: products currently on display
//! - ViewProjector: card grid and table kept isomorphic to the store
//! - SyncController: CRUD lifecycle against the remote catalog
//! - classify: failure kind → user-facing text
//! - Notifier / EditingSurface / Confirmer: host collaborators

pub mod classify;
pub mod config;
pub mod controller;
pub mod editing;
pub mod notify;
pub mod projector;
pub mod store;

pub use classify::{ErrorReport, Operation, classify};
pub use config::Config;
pub use controller::{
    Action, Collaborators, DELETE_PROMPT, EditState, ListState, Outcome, Phase, SyncController,
};
pub use editing::{AutoConfirm, Confirmer, EditingSurface, FormState, FormView};
pub use notify::{Notification, NotificationLog, Notifier, Severity};
pub use projector::{ErrorPanel, PanelAction, ProjectionKind, ViewProjector};
pub use store::{CatalogStore, StoreError};
