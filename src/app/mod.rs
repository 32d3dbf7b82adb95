//! Application layer coordinating state, events, and actions.
//!
//! This module defines the core application logic layer, sitting between the
//! plugin runtime (main.rs) and the domain/table layers. It implements the
//! event-driven architecture that powers the interactive console.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! User Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └───────── Navigate feedback ──────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input mode state machine types
//! - [`state`]: Central application state container and view model computation
//!
//! # Example
//!
//! ```rust
//! use zadmin::app::{handle_event, AppState, Event};
//! use zadmin::domain::PageKind;
//! use zadmin::seed::{EmbeddedSeed, SeedSource};
//! use zadmin::ui::theme::Theme;
//!
//! let mut state = AppState::new(EmbeddedSeed.load()?, 10, Theme::default());
//! handle_event(&mut state, &Event::GoToSection(PageKind::Plans))?;
//! assert_eq!(state.active, PageKind::Plans);
//! # Ok::<(), zadmin::ZadminError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

#[cfg(test)]
mod scenarios;

pub use actions::{Action, ExportFormat, Notice, Severity};
pub use handler::{handle_event, Event};
pub use modes::{InputMode, SearchFocus};
pub use state::{AppState, PAGE_SIZES};
