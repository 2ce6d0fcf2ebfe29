//! # pilot-view - Navigation Display Engine
//!
//! Renders navigation states as views and transitions between them, either by
//! swapping instantly or by animating the new view in while old views animate out.
//!
//! ## Features
//!
//! - **Idempotent rendering**: re-rendering the state already on screen builds nothing
//! - **Pluggable strategies**: direct swaps or enter/exit transitions behind one trait
//! - **Exactly-once cleanup**: every outgoing view is detached once, however its
//!   transition ends
//! - **Terminal demo**: a ratatui front end that drives the engine interactively
//!
//! ## Architecture
//!
//! - [`error`] - Centralized error types and handling
//! - [`token`], [`registry`], [`element`] - State tokens, capabilities and bound views
//! - [`factory`] - The view construction contract integrators implement
//! - [`transition`] - Transition specs, easing and the timeline that drives them
//! - [`display`] - Display strategies and the element container
//! - [`coordinator`] - The render entry point tying everything together
//! - [`config`] - Strategy, timing and theme settings
//! - [`render`], [`input`], [`app`] - The terminal front end

// Core engine
pub mod coordinator;
pub mod display;
pub mod element;
pub mod error;
pub mod factory;
pub mod registry;
pub mod token;
pub mod transition;

// Ambient layers
pub mod config;

// Terminal front end
pub mod app;
pub mod input;
pub mod render;

// Re-export commonly used types for convenience
pub use error::{DisplayError, Result};

// Public API surface for external usage
pub use app::Application;
pub use config::DisplayConfig;
pub use coordinator::{RenderCoordinator, RenderOutcome};
pub use display::{
    AnimatedDisplayStrategy, DirectDisplayStrategy, DisplayContext, DisplayStrategy,
    OutgoingTracker,
};
pub use element::{ElementId, Phase, ViewKind, VisualElement};
pub use factory::ViewFactory;
pub use registry::CapabilityRegistry;
pub use token::StateToken;
pub use transition::{TransitionFinished, TransitionSpec};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
