//! Terminal user interface.
//!
//! Declarative rendering in two steps:
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`presenter`]: maps a check result to the result panel contents
//! - [`viewmodel`]: view model types representing renderable UI state
//! - [`renderer`]: top-level rendering entry point
//! - [`components`]: component renderers (header, inputs, prompt, result, footer)
//! - [`helpers`]: cursor positioning, truncation and wrapping
//! - [`theme`]: color schemes and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod presenter;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use presenter::{present, FlaggedLinksSection, ResultView, Tone};
pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{FooterInfo, HeaderInfo, InputRow, PromptInfo, UIViewModel};
