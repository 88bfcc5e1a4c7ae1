//! Terminal UI for the bookmark picker.
//!
//! ```text
//! ItemList ──filter/select──▶ ListView (dirty flag)
//! AppState ──compute_viewmodel──▶ UIViewModel ──render──▶ ANSI output
//! ```
//!
//! - [`view`]: list observer deciding when a redraw is needed
//! - [`viewmodel`]: display-ready frame description
//! - [`renderer`]: rendering entry point
//! - [`components`]: header, search box, rows, empty state, footer
//! - [`helpers`]: truncation, match ranges, highlighting
//! - [`theme`]: color schemes and ANSI escapes

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod view;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use view::ListView;
pub use viewmodel::{DisplayItem, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo, UIViewModel};
