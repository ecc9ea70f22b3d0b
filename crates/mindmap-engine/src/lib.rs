pub mod diagram;
pub mod host;
pub mod io;
pub mod layout;
pub mod models;
pub mod notes;
pub mod parsing;
pub mod render;
pub mod viewport;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use diagram::{Diagram, DiagramSettings};
pub use host::{DiagramRef, Host};
pub use io::*;
pub use layout::{Layout, LayoutStrategy, layout};
pub use models::*;
pub use notes::{HtmlNotes, NotePanel, NoteRenderer, PlainTextNotes};
pub use parsing::{IdStrategy, parse, parse_with};
pub use render::{Surface, SvgSurface, TextAnchor};
pub use viewport::{Transform, Viewport};
