//! Headless application state for WebOS.
//!
//! Each module is the model behind one toy app: plain state structs plus
//! the calls they make into the VFS or session storage. Rendering and
//! input handling live with whoever mounts them.

pub mod deck;
pub mod editor;
pub mod sheets;

pub use deck::{DeckState, Slide};
pub use editor::EditorSession;
pub use sheets::SheetStore;
