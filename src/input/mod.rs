//! Keyboard input for the drawer.
//!
//! ```text
//! KeyEvent -> Keybindings::resolve() -> DrawerCommand -> Drawer::execute()
//! ```
//!
//! - [`command`] - the [`DrawerCommand`] enum
//! - [`keybindings`] - default key map

pub mod command;
pub mod keybindings;

pub use command::DrawerCommand;
pub use keybindings::{KeyCombo, Keybindings};
