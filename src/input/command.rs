//! Commands produced by keyboard input in the drawer.

/// Every action a key press can trigger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawerCommand {
    // =========================================================================
    // Composer
    // =========================================================================
    /// Submit the draft to the open conversation (Enter)
    Send,
    /// Line break in the draft (Shift/Alt/Ctrl+Enter)
    InsertNewline,
    /// Typed character
    InsertChar(char),
    /// Delete the last draft character (Backspace)
    Backspace,
    /// Clear the whole draft (Ctrl+U)
    ClearDraft,

    // =========================================================================
    // Drawer navigation
    // =========================================================================
    /// Close the open conversation, keeping the list (Esc)
    Close,
    /// Next filter tab (Tab)
    NextTab,
    /// Previous filter tab (Shift+Tab)
    PreviousTab,
    /// Re-fetch the conversation list (Ctrl+R)
    Refresh,
}
