pub mod dialogs;
pub mod preview;
