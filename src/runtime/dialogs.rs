//! Native message boxes (rfd)
//!
//! All dialogs are modal and block the calling thread until dismissed.

use rfd::{MessageButtons, MessageDialog, MessageDialogResult, MessageLevel};

const DIALOG_TITLE: &str = "cellgrid";

/// Ask a yes/no question; closing the dialog counts as "no"
pub fn confirm(question: &str) -> bool {
    let result = MessageDialog::new()
        .set_level(MessageLevel::Info)
        .set_title(DIALOG_TITLE)
        .set_description(question)
        .set_buttons(MessageButtons::YesNo)
        .show();
    matches!(result, MessageDialogResult::Yes)
}

/// Tell the user the grid file is missing and a blank grid is used
pub fn show_missing_file(file_name: &str) {
    show(
        MessageLevel::Warning,
        &format!("{} not found. Grid initialized with neutral data !", file_name),
    );
}

pub fn show_error(message: &str) {
    show(MessageLevel::Error, message);
}

fn show(level: MessageLevel, message: &str) {
    MessageDialog::new()
        .set_level(level)
        .set_title(DIALOG_TITLE)
        .set_description(message)
        .set_buttons(MessageButtons::Ok)
        .show();
}
