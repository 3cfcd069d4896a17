//! App message handlers (lifecycle)

use crate::commands::Cmd;
use crate::messages::AppMsg;
use crate::model::AppModel;

/// Handle app messages
pub fn update_app(model: &mut AppModel, msg: AppMsg) -> Option<Cmd> {
    match msg {
        AppMsg::Quit { save } => {
            if save {
                if let Err(e) = model.save_grid() {
                    tracing::error!("Failed to save grid on exit: {}", e);
                    return Some(Cmd::batch(vec![
                        Cmd::ShowError {
                            message: format!("Could not save grid data: {}", e),
                        },
                        Cmd::Exit,
                    ]));
                }
            }
            Some(Cmd::Exit)
        }
    }
}
