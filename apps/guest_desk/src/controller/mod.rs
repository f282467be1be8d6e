//! Controller layer: guest card state, UI events, keyboard shortcuts, and command orchestration.

pub mod cards;
pub mod events;
pub mod orchestration;
pub mod shortcuts;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::backend_bridge::commands::BackendCommand;
    use crate::controller::cards::CardHost;

    /// Records every side effect instead of touching the desktop.
    #[derive(Debug, Default)]
    pub struct RecordingHost {
        pub clipboard: Vec<String>,
        pub fail_clipboard: bool,
        pub opened: Vec<String>,
        pub submitted: Vec<BackendCommand>,
        pub queue_closed: bool,
    }

    impl CardHost for RecordingHost {
        fn write_clipboard(&mut self, text: &str) -> Result<(), String> {
            if self.fail_clipboard {
                return Err("clipboard unavailable".to_string());
            }
            self.clipboard.push(text.to_string());
            Ok(())
        }

        fn open_in_new_tab(&mut self, url: &str) {
            self.opened.push(url.to_string());
        }

        fn submit(&mut self, command: BackendCommand) -> Result<(), String> {
            if self.queue_closed {
                return Err("backend disconnected".to_string());
            }
            self.submitted.push(command);
            Ok(())
        }
    }
}
