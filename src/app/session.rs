//! The controller loop tying state, worker and frontend together.
//!
//! [`Session`] owns the only [`AppState`], feeds every [`Event`] through
//! [`handle_event`], performs the returned [`Action`]s and redraws through
//! the injected [`Frontend`]. Events come from two places: command lines
//! typed by the user and the worker channel (responses, timers, downloads).

use std::path::PathBuf;

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, warn};

use super::actions::Action;
use super::commands::Command;
use super::handler::{handle_event, Event};
use super::modes::Panel;
use super::state::AppState;
use crate::domain::error::{ErrorReport, Result};
use crate::domain::recipe::RecipeId;
use crate::ui::render::Frontend;
use crate::worker::Worker;

/// One interactive client session.
pub struct Session<F: Frontend> {
    state: AppState,
    worker: Worker,
    frontend: F,
    download_dir: PathBuf,
}

impl<F: Frontend> Session<F> {
    #[must_use]
    pub const fn new(state: AppState, worker: Worker, frontend: F, download_dir: PathBuf) -> Self {
        Self {
            state,
            worker,
            frontend,
            download_dir,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub const fn frontend(&self) -> &F {
        &self.frontend
    }

    /// Runs the session until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if input cannot be read or the frontend fails to
    /// draw. Request failures never end the session.
    pub async fn run<R>(mut self, input: R, mut events: UnboundedReceiver<Event>) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();
        self.render()?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        debug!("input closed");
                        break;
                    };
                    if !self.handle_line(&line)? {
                        break;
                    }
                }
                Some(event) = events.recv() => {
                    self.handle(&event)?;
                }
            }
        }

        info!("session ended");
        Ok(())
    }

    /// Parses and applies one command line. Returns `false` on `quit`.
    ///
    /// # Errors
    ///
    /// Returns an error if the frontend fails.
    pub fn handle_line(&mut self, line: &str) -> Result<bool> {
        match Command::parse(line, self.target_recipe()) {
            Command::Event(event) => self.handle(&event)?,
            Command::Help => self.frontend.show_text(Command::help_text())?,
            Command::Quit => return Ok(false),
            Command::Empty => self.render()?,
            Command::Invalid(message) => {
                let action = self.state.show_error(message);
                self.execute(vec![action])?;
                self.render()?;
            }
        }
        Ok(true)
    }

    /// Runs `event` through the handler and performs the resulting actions.
    ///
    /// Handler errors become an error notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the frontend fails.
    pub fn handle(&mut self, event: &Event) -> Result<()> {
        match handle_event(&mut self.state, event) {
            Ok((render, actions)) => {
                self.execute(actions)?;
                if render {
                    self.render()?;
                }
            }
            Err(e) => {
                warn!(error = %e, "event rejected");
                let message = ErrorReport::from(&e).message_or(&e.to_string());
                let action = self.state.show_error(message);
                self.execute(vec![action])?;
                self.render()?;
            }
        }
        Ok(())
    }

    /// Redraws the current state.
    ///
    /// # Errors
    ///
    /// Returns an error if the frontend fails.
    pub fn render(&mut self) -> Result<()> {
        let (rows, cols) = self.frontend.size();
        let viewmodel = self.state.compute_viewmodel(rows, cols);
        self.frontend.render(&viewmodel, &self.state.theme)
    }

    fn execute(&mut self, actions: Vec<Action>) -> Result<()> {
        for action in actions {
            match action {
                Action::Dispatch(envelope) => self.worker.dispatch(envelope),
                Action::Debounce { key, envelope } => self.worker.debounce(key, envelope),
                Action::CancelDebounce(key) => self.worker.cancel(key),
                Action::ScheduleDismiss { id, after } => self.worker.schedule_dismiss(id, after),
                Action::SaveDownload {
                    format,
                    file_name,
                    bytes,
                } => self
                    .worker
                    .save_download(self.download_dir.clone(), format, file_name, bytes),
                Action::CopyToClipboard(text) => {
                    let ok = match self.frontend.copy_to_clipboard(&text) {
                        Ok(()) => true,
                        Err(e) => {
                            warn!(error = %e, "clipboard write failed");
                            false
                        }
                    };
                    self.handle(&Event::ClipboardResult { ok })?;
                }
            }
        }
        Ok(())
    }

    /// Recipe that id-less commands act on: the open one in the detail
    /// panel, otherwise the selected list row.
    fn target_recipe(&self) -> Option<RecipeId> {
        match self.state.panel {
            Panel::Detail => self.state.detail.as_ref().map(|d| d.id),
            Panel::Library => self.state.selected_recipe().map(|r| r.id),
            Panel::Generator => None,
        }
    }
}

impl<F: Frontend> std::fmt::Debug for Session<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("panel", &self.state.panel)
            .field("download_dir", &self.download_dir)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::sync::mpsc;

    use crate::api::fake::{summary, FakeApi};
    use crate::app::modes::Severity;
    use crate::ui::theme::Theme;
    use crate::ui::viewmodel::{PanelView, UIViewModel};
    use crate::worker::WorkerSettings;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<UIViewModel>,
        clipboard: Vec<String>,
        texts: Vec<String>,
    }

    impl Frontend for Recorder {
        fn size(&self) -> (usize, usize) {
            (24, 100)
        }

        fn render(&mut self, viewmodel: &UIViewModel, _theme: &Theme) -> Result<()> {
            self.frames.push(viewmodel.clone());
            Ok(())
        }

        fn copy_to_clipboard(&mut self, text: &str) -> Result<()> {
            self.clipboard.push(text.to_string());
            Ok(())
        }

        fn show_text(&mut self, text: &str) -> Result<()> {
            self.texts.push(text.to_string());
            Ok(())
        }
    }

    fn session(api: Arc<FakeApi>) -> (Session<Recorder>, mpsc::UnboundedReceiver<Event>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let worker = Worker::new(api, tx, WorkerSettings::default());
        let session = Session::new(
            AppState::new(Theme::default()),
            worker,
            Recorder::default(),
            std::env::temp_dir(),
        );
        (session, rx)
    }

    #[tokio::test(start_paused = true)]
    async fn typed_search_lists_highlighted_results() {
        let api = Arc::new(FakeApi::with_recipes(vec![
            summary(1, "Chicken Soup", "chicken, leeks", Some(4)),
            summary(2, "BBQ Chicken", "chicken, sauce", None),
            summary(3, "Tofu Bowl", "tofu, rice", Some(5)),
        ]));
        let (mut session, mut rx) = session(Arc::clone(&api));

        assert!(session.handle_line("search chicken").unwrap());
        let event = rx.recv().await.unwrap();
        session.handle(&event).unwrap();

        assert_eq!(api.calls(), vec!["list_recipes"]);
        let PanelView::Library(library) = &session.frontend().frames.last().unwrap().body else {
            panic!("expected library");
        };
        let titles: Vec<String> = library
            .display_items
            .iter()
            .map(|i| i.title.marked("<", ">"))
            .collect();
        assert_eq!(titles, vec!["<Chicken> Soup", "BBQ <Chicken>"]);
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_search_shows_term_in_message() {
        let api = Arc::new(FakeApi::with_recipes(vec![summary(1, "Soup", "water", None)]));
        let (mut session, mut rx) = session(api);

        session.handle_line("search paella").unwrap();
        let event = rx.recv().await.unwrap();
        session.handle(&event).unwrap();

        assert!(session
            .state()
            .list_message
            .as_deref()
            .unwrap()
            .contains("paella"));
    }

    #[tokio::test(start_paused = true)]
    async fn rejected_command_becomes_error_notification() {
        let (mut session, mut rx) = session(Arc::new(FakeApi::default()));
        session.handle_line("rating 9").unwrap();

        let notification = session.state().notification.clone().unwrap();
        assert_eq!(notification.severity, Severity::Error);
        assert!(notification.message.contains('9'));

        tokio::time::sleep(Duration::from_secs(6)).await;
        let event = rx.recv().await.unwrap();
        assert_eq!(event, Event::DismissNotification(notification.id));
        session.handle(&event).unwrap();
        assert!(session.state().notification.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn copy_goes_through_frontend() {
        let (mut session, _rx) = session(Arc::new(FakeApi::default()));
        session.state.current_recipe = Some(crate::api::fake::generated("Boil water"));

        session.handle_line("copy").unwrap();
        assert!(session.frontend().clipboard[0].ends_with("Boil water"));
        assert_eq!(
            session.state().notification.as_ref().unwrap().message,
            "Recipe copied to clipboard!"
        );
    }

    #[tokio::test]
    async fn run_stops_on_quit() {
        let (session, rx) = session(Arc::new(FakeApi::default()));
        let input: &[u8] = b"help\nabout\nquit\nall\n";
        session.run(input, rx).await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn help_is_shown_as_text() {
        let (mut session, _rx) = session(Arc::new(FakeApi::default()));
        session.handle_line("help").unwrap();
        assert!(session.frontend().texts[0].contains("generate"));
    }
}
