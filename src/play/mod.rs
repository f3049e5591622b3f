use std::io;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, EventStream},
    execute,
};
use futures::StreamExt;
use ratatui::DefaultTerminal;
use tracing::{debug, info, instrument, warn};

use crate::{
    errors::TracingError,
    wordle::{
        session::Command,
        words::{Backend, Words},
        Dimensions, Session,
    },
};

mod input;
use input::Action;

pub mod keyboard;
use keyboard::KeyboardLayout;

mod render;

struct App<B> {
    session: Session,
    words: Words<B>,
    keyboard: KeyboardLayout,
    error: Option<String>,
    show_rules: bool,
}

/// While the rules are open, any input just closes them.
fn through_rules(action: Action, show_rules: &mut bool) -> Option<Action> {
    match action {
        Action::Rules => {
            *show_rules = !*show_rules;
            None
        }
        _ if *show_rules => {
            *show_rules = false;
            None
        }
        other => Some(other),
    }
}

/// Hands the terminal back with `restore` when a setup step after taking it
/// over fails.
fn restore_on_error<T>(
    setup: io::Result<T>,
    restore: impl FnOnce() -> io::Result<()>,
) -> io::Result<T> {
    if setup.is_err() {
        if let Err(err) = restore() {
            warn!(%err, "couldn't restore the terminal");
        }
    }

    setup
}

impl<B: Backend> App<B> {
    async fn run(mut self, terminal: &mut DefaultTerminal) -> anyhow::Result<Session> {
        let mut events = EventStream::new();

        loop {
            terminal.draw(|frame| {
                self.keyboard = render::draw(
                    frame,
                    &self.session,
                    self.error.as_deref(),
                    self.show_rules,
                );
            })?;

            let Some(event) = events.next().await else {
                debug!("event stream closed");
                break;
            };

            let action = input::action(&event?, &self.keyboard)
                .and_then(|action| through_rules(action, &mut self.show_rules));

            match action {
                Some(Action::Quit) => break,
                Some(Action::Play(command)) => self.play(command).await,
                Some(Action::Rules) | None => {}
            }
        }

        Ok(self.session)
    }

    async fn play(&mut self, command: Command) {
        match self.session.apply(command, &self.words).await {
            Ok(outcome) => {
                self.error = None;
                debug!(?outcome);
            }
            Err(err) => {
                err.trace();
                self.error = Some(err.to_string());
            }
        }
    }
}

/// Plays in the terminal until the player quits.
///
/// The first target is picked before the terminal is taken over, so a store
/// that can't start a game is reported as a plain error. Returns the share
/// text of the last game if it was finished.
#[instrument(skip_all)]
pub async fn run<B: Backend>(
    words: Words<B>,
    dimensions: Dimensions,
) -> anyhow::Result<Option<String>> {
    let session = Session::start(&words, dimensions).await?;
    info!(?dimensions, "starting game");

    let mut terminal = ratatui::try_init()?;
    restore_on_error(
        execute!(std::io::stdout(), EnableMouseCapture),
        ratatui::try_restore,
    )?;

    let app = App {
        session,
        words,
        keyboard: KeyboardLayout::default(),
        error: None,
        show_rules: false,
    };
    let result = app.run(&mut terminal).await;

    if let Err(err) = execute!(std::io::stdout(), DisableMouseCapture) {
        warn!(%err, "couldn't disable mouse capture");
    }
    ratatui::try_restore()?;

    Ok(result?.share_text())
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, io};

    use pretty_assertions::assert_eq;

    use super::{restore_on_error, through_rules, Action};
    use crate::wordle::session::Command;

    #[test]
    fn failed_setup_restores_the_terminal() {
        let restored = Cell::new(false);
        let result = restore_on_error(
            Err::<(), _>(io::Error::new(io::ErrorKind::Unsupported, "no mouse")),
            || {
                restored.set(true);
                Ok(())
            },
        );

        assert!(result.is_err());
        assert!(restored.get());
    }

    #[test]
    fn successful_setup_keeps_the_terminal() {
        let restored = Cell::new(false);
        let result = restore_on_error(Ok(7), || {
            restored.set(true);
            Ok(())
        });

        assert_eq!(result.unwrap(), 7);
        assert!(!restored.get());
    }

    #[test]
    fn restore_failure_keeps_the_setup_error() {
        let result = restore_on_error(
            Err::<(), _>(io::Error::new(io::ErrorKind::Unsupported, "no mouse")),
            || Err(io::Error::new(io::ErrorKind::Other, "no tty")),
        );

        assert_eq!(result.unwrap_err().to_string(), "no mouse");
    }

    #[test]
    fn rules_swallow_input_until_closed() {
        let mut show_rules = false;

        assert_eq!(through_rules(Action::Rules, &mut show_rules), None);
        assert!(show_rules);

        assert_eq!(
            through_rules(Action::Play(Command::Letter('a')), &mut show_rules),
            None
        );
        assert!(!show_rules);

        assert_eq!(
            through_rules(Action::Play(Command::Letter('a')), &mut show_rules),
            Some(Action::Play(Command::Letter('a')))
        );

        through_rules(Action::Rules, &mut show_rules);
        assert_eq!(through_rules(Action::Quit, &mut show_rules), None);
        assert!(!show_rules);
        assert_eq!(
            through_rules(Action::Quit, &mut show_rules),
            Some(Action::Quit)
        );
    }
}
