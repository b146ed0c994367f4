//! Line-oriented terminal front end for a practice session.

use chrono::NaiveDate;
use palabra_core::{Mode, Session, VocabError, VocabStore};
use rand::Rng;
use std::io::{BufRead, Write};

const HELP: &str = "\
commands:
  k          I know
  h          hint (examples)
  v          verify (meaning and examples)
  d          don't know (shows the answer)
  ok         confirm don't know
  m <mode>   switch mode: new, review, 5day, 15day, today
  r          reload files
  ?          this help
  q          quit";

/// One line of user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Know,
    Hint,
    Verify,
    DontKnow,
    Confirm,
    SwitchMode(Mode),
    Reload,
    Help,
    Quit,
}

impl Command {
    /// Parse a command line. Empty input yields `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        let (head, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let cmd = match head.to_ascii_lowercase().as_str() {
            "" => return Ok(None),
            "k" | "know" => Self::Know,
            "h" | "hint" => Self::Hint,
            "v" | "verify" => Self::Verify,
            "d" | "dont" => Self::DontKnow,
            "ok" => Self::Confirm,
            "m" | "mode" => {
                let mode = Mode::from_str(rest)
                    .ok_or_else(|| CommandError::UnknownMode(rest.trim().to_string()))?;
                Self::SwitchMode(mode)
            }
            "r" | "reload" => Self::Reload,
            "?" | "help" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => return Err(CommandError::UnknownCommand(head.to_string())),
        };
        Ok(Some(cmd))
    }
}

/// Input that is not a valid command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("'{0}' is not a command, type ? for help")]
    UnknownCommand(String),

    #[error("unknown mode '{0}' (expected new, review, 5day, 15day or today)")]
    UnknownMode(String),
}

/// Interactive session bound to a store, a random source and a clock.
pub struct Shell<'a, S: ?Sized, R, C> {
    store: &'a S,
    session: Session,
    rng: R,
    today: C,
}

impl<'a, S, R, C> Shell<'a, S, R, C>
where
    S: VocabStore + ?Sized,
    R: Rng,
    C: Fn() -> NaiveDate,
{
    /// Start a session. Fails when the dictionary is missing.
    pub fn start(
        store: &'a S,
        start_mode: Mode,
        mut rng: R,
        today: C,
    ) -> palabra_core::Result<Self> {
        let session = Session::start(store, start_mode, today(), &mut rng)?;
        Ok(Self {
            store,
            session,
            rng,
            today,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Read commands until `q` or end of input.
    pub fn run<I: BufRead, O: Write>(&mut self, input: I, out: &mut O) -> anyhow::Result<()> {
        self.render(out)?;
        for line in input.lines() {
            let line = line?;
            match Command::parse(&line) {
                Ok(Some(Command::Quit)) => break,
                Ok(Some(Command::Help)) => writeln!(out, "{HELP}")?,
                Ok(Some(cmd)) => {
                    if let Err(e) = self.execute(cmd) {
                        report(e, out)?;
                    }
                }
                Ok(None) => {}
                Err(e) => writeln!(out, "{e}")?,
            }
            self.render(out)?;
        }
        Ok(())
    }

    /// Apply one command to the session.
    pub fn execute(&mut self, cmd: Command) -> Result<(), VocabError> {
        let today = (self.today)();
        match cmd {
            Command::Know => self.session.i_know(self.store, today, &mut self.rng),
            Command::Hint => self.session.hint(),
            Command::Verify => self.session.verify(),
            Command::DontKnow => self.session.dont_know(),
            Command::Confirm => self.session.confirm_dont_know(self.store, today, &mut self.rng),
            Command::SwitchMode(mode) => {
                self.session.switch_mode(mode, self.store, today, &mut self.rng)
            }
            Command::Reload => self.session.reload_files(self.store, today, &mut self.rng),
            Command::Help | Command::Quit => Ok(()),
        }
    }

    fn render<O: Write>(&self, out: &mut O) -> anyhow::Result<()> {
        let session = &self.session;
        writeln!(out)?;
        writeln!(out, "[{} | due: {}]", session.mode().label(), session.due_count())?;

        let Some(word) = session.current_word() else {
            writeln!(out, "You have reviewed everything, great job!")?;
            write!(out, "> ")?;
            out.flush()?;
            return Ok(());
        };

        writeln!(out, "== {word} ==")?;
        match session.reveal() {
            Ok(reveal) => {
                if let Some(meaning) = &reveal.meaning {
                    writeln!(out, "Meaning: {meaning}")?;
                }
                for example in &reveal.examples {
                    writeln!(out, "  - {example}")?;
                }
            }
            Err(e) => report(e, out)?,
        }

        if session.is_pending() {
            write!(out, "[ok] continue > ")?;
        } else {
            write!(out, "[k] I know  [h] hint  [v] verify  [d] don't know > ")?;
        }
        out.flush()?;
        Ok(())
    }
}

/// Print recoverable errors; propagate storage failures.
fn report<O: Write>(err: VocabError, out: &mut O) -> anyhow::Result<()> {
    match err {
        VocabError::Io { .. } => Err(err.into()),
        VocabError::ConfirmationPending => {
            writeln!(out, "Confirm with 'ok' first.")?;
            Ok(())
        }
        other => {
            tracing::warn!(error = %other, "command failed");
            writeln!(out, "error: {other}")?;
            Ok(())
        }
    }
}
