//! The interactive read-eval-print loop.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parley_ai::{CompletionService, ConversationSession, PersistenceError, SessionConfig, UsageStats};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::debug;

/// One line of user input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Exit,
    /// Save to the given file, or the configured default.
    Save(Option<String>),
    /// Load from the given file, or ask for one.
    Load(Option<String>),
    Stats,
    Message(String),
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Command::Empty;
        }

        let mut words = trimmed.split_whitespace();
        let head = words.next().unwrap_or_default().to_lowercase();
        let rest: Vec<&str> = words.collect();
        match (head.as_str(), rest.as_slice()) {
            ("exit" | "quit" | "bye", []) => Command::Exit,
            ("save", []) => Command::Save(None),
            ("save", [file]) if looks_like_path(file) => Command::Save(Some(file.to_string())),
            ("load", []) => Command::Load(None),
            ("load", [file]) if looks_like_path(file) => Command::Load(Some(file.to_string())),
            ("stats", []) => Command::Stats,
            _ => Command::Message(line.to_string()),
        }
    }
}

/// A command argument counts as a file only if it has an extension or a
/// directory separator, so "load balancing" stays a question.
fn looks_like_path(word: &str) -> bool {
    word.contains(['.', '/', '\\']) && !word.ends_with(['?', '!', ':', ','])
}

/// Drives a conversation from a line source to a writer.
pub struct Repl<R, W> {
    lines: Lines<R>,
    out: W,
    session_config: SessionConfig,
    service: Arc<dyn CompletionService>,
    session: ConversationSession,
    memory: bool,
    save_path: PathBuf,
    /// Usage from sessions that have since been replaced.
    carried: UsageStats,
}

impl<R, W> Repl<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    pub fn new(
        input: R,
        out: W,
        session_config: SessionConfig,
        service: Arc<dyn CompletionService>,
        memory: bool,
        save_path: PathBuf,
    ) -> Self {
        let session = ConversationSession::new(session_config.clone(), service.clone());
        Self {
            lines: input.lines(),
            out,
            session_config,
            service,
            session,
            memory,
            save_path,
            carried: UsageStats::new(),
        }
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    /// Tokens and cost for the whole run, across loads and stateless turns.
    pub fn run_usage(&self) -> UsageStats {
        let mut total = self.carried;
        total.absorb(&self.session.usage());
        total
    }

    /// Restore a transcript before the loop starts.
    pub fn load(&mut self, path: &Path) -> std::io::Result<()> {
        self.load_file(path)
    }

    /// Run until `exit` or end of input.
    pub async fn run(&mut self, banner: &str) -> std::io::Result<()> {
        writeln!(self.out, "{banner}")?;
        writeln!(
            self.out,
            "Type 'exit' to quit, 'save' to save the conversation, or 'load' to load a previous conversation."
        )?;

        loop {
            write!(self.out, "\nYou: ")?;
            self.out.flush()?;

            let Some(line) = self.lines.next_line().await? else {
                writeln!(self.out)?;
                break;
            };

            match Command::parse(&line) {
                Command::Exit => break,
                Command::Empty => {}
                Command::Stats => self.print_stats()?,
                Command::Save(file) => {
                    let path = file.map(PathBuf::from).unwrap_or_else(|| self.save_path.clone());
                    self.save_file(&path)?;
                }
                Command::Load(Some(file)) => self.load_file(Path::new(&file))?,
                Command::Load(None) => {
                    write!(self.out, "Enter filename to load: ")?;
                    self.out.flush()?;
                    match self.lines.next_line().await? {
                        Some(file) if !file.trim().is_empty() => {
                            self.load_file(Path::new(file.trim()))?
                        }
                        Some(_) => writeln!(self.out, "No filename given.")?,
                        None => break,
                    }
                }
                Command::Message(text) => self.send(text).await?,
            }
        }

        writeln!(self.out, "{}: Goodbye!", self.session_config.assistant_name)?;
        self.print_stats()
    }

    async fn send(&mut self, text: String) -> std::io::Result<()> {
        if !self.memory {
            self.replace_session(ConversationSession::new(
                self.session_config.clone(),
                self.service.clone(),
            ));
        }

        let name = &self.session_config.assistant_name;
        match self.session.exchange(text).await {
            Ok(reply) => writeln!(self.out, "{name}: {reply}"),
            Err(e) => writeln!(self.out, "{name}: Error: {e}"),
        }
    }

    fn save_file(&mut self, path: &Path) -> std::io::Result<()> {
        match self.session.save_to_path(path) {
            Ok(()) => writeln!(self.out, "Conversation saved to {}", path.display()),
            Err(e) => writeln!(self.out, "Error: {e}"),
        }
    }

    fn load_file(&mut self, path: &Path) -> std::io::Result<()> {
        let before = self.session.usage();
        match self.session.load_from_path(path) {
            Ok(()) => {
                self.carried.absorb(&before);
                debug!(turns = self.session.turn_count(), "Loaded transcript");
                writeln!(self.out, "Conversation loaded from {}", path.display())
            }
            Err(PersistenceError::NotFound(_)) => {
                writeln!(self.out, "File {} not found.", path.display())
            }
            Err(e) => writeln!(self.out, "Error: {e}"),
        }
    }

    fn replace_session(&mut self, session: ConversationSession) {
        let old = std::mem::replace(&mut self.session, session);
        self.carried.absorb(&old.usage());
    }

    fn print_stats(&mut self) -> std::io::Result<()> {
        let usage = self.run_usage();
        writeln!(self.out, "\nSession statistics:")?;
        writeln!(self.out, "Total tokens used: {}", usage.total_tokens())?;
        writeln!(self.out, "Estimated cost: ${:.4}", usage.total_cost())
    }
}
