//! Terminal rendering of a streaming session

use colored::*;
use ragline_core::{AgentStep, ChatMode, Message, SessionUpdate, Source};
use std::io::{self, Write};

/// Maximum lines of a tool result shown inline
const MAX_RESULT_LINES: usize = 10;

/// Writes session updates to a terminal as they arrive.
///
/// Chat answers are printed incrementally. Agent answers are printed once
/// complete, optionally preceded by each tool call as it finishes.
pub struct Renderer<W: Write> {
    out: W,
    mode: ChatMode,
    show_steps: bool,
    printed: usize,
    steps_shown: usize,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, mode: ChatMode, show_steps: bool) -> Self {
        Self {
            out,
            mode,
            show_steps,
            printed: 0,
            steps_shown: 0,
        }
    }

    pub fn render(&mut self, update: &SessionUpdate) -> io::Result<()> {
        match update {
            SessionUpdate::Chunk(message) => self.write_new_text(&message.content)?,
            SessionUpdate::Step(message) => self.write_new_steps(message)?,
            SessionUpdate::Sources(_) => {}
            SessionUpdate::Done(message) => self.write_final(message)?,
            SessionUpdate::Error { .. } => {
                if self.printed > 0 {
                    writeln!(self.out)?;
                }
            }
        }
        self.out.flush()
    }

    /// Chat content only grows, so only the unseen suffix is written.
    fn write_new_text(&mut self, content: &str) -> io::Result<()> {
        let fresh = match content.get(self.printed..) {
            Some(fresh) => fresh,
            None => {
                tracing::debug!("Answer text was rewritten, reprinting");
                writeln!(self.out)?;
                content
            }
        };
        write!(self.out, "{}", fresh)?;
        self.printed = content.len();
        Ok(())
    }

    fn write_new_steps(&mut self, message: &Message) -> io::Result<()> {
        if !self.show_steps {
            return Ok(());
        }
        let steps = message.steps.as_deref().unwrap_or_default();
        for (index, step) in steps.iter().enumerate().skip(self.steps_shown) {
            self.write_step(index + 1, step)?;
        }
        self.steps_shown = self.steps_shown.max(steps.len());
        Ok(())
    }

    fn write_step(&mut self, number: usize, step: &AgentStep) -> io::Result<()> {
        writeln!(
            self.out,
            "{} {} {}",
            format!("Step {}:", number).cyan().bold(),
            "→".dimmed(),
            step.tool.magenta().bold()
        )?;
        if !step.input.is_empty() {
            writeln!(self.out, "    {}", step.input.dimmed())?;
        }
        let lines: Vec<&str> = step.result.lines().collect();
        for line in lines.iter().take(MAX_RESULT_LINES) {
            writeln!(self.out, "    {}", line)?;
        }
        if lines.len() > MAX_RESULT_LINES {
            writeln!(self.out, "    {} (output truncated)", "...".dimmed())?;
        }
        Ok(())
    }

    fn write_final(&mut self, message: &Message) -> io::Result<()> {
        match self.mode {
            ChatMode::Chat => {
                self.write_new_text(&message.content)?;
                writeln!(self.out)?;
            }
            ChatMode::Agent => {
                self.write_new_steps(message)?;
                if self.show_steps && self.steps_shown > 0 {
                    writeln!(self.out)?;
                }
                writeln!(self.out, "{}", message.content)?;
            }
        }
        if let Some(sources) = message.sources.as_deref().filter(|s| !s.is_empty()) {
            self.write_sources(sources)?;
        }
        Ok(())
    }

    fn write_sources(&mut self, sources: &[Source]) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "{}", "Sources:".bold())?;
        for (index, source) in sources.iter().enumerate() {
            writeln!(
                self.out,
                "  [{}] {} {}",
                index + 1,
                source.file_name,
                format!("(chunk {}, score {:.2})", source.chunk_index, source.score).dimmed()
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_all(mode: ChatMode, show_steps: bool, updates: &[SessionUpdate]) -> String {
        colored::control::set_override(false);
        let mut renderer = Renderer::new(Vec::new(), mode, show_steps);
        for update in updates {
            renderer.render(update).unwrap();
        }
        String::from_utf8(renderer.out).unwrap()
    }

    fn source(file_name: &str, score: f64) -> Source {
        Source {
            file_name: file_name.into(),
            chunk_index: 2,
            score,
            ..Default::default()
        }
    }

    #[test]
    fn test_chat_prints_each_delta_once() {
        let output = render_all(
            ChatMode::Chat,
            false,
            &[
                SessionUpdate::Chunk(Message::assistant("The ")),
                SessionUpdate::Chunk(Message::assistant("The answer")),
                SessionUpdate::Done(
                    Message::assistant("The answer").with_sources(vec![source("a.pdf", 0.912)]),
                ),
            ],
        );
        assert_eq!(
            output,
            "The answer\n\nSources:\n  [1] a.pdf (chunk 2, score 0.91)\n"
        );
    }

    #[test]
    fn test_chat_error_terminates_partial_line() {
        let output = render_all(
            ChatMode::Chat,
            false,
            &[
                SessionUpdate::Chunk(Message::assistant("Par")),
                SessionUpdate::Error {
                    error: "boom".into(),
                    message: Message::assistant("Error: boom"),
                },
            ],
        );
        assert_eq!(output, "Par\n");
    }

    #[test]
    fn test_agent_steps_shown_once_each() {
        let step = |n: usize| AgentStep {
            tool: format!("tool{}", n),
            input: "SELECT 1".into(),
            result: "1".into(),
        };
        let output = render_all(
            ChatMode::Agent,
            true,
            &[
                SessionUpdate::Step(Message::assistant("Thinking...").with_steps(vec![])),
                SessionUpdate::Step(Message::assistant("Running... (1 steps)").with_steps(vec![step(1)])),
                SessionUpdate::Step(Message::assistant("Running... (1 steps)").with_steps(vec![step(1)])),
                SessionUpdate::Done(Message::assistant("Done.").with_steps(vec![step(1), step(2)])),
            ],
        );
        assert_eq!(output.matches("tool1").count(), 1);
        assert_eq!(output.matches("tool2").count(), 1);
        assert!(output.starts_with("Step 1: → tool1\n    SELECT 1\n    1\n"));
        assert!(output.ends_with("\nDone.\n"));
    }

    #[test]
    fn test_agent_hides_steps_by_default() {
        let output = render_all(
            ChatMode::Agent,
            false,
            &[
                SessionUpdate::Step(Message::assistant("Running... (1 steps)").with_steps(vec![
                    AgentStep {
                        tool: "sql_db_query".into(),
                        input: String::new(),
                        result: String::new(),
                    },
                ])),
                SessionUpdate::Done(Message::assistant("42")),
            ],
        );
        assert_eq!(output, "42\n");
    }
}
