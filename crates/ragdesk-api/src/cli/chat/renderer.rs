//! Terminal rendering of transcript messages.
//!
//! `ChatRenderer` combines `termimad` for prose and `syntect` for code block
//! syntax highlighting. Agent answers are rendered as markdown under the
//! sender label for the active context; user messages are echoed plainly.

use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::as_24_bit_terminal_escaped;
use termimad::MadSkin;
use termimad::crossterm::style::Color;

use ragdesk_types::context::AgentLabel;
use ragdesk_types::message::{Message, Origin};

/// Mark shown next to the sender name of a company context.
pub const BRAND_MARK: &str = "◆";

/// Sender label for `USER` messages.
pub const USER_SENDER: &str = "You";

/// Plain sender text for a message, without terminal styling.
pub fn sender_text(origin: Origin, label: &AgentLabel) -> String {
    match origin {
        Origin::User => USER_SENDER.to_string(),
        Origin::Agent if label.branded => format!("{BRAND_MARK} {}", label.sender),
        Origin::Agent => label.sender.clone(),
    }
}

/// Highlighting theme for fenced code.
const CODE_THEME: &str = "base16-ocean.dark";

/// A run of answer text: markdown prose or the body of a code fence.
#[derive(Debug, PartialEq)]
enum Block<'a> {
    Prose(Vec<&'a str>),
    Code { lang: &'a str, lines: Vec<&'a str> },
}

/// Split an answer at ``` fences. An unclosed fence runs to the end.
fn split_blocks(markdown: &str) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    let mut prose = Vec::new();
    let mut code: Option<(&str, Vec<&str>)> = None;

    for line in markdown.lines() {
        let fence = line.trim_start().strip_prefix("```");
        match (code.take(), fence) {
            (None, Some(tag)) => {
                if !prose.is_empty() {
                    blocks.push(Block::Prose(std::mem::take(&mut prose)));
                }
                code = Some((tag.trim_matches('`').trim(), Vec::new()));
            }
            (Some((lang, lines)), Some(_)) => blocks.push(Block::Code { lang, lines }),
            (Some((lang, mut lines)), None) => {
                lines.push(line);
                code = Some((lang, lines));
            }
            (None, None) => prose.push(line),
        }
    }

    if !prose.is_empty() {
        blocks.push(Block::Prose(prose));
    }
    if let Some((lang, lines)) = code.filter(|(_, lines)| !lines.is_empty()) {
        blocks.push(Block::Code { lang, lines });
    }
    blocks
}

fn indent(text: &str) -> String {
    text.lines().map(|line| format!("  {line}\n")).collect()
}

/// Terminal markdown renderer with syntax highlighting.
pub struct ChatRenderer {
    skin: MadSkin,
    syntax_set: SyntaxSet,
    theme: Theme,
}

impl ChatRenderer {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.bold.set_fg(Color::Cyan);
        skin.headers[0].set_fg(Color::Cyan);
        skin.headers[1].set_fg(Color::Cyan);
        skin.inline_code.set_fg(Color::Yellow);

        Self {
            skin,
            syntax_set: SyntaxSet::load_defaults_nonewlines(),
            theme: ThemeSet::load_defaults()
                .themes
                .remove(CODE_THEME)
                .unwrap_or_default(),
        }
    }

    /// Styled sender line for a message.
    pub fn sender_line(&self, origin: Origin, label: &AgentLabel) -> String {
        let text = sender_text(origin, label);
        match origin {
            Origin::User => format!("{}", console::style(text).green().bold()),
            Origin::Agent if label.branded => format!("{}", console::style(text).magenta().bold()),
            Origin::Agent => format!("{}", console::style(text).cyan().bold()),
        }
    }

    /// Render a message with its sender line, ready to print.
    pub fn render_message(&self, message: &Message, label: &AgentLabel) -> String {
        let body = match message.origin() {
            Origin::User => format!("  {}\n", message.text()),
            Origin::Agent => self.render_final(message.text()),
        };
        format!(
            "\n  {}  {}\n{}",
            self.sender_line(message.origin(), label),
            console::style(message.created_at().format("%H:%M")).dim(),
            body.trim_end_matches('\n')
        )
    }

    /// Render an answer: prose through termimad, fenced code through syntect.
    pub fn render_final(&self, markdown: &str) -> String {
        split_blocks(markdown)
            .iter()
            .map(|block| match block {
                Block::Prose(lines) => indent(&self.skin.term_text(&lines.join("\n")).to_string()),
                Block::Code { lang, lines } => self.highlight_code(lang, lines),
            })
            .collect()
    }

    /// Unknown or missing language tags fall back to plain text.
    fn highlight_code(&self, lang: &str, lines: &[&str]) -> String {
        let syntax = Some(lang)
            .filter(|lang| !lang.is_empty())
            .and_then(|lang| self.syntax_set.find_syntax_by_token(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
        let mut highlighter = HighlightLines::new(syntax, &self.theme);

        lines
            .iter()
            .map(|line| match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => format!("  {}\x1b[0m\n", as_24_bit_terminal_escaped(&ranges, false)),
                Err(_) => format!("  {line}\n"),
            })
            .collect()
    }
}

impl Default for ChatRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_sender_ignores_context() {
        let label = AgentLabel::for_context(Some("Acme"));
        assert_eq!(sender_text(Origin::User, &label), "You");
    }

    #[test]
    fn agent_sender_in_general_mode() {
        let label = AgentLabel::for_context(None);
        assert_eq!(sender_text(Origin::Agent, &label), "AI Assistant");
    }

    #[test]
    fn agent_sender_is_branded_in_company_context() {
        let label = AgentLabel::for_context(Some("Acme Corp"));
        assert_eq!(sender_text(Origin::Agent, &label), "◆ Acme Corp");
    }

    #[test]
    fn render_final_keeps_code_block_content() {
        let renderer = ChatRenderer::new();
        let out = renderer.render_final("Run this:\n```sh\necho hi\n```\n");
        assert!(out.contains("echo"));
        assert!(out.contains("Run this"));
    }

    #[test]
    fn split_separates_prose_and_fenced_code() {
        let blocks = split_blocks("Run this:\n```sh\necho hi\nls\n```\nDone.");
        assert_eq!(
            blocks,
            vec![
                Block::Prose(vec!["Run this:"]),
                Block::Code { lang: "sh", lines: vec!["echo hi", "ls"] },
                Block::Prose(vec!["Done."]),
            ]
        );
    }

    #[test]
    fn split_unclosed_fence_runs_to_end() {
        let blocks = split_blocks("```\nfn main() {}");
        assert_eq!(blocks, vec![Block::Code { lang: "", lines: vec!["fn main() {}"] }]);
        assert_eq!(split_blocks("```python\n"), Vec::new());
    }

    #[test]
    fn render_final_unknown_language_keeps_text() {
        let renderer = ChatRenderer::new();
        let out = renderer.render_final("```klingon\nqapla'\n```");
        assert!(out.contains("qapla'"));
        assert!(out.starts_with("  "));
    }
}
