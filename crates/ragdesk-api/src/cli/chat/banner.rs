//! Welcome banner display for chat sessions.

use console::style;

use ragdesk_types::context::AgentLabel;

use super::renderer::BRAND_MARK;

/// Width of the separator rule, capped to the terminal width.
fn rule_width() -> usize {
    crossterm::terminal::size()
        .map(|(cols, _)| usize::from(cols).saturating_sub(4))
        .unwrap_or(40)
        .min(60)
}

/// Print the banner at the start of a chat session.
///
/// Shows the active context and backend address, plus a hint about slash
/// commands.
pub fn print_welcome_banner(label: &AgentLabel, server_url: &str) {
    let mark = if label.branded { BRAND_MARK } else { "*" };

    println!();
    println!("  {} {}", mark, style(&label.sender).cyan().bold());
    println!();
    println!("  {}  {}", style("Server:").bold(), style(server_url).dim());
    println!();
    println!(
        "  {}",
        style("Type /help for commands, /context to switch, Ctrl+D to exit").dim()
    );
    println!("  {}", style("─".repeat(rule_width())).dim());
}

/// Divider printed when the context changes mid-session.
pub fn context_divider(label: &AgentLabel) -> String {
    let mark = if label.branded { BRAND_MARK } else { "*" };
    format!(
        "\n  {}\n  {} {}\n",
        style("─".repeat(rule_width())).dim(),
        mark,
        style(&label.sender).cyan().bold()
    )
}
