//! Dashboard info panel component
//!
//! Renders wallet and contract information

use super::super::state::DashboardState;
use super::super::utils::short_address;
use ratatui::Frame;
use ratatui::prelude::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

fn format_uptime(secs: u64) -> String {
    if secs >= 86400 {
        format!(
            "Uptime: {}d {}h {}m",
            secs / 86400,
            (secs % 86400) / 3600,
            (secs % 3600) / 60
        )
    } else if secs >= 3600 {
        format!(
            "Uptime: {}h {}m {}s",
            secs / 3600,
            (secs % 3600) / 60,
            secs % 60
        )
    } else {
        format!("Uptime: {}m {}s", secs / 60, secs % 60)
    }
}

/// Render the session info panel.
pub fn render_info_panel(f: &mut Frame, area: ratatui::layout::Rect, state: &DashboardState) {
    let mut info_lines = Vec::new();

    let (account_text, account_color) = match &state.account {
        Some(account) => (format!("Account: {}", short_address(account)), Color::LightBlue),
        None => ("Account: Not connected".to_string(), Color::DarkGray),
    };
    info_lines.push(Line::from(vec![Span::styled(
        account_text,
        Style::default().fg(account_color),
    )]));

    info_lines.push(Line::from(vec![Span::styled(
        format!("Network: {}", state.session.network),
        Style::default().fg(Color::LightMagenta),
    )]));

    info_lines.push(Line::from(vec![Span::styled(
        format!("RPC: {}", state.session.rpc_url),
        Style::default().fg(Color::Yellow),
    )]));

    info_lines.push(Line::from(vec![Span::styled(
        format!("Market: {}", short_address(&state.session.marketplace)),
        Style::default().fg(Color::Cyan),
    )]));

    info_lines.push(Line::from(vec![Span::styled(
        format!("Token: {}", short_address(&state.session.token)),
        Style::default().fg(Color::Cyan),
    )]));

    info_lines.push(Line::from(vec![Span::styled(
        format_uptime(state.start_time.elapsed().as_secs()),
        Style::default().fg(Color::LightGreen),
    )]));

    if let Some(loaded_at) = state.last_loaded_at() {
        info_lines.push(Line::from(vec![Span::styled(
            format!("Last load: {}", loaded_at),
            Style::default().fg(Color::LightCyan),
        )]));
    }

    let info_block = Block::default()
        .title("SESSION")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    let info_paragraph = Paragraph::new(info_lines)
        .block(info_block)
        .wrap(Wrap { trim: true });
    f.render_widget(info_paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::format_uptime;

    #[test]
    fn formats_uptime_by_magnitude() {
        assert_eq!(format_uptime(65), "Uptime: 1m 5s");
        assert_eq!(format_uptime(3_725), "Uptime: 1h 2m 5s");
        assert_eq!(format_uptime(90_000), "Uptime: 1d 1h 0m");
    }
}
