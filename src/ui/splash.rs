//! Splash screen rendering module.
//!
//! Shows what the dashboard is about to load from before the first load starts.

use crate::ui::dashboard::SessionInfo;
use crate::ui::dashboard::utils::short_address;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

pub const LOGO_NAME: &str = r#"
 ██████╗██████╗ ███████╗ █████╗ ████████╗ ██████╗ ██████╗
██╔════╝██╔══██╗██╔════╝██╔══██╗╚══██╔══╝██╔═══██╗██╔══██╗
██║     ██████╔╝█████╗  ███████║   ██║   ██║   ██║██████╔╝
██║     ██╔══██╗██╔══╝  ██╔══██║   ██║   ██║   ██║██╔══██╗
╚██████╗██║  ██║███████╗██║  ██║   ██║   ╚██████╔╝██║  ██║
 ╚═════╝╚═╝  ╚═╝╚══════╝╚═╝  ╚═╝   ╚═╝    ╚═════╝ ╚═╝  ╚═╝
"#;

fn detail(label: &str, value: String, color: Color) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:<9}", label), Style::default().fg(Color::DarkGray)),
        Span::styled(value, Style::default().fg(color)),
    ])
}

/// Session lines under the logo, with contract addresses shortened.
fn session_lines(session: &SessionInfo) -> Vec<Line<'static>> {
    vec![
        detail("Network", session.network.clone(), Color::LightMagenta),
        detail("RPC", session.rpc_url.clone(), Color::Yellow),
        detail("Market", short_address(&session.marketplace), Color::Cyan),
        detail("Token", short_address(&session.token), Color::Cyan),
    ]
}

pub fn render_splash(f: &mut Frame, session: &SessionInfo) {
    let mut lines: Vec<Line> = LOGO_NAME
        .trim_matches('\n')
        .lines()
        .map(|line| {
            Span::styled(
                line.to_string(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .into()
        })
        .collect();

    lines.push(Line::from(Span::raw(" ")));
    lines.push(
        Span::styled(
            format!("NFT Creator Dashboard {}", env!("CARGO_PKG_VERSION")),
            Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::ITALIC),
        )
        .into(),
    );
    lines.push(Line::from(Span::raw(" ")));
    lines.extend(session_lines(session));
    lines.push(Line::from(Span::raw(" ")));
    lines.push(Line::from(Span::styled(
        "Press any key to load your listings",
        Style::default().fg(Color::DarkGray),
    )));

    let logo_height = (lines.len() + 2) as u16;

    // Vertically center using layout
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min((f.area().height.saturating_sub(logo_height)) / 2),
            Constraint::Length(logo_height),
            Constraint::Min((f.area().height.saturating_sub(logo_height + 1)) / 2),
        ])
        .split(f.area());

    let centered_area: Rect = vertical_chunks[1];

    let logo = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::NONE));

    f.render_widget(logo, centered_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn splash_shows_session_target() {
        let session = SessionInfo {
            network: "Sepolia (chain 11155111)".to_string(),
            rpc_url: "https://rpc.sepolia.org".to_string(),
            marketplace: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
            token: "0xe7f1725E7734CE288F8367e1Bb143E90bb3F0512".to_string(),
        };
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render_splash(f, &session)).unwrap();

        let buffer = terminal.backend().buffer().clone();
        let width = buffer.area.width as usize;
        let screen = buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n");

        assert!(screen.contains("Sepolia (chain 11155111)"));
        assert!(screen.contains("https://rpc.sepolia.org"));
        assert!(screen.contains("0x5FbD…0aa3"));
        assert!(screen.contains("0xe7f1…0512"));
        assert!(screen.contains("Press any key to load your listings"));
    }
}
