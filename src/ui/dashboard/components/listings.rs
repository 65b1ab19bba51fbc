//! Dashboard listings component
//!
//! Renders the created and sold sections, the empty notice and the error state

use super::super::state::DashboardView;
use crate::consts::cli_consts::NATIVE_SYMBOL;
use crate::listing::ListingView;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

pub const NO_ASSETS_NOTICE: &str = "No assets owned";

fn listing_card(listing: &ListingView) -> Vec<Line<'_>> {
    vec![
        Line::from(vec![
            Span::styled(
                listing.name(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  #{}", listing.token_id()),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(Span::styled(
            listing.description(),
            Style::default().fg(Color::Gray),
        )),
        Line::from(Span::styled(
            format!("Price - {} {}", listing.price(), NATIVE_SYMBOL),
            Style::default()
                .fg(Color::LightGreen)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            listing.image(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::default(),
    ]
}

/// Render one section starting at card `offset`.
///
/// The title shows the position once the section is scrolled.
fn render_section(
    f: &mut Frame,
    area: Rect,
    title: &str,
    listings: &[ListingView],
    color: Color,
    offset: usize,
) {
    let offset = offset.min(listings.len().saturating_sub(1));
    let lines: Vec<Line> = listings.iter().skip(offset).flat_map(listing_card).collect();
    let title = if offset == 0 {
        format!("{} ({})", title, listings.len())
    } else {
        format!("{} ({}, from {})", title, listings.len(), offset + 1)
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .padding(Padding::horizontal(1));
    f.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

/// Render the listings area for the current view, scrolled by `scroll` cards.
pub fn render_listings(f: &mut Frame, area: Rect, view: &DashboardView<'_>, scroll: usize) {
    match view {
        DashboardView::Loading => render_message(
            f,
            area,
            "Loading your listings...",
            Color::LightBlue,
        ),
        DashboardView::Failed { kind, message } => {
            let lines = vec![
                Line::from(Span::styled(
                    format!("Could not load listings ({})", kind),
                    Style::default()
                        .fg(Color::LightRed)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::default(),
                Line::from(Span::raw(*message)),
                Line::default(),
                Line::from(Span::styled(
                    "Press R to retry",
                    Style::default().fg(Color::DarkGray),
                )),
            ];
            let block = Block::default()
                .title("ERROR")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::LightRed))
                .padding(Padding::uniform(1));
            f.render_widget(
                Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
                area,
            );
        }
        DashboardView::NoAssets => render_notice(f, area),
        DashboardView::Listings { created, sold } => match sold {
            Some(sold) => {
                let chunks = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(area);
                render_section(f, chunks[0], "Items Created", created, Color::Cyan, scroll);
                render_section(f, chunks[1], "Items Sold", sold, Color::LightGreen, scroll);
            }
            None => render_section(f, area, "Items Created", created, Color::Cyan, scroll),
        },
    }
}

fn render_message(f: &mut Frame, area: Rect, text: &str, color: Color) {
    let block = Block::default()
        .title("LISTINGS")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));
    f.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(color))
            .block(block),
        area,
    );
}

/// Render the "No assets owned" notice alone.
pub fn render_notice(f: &mut Frame, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .split(area);
    f.render_widget(
        Paragraph::new(NO_ASSETS_NOTICE)
            .alignment(Alignment::Center)
            .style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        rows[1],
    );
}
