//! Investigation detail pane — right panel.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::App;

fn key_value<'a>(key: &'a str, value: String) -> Line<'a> {
  Line::from(vec![
    Span::styled(
      format!("{key:<14}"),
      Style::default().fg(Color::DarkGray),
    ),
    Span::raw(value),
  ])
}

/// Render the detail pane for the open investigation.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let Some(detail) = &app.detail else { return };
  let inv = &detail.investigation;

  let block = Block::default()
    .title(format!(" {} ", inv.number))
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let mut date = inv.occurred_on.format("%Y-%m-%d").to_string();
  if let Some(t) = inv.occurred_time {
    date.push_str(&format!(" {}", t.format("%H:%M")));
  }

  let mut lines: Vec<Line> = vec![
    key_value("Date", date),
    key_value("Location", inv.location.clone()),
    key_value("Severity", inv.severity.to_string()),
    key_value("Status", inv.status.to_string()),
    Line::raw(""),
    key_value("Evidence", detail.evidence.len().to_string()),
    key_value("Interviews", detail.interviews.len().to_string()),
    key_value("Timeline", detail.timeline.len().to_string()),
    key_value("Factors", detail.causal_factors.len().to_string()),
    key_value("Actions", detail.recommendations.len().to_string()),
    key_value("Barriers", detail.barriers.len().to_string()),
    Line::raw(""),
  ];

  // Description, or the live draft while the editor is open.
  let heading = if app.editing_notes {
    Span::styled(
      "Description (editing)",
      Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD),
    )
  } else {
    Span::styled(
      "Description",
      Style::default().add_modifier(Modifier::BOLD),
    )
  };
  lines.push(Line::from(heading));

  let text = if app.editing_notes {
    format!("{}_", app.draft_notes)
  } else if inv.description.trim().is_empty() {
    "(none)".to_string()
  } else {
    inv.description.clone()
  };
  for raw_line in text.lines() {
    lines.push(Line::raw(raw_line.to_owned()));
  }

  f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
