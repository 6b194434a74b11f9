//! Full-screen plain-text report pane.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Style},
  text::Line,
  widgets::{Block, Borders, Paragraph},
};

use crate::app::App;

/// Render the report text into `area`, honouring the scroll offset.
pub fn draw(f: &mut Frame, area: Rect, app: &App) {
  let block = Block::default()
    .title(" Report ")
    .borders(Borders::ALL)
    .border_style(Style::default().fg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);

  let visible = inner.height as usize;
  let lines: Vec<Line> = app
    .report_lines
    .iter()
    .skip(app.report_scroll)
    .take(visible)
    .map(|l| Line::raw(l.as_str()))
    .collect();

  f.render_widget(Paragraph::new(lines), inner);
}
