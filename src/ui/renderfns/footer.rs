use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Draw the breadcrumb on the left and an optional status message on the right
pub fn draw_footer(frame: &mut Frame, area: Rect, breadcrumb: &[String], status: Option<&str>) {
  let last = breadcrumb.len().saturating_sub(1);
  let mut spans = vec![Span::raw(" ")];
  for (i, part) in breadcrumb.iter().enumerate() {
    if i > 0 {
      spans.push(Span::styled(" › ", Style::default().fg(Color::DarkGray)));
    }
    let style = if i == last {
      Style::default().fg(Color::Cyan).bold()
    } else {
      Style::default().fg(Color::Gray)
    };
    spans.push(Span::styled(part.as_str(), style));
  }

  let status = status.unwrap_or("");
  let width = status_width(status, area.width);
  let [left, right] =
    Layout::horizontal([Constraint::Min(0), Constraint::Length(width)]).areas(area);

  let background = Style::default().bg(Color::Black);
  frame.render_widget(Paragraph::new(Line::from(spans)).style(background), left);
  frame.render_widget(
    Paragraph::new(status).style(background.fg(Color::Yellow)),
    right,
  );
}

/// Columns for the status message plus one trailing space, at most `max`
fn status_width(status: &str, max: u16) -> u16 {
  u16::try_from(status.chars().count())
    .unwrap_or(u16::MAX)
    .saturating_add(1)
    .min(max)
}
