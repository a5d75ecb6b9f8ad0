use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::ui::view::ShortcutInfo;

/// Draw the header bar with title, server, activity and shortcuts
pub fn draw_header(
  frame: &mut Frame,
  area: Rect,
  title: Option<&str>,
  base_url: &str,
  in_flight: usize,
  shortcuts: &[ShortcutInfo],
) {
  let domain = extract_domain(base_url);

  let mut spans = vec![
    Span::styled(" dayboard ", Style::default().fg(Color::Cyan).bold()),
    Span::styled("│", Style::default().fg(Color::DarkGray)),
    Span::styled(
      format!(" {} ", title.unwrap_or(domain)),
      Style::default().fg(Color::White),
    ),
  ];

  if in_flight > 0 {
    spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
    spans.push(Span::styled(
      format!(" syncing {} ", in_flight),
      Style::default().fg(Color::Yellow),
    ));
  }

  spans.push(Span::raw(" "));

  // Keys highlighted, descriptions dimmed
  for shortcut in shortcuts {
    spans.push(Span::raw("  "));
    spans.push(Span::styled(
      format!("<{}>", shortcut.key),
      Style::default().fg(Color::Cyan),
    ));
    spans.push(Span::styled(
      format!(" {}", shortcut.label),
      Style::default().fg(Color::DarkGray),
    ));
  }

  let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Black));

  frame.render_widget(paragraph, area);
}

/// Extract domain from the server URL
fn extract_domain(url: &str) -> &str {
  url
    .strip_prefix("https://")
    .or_else(|| url.strip_prefix("http://"))
    .unwrap_or(url)
    .split('/')
    .next()
    .unwrap_or(url)
}
