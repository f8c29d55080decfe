//! Per-tab view states and widgets.

pub mod assistant;
pub mod dashboard;
pub mod meeting;
pub mod outreach;

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Style, Stylize};
use ratatui::text::Text;
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};

use super::theme::Theme;

/// Render a generated-output pane: the response text when present, a busy
/// spinner while a request is in flight, otherwise a key hint.
pub(crate) fn render_output_pane(
    area: Rect,
    buf: &mut Buffer,
    title: &str,
    content: Option<&str>,
    busy: bool,
    spinner: char,
    hint: &str,
    scroll: u16,
) {
    let block = Block::default()
        .title(title.to_owned())
        .title_style(Style::default().fg(Theme::ACCENT).bold())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Theme::BORDER));

    let text = if busy {
        Text::styled(
            format!("{spinner} Generating..."),
            Style::default().fg(Theme::BUSY),
        )
    } else {
        match content {
            Some(body) => Text::styled(body.to_owned(), Style::default().fg(Theme::OUTPUT)),
            None => Text::styled(hint.to_owned(), Style::default().fg(Theme::SUBTEXT)),
        }
    };

    Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .render(area, buf);
}

/// Render a vertical selector list with the chosen row highlighted.
pub(crate) fn render_selector(
    area: Rect,
    buf: &mut Buffer,
    title: &str,
    items: &[String],
    selected: usize,
    focused: bool,
) {
    let border = if focused { Theme::FOCUS } else { Theme::BORDER };
    let block = Block::default()
        .title(title.to_owned())
        .title_style(Style::default().fg(Theme::ACCENT).bold())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    block.render(area, buf);

    if items.is_empty() {
        buf.set_string(
            inner.x,
            inner.y,
            "(empty)",
            Style::default().fg(Theme::SUBTEXT),
        );
        return;
    }

    // Keep the selection visible when the list overflows the pane.
    let visible = usize::from(inner.height);
    let first = selected.saturating_sub(visible.saturating_sub(1));
    for (offset, item) in items.iter().enumerate().skip(first).take(visible) {
        let row = u16::try_from(offset.saturating_sub(first)).unwrap_or(u16::MAX);
        let y = inner.y.saturating_add(row);
        let (marker, style) = if offset == selected {
            ("▸ ", Style::default().fg(Theme::ACCENT).bold())
        } else {
            ("  ", Style::default().fg(Theme::TEXT))
        };
        buf.set_string(inner.x, y, format!("{marker}{item}"), style);
    }
}

/// Render a one-line text input with a trailing cursor while editing.
pub(crate) fn render_input_line(
    area: Rect,
    buf: &mut Buffer,
    title: &str,
    value: &str,
    placeholder: &str,
    editing: bool,
) {
    let border = if editing { Theme::FOCUS } else { Theme::BORDER };
    let block = Block::default()
        .title(title.to_owned())
        .title_style(Style::default().fg(Theme::ACCENT).bold())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let inner = block.inner(area);
    block.render(area, buf);

    if value.is_empty() && !editing {
        buf.set_string(
            inner.x,
            inner.y,
            placeholder,
            Style::default().fg(Theme::SUBTEXT),
        );
        return;
    }

    let shown = if editing {
        format!("{value}_")
    } else {
        value.to_owned()
    };
    buf.set_string(inner.x, inner.y, shown, Style::default().fg(Theme::TEXT));
}
