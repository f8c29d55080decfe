//! Dashboard tab: headline metrics, stage bar chart, on-demand AI insight.

use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Style, Stylize};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Widget};

use crate::data::analytics::{pipeline_metrics, stage_summary, PipelineMetrics, StageSummary};
use crate::data::Dataset;
use crate::tui::theme::Theme;

use super::render_output_pane;

/// Dashboard view state. The aggregates are computed once at startup from
/// the immutable dataset; only the insight text changes afterwards.
#[derive(Debug)]
pub struct DashboardState {
    /// Headline metrics.
    pub metrics: PipelineMetrics,
    /// Per-stage amounts driving both the chart and the insight prompt.
    pub stages: Vec<StageSummary>,
    /// Insight text returned by the gateway, once requested.
    pub insight: Option<String>,
    /// Insight pane scroll offset.
    pub scroll: u16,
}

impl DashboardState {
    /// Compute the dashboard aggregates from the loaded dataset.
    pub fn new(dataset: &Dataset) -> Self {
        Self {
            metrics: pipeline_metrics(&dataset.opportunities),
            stages: stage_summary(&dataset.opportunities),
            insight: None,
            scroll: 0,
        }
    }
}

/// Dashboard view widget.
pub struct DashboardView<'a> {
    state: &'a DashboardState,
    busy: bool,
    spinner: char,
}

impl<'a> DashboardView<'a> {
    /// Borrow the state for rendering.
    pub fn new(state: &'a DashboardState, busy: bool, spinner: char) -> Self {
        Self {
            state,
            busy,
            spinner,
        }
    }
}

impl Widget for DashboardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5),      // Metric cards
                Constraint::Min(8),         // Stage chart
                Constraint::Percentage(35), // Insight pane
            ])
            .split(area);

        self.render_metrics(chunks[0], buf);
        self.render_chart(chunks[1], buf);
        render_output_pane(
            chunks[2],
            buf,
            "AI INSIGHT",
            self.state.insight.as_deref(),
            self.busy,
            self.spinner,
            "Press g to generate 3 actionable insights from the stage summary",
            self.state.scroll,
        );
    }
}

impl DashboardView<'_> {
    fn render_metrics(&self, area: Rect, buf: &mut Buffer) {
        let cards = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(33),
                Constraint::Percentage(33),
                Constraint::Percentage(34),
            ])
            .split(area);

        let metrics = &self.state.metrics;
        render_metric_card(
            cards[0],
            buf,
            "TOTAL PIPELINE",
            &format_euro(metrics.total_pipeline),
        );
        render_metric_card(
            cards[1],
            buf,
            "WEIGHTED PIPELINE",
            &format_euro(metrics.weighted_pipeline),
        );
        render_metric_card(
            cards[2],
            buf,
            "ACTIVE DEALS",
            &metrics.active_deals.to_string(),
        );
    }

    fn render_chart(&self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title("PIPELINE BY STAGE")
            .title_style(Style::default().fg(Theme::ACCENT).bold())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Theme::BORDER));

        let bars: Vec<Bar> = self
            .state
            .stages
            .iter()
            .map(|s| {
                Bar::default()
                    .label(s.stage.clone().into())
                    .value(bar_value(s.amount))
            })
            .collect();

        BarChart::default()
            .block(block)
            .bar_width(12)
            .bar_gap(2)
            .bar_style(Style::default().fg(Theme::ACCENT))
            .value_style(Style::default().fg(Theme::VALUE))
            .data(BarGroup::default().bars(&bars))
            .render(area, buf);
    }
}

fn render_metric_card(area: Rect, buf: &mut Buffer, title: &str, value: &str) {
    let block = Block::default()
        .title(title.to_owned())
        .title_style(Style::default().fg(Theme::SUBTEXT).bold())
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Theme::BORDER));
    let inner = block.inner(area);
    block.render(area, buf);

    buf.set_string(
        inner.x.saturating_add(1),
        inner.y.saturating_add(1),
        value,
        Style::default().fg(Theme::VALUE).bold(),
    );
}

/// Chart values are whole currency units; negative amounts clamp to zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn bar_value(amount: f64) -> u64 {
    amount.round().max(0.0) as u64
}

/// Display formatting only: `€` prefix, thousands separators, no fraction.
pub(crate) fn format_euro(value: f64) -> String {
    let whole = bar_value(value.abs());
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    format!("€{sign}{grouped}")
}
