//! Rows and footers of the three result sections.

use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::search::{DescriptionResult, MAX_RESULTS, Segment, SegmentsController, TitleResult};
use crate::ui::theme::Theme;

/// What follows the last transcript row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentsFooter {
    /// Sentinel; scrolling it into view loads the next page.
    More,
    LoadingMore,
    /// More pages exist but the accumulated set is close to the cap.
    ApproachingCap,
    CapReached,
    EndOfResults,
    /// The last continuation failed and can be retried.
    RetryMore(String),
}

impl SegmentsFooter {
    /// Footer for the current pagination state, if any rows are loaded.
    #[must_use]
    pub fn for_controller(segments: &SegmentsController) -> Option<Self> {
        if segments.data().is_empty() {
            return None;
        }
        if segments.is_fetching_next_page() {
            return Some(Self::LoadingMore);
        }
        if let Some(error) = segments.next_page_error() {
            return Some(Self::RetryMore(error.to_string()));
        }
        if segments.cap_reached() {
            return Some(Self::CapReached);
        }
        if segments.reached_end() {
            return Some(Self::EndOfResults);
        }
        if segments.has_next_page() {
            if segments.approaching_cap() {
                return Some(Self::ApproachingCap);
            }
            return Some(Self::More);
        }
        None
    }

    #[must_use]
    pub fn text(&self) -> String {
        match self {
            Self::More => "Scroll for more".to_string(),
            Self::LoadingMore => "Loading more transcript matches...".to_string(),
            Self::ApproachingCap => {
                format!("Approaching the {MAX_RESULTS} match limit. Scroll for more")
            }
            Self::CapReached => format!(
                "Showing the first {MAX_RESULTS} matches. Refine your search to see more"
            ),
            Self::EndOfResults => "End of results".to_string(),
            Self::RetryMore(error) => {
                format!("Could not load more: {error}. Press Ctrl-R to retry")
            }
        }
    }

    fn style(&self, theme: &Theme) -> Style {
        match self {
            Self::RetryMore(_) => theme.error,
            Self::ApproachingCap | Self::CapReached => theme.highlight,
            _ => theme.empty,
        }
    }

    pub(crate) fn line(&self, theme: &Theme) -> Line<'static> {
        Line::styled(self.text(), self.style(theme))
    }
}

/// Format a transcript offset as `m:ss`, or `h:mm:ss` past the hour.
#[must_use]
pub fn format_timestamp(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let (hours, minutes, secs) = (total / 3600, (total / 60) % 60, total % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{secs:02}")
    } else {
        format!("{minutes}:{secs:02}")
    }
}

fn availability(is_available: bool, theme: &Theme) -> (Style, Option<Span<'static>>) {
    if is_available {
        (Style::default(), None)
    } else {
        (
            theme.unavailable_style(),
            Some(Span::styled(" (unavailable)", theme.empty)),
        )
    }
}

pub(crate) fn title_line(title: &TitleResult, theme: &Theme) -> Line<'static> {
    let (style, marker) = availability(title.is_available, theme);
    let mut spans = vec![Span::styled(title.title.clone(), style)];
    if let Some(channel) = &title.channel_name {
        spans.push(Span::styled(format!("  {channel}"), theme.empty));
    }
    if let Some(date) = &title.upload_date {
        spans.push(Span::styled(format!("  {date}"), theme.empty));
    }
    spans.extend(marker);
    Line::from(spans)
}

pub(crate) fn description_line(description: &DescriptionResult, theme: &Theme) -> Line<'static> {
    let (style, marker) = availability(description.is_available, theme);
    let excerpt = description.description.lines().next().unwrap_or_default();
    let mut spans = vec![
        Span::styled(description.title.clone(), style),
        Span::styled(format!(": {excerpt}"), theme.empty),
    ];
    spans.extend(marker);
    Line::from(spans)
}

pub(crate) fn segment_line(segment: &Segment, theme: &Theme) -> Line<'static> {
    let (style, marker) = availability(segment.is_available, theme);
    let source = segment
        .video_title
        .as_deref()
        .unwrap_or(segment.video_id.as_str());
    let mut spans = vec![
        Span::styled(
            format!("[{}] ", format_timestamp(segment.start_time)),
            theme.empty,
        ),
        Span::styled(format!("{source}: "), theme.prompt),
        Span::styled(segment.text.clone(), style),
    ];
    spans.extend(marker);
    Line::from(spans)
}
