//! Centralized layout measurements for the TUI.
//!
//! Rendering and mouse hit-testing both go through these functions, so a
//! click always lands on the card that was drawn under it.

use ratatui::layout::Rect;
use tasklane_protocol::TaskStatus;

/// Height of the header bar in rows.
pub const HEADER_HEIGHT: u16 = 3;

/// Height of the status bar in rows.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Height of each task card in rows.
///
/// This includes the border (2 rows) and content (title and metadata).
pub const TASK_CARD_HEIGHT: u16 = 4;

/// Minimum terminal height for useful rendering.
///
/// One card per column plus the column borders and the status bar.
pub const MIN_HEIGHT: u16 = 8;

/// Minimum terminal height for rendering with header.
///
/// Below this the header is hidden to reclaim its rows.
pub const MIN_HEIGHT_WITH_HEADER: u16 = MIN_HEIGHT + HEADER_HEIGHT;

/// Minimum terminal width for useful rendering.
///
/// The board has 4 columns; each needs at least 10 characters for borders
/// and truncated titles to be readable.
pub const MIN_WIDTH: u16 = 40;

/// What lies under a screen position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// A task card, by index in its displayed column.
    Card {
        /// The column holding the card.
        status: TaskStatus,
        /// Index of the card in the column, scrolling included.
        index: usize,
    },
    /// A column outside any card.
    Column(TaskStatus),
    /// Anywhere off the board.
    Outside,
}

/// The areas of a full screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// The header, hidden on short terminals.
    pub header: Option<Rect>,
    /// The four board columns.
    pub board: Rect,
    /// The single-row status bar at the bottom.
    pub status_bar: Rect,
}

impl ScreenLayout {
    /// Splits a terminal area into header, board and status bar.
    ///
    /// # Examples
    ///
    /// ```
    /// use ratatui::layout::Rect;
    /// use tasklane_tui::layout::ScreenLayout;
    ///
    /// let layout = ScreenLayout::new(Rect::new(0, 0, 80, 24));
    /// assert_eq!(layout.header, Some(Rect::new(0, 0, 80, 3)));
    /// assert_eq!(layout.board, Rect::new(0, 3, 80, 20));
    /// assert_eq!(layout.status_bar, Rect::new(0, 23, 80, 1));
    /// ```
    #[must_use]
    pub fn new(area: Rect) -> Self {
        let show_header = area.height >= MIN_HEIGHT_WITH_HEADER;
        let header_height = if show_header { HEADER_HEIGHT } else { 0 };
        let status_height = STATUS_BAR_HEIGHT.min(area.height.saturating_sub(header_height));
        let board_height = area
            .height
            .saturating_sub(header_height)
            .saturating_sub(status_height);

        let board = Rect::new(area.x, area.y + header_height, area.width, board_height);
        Self {
            header: show_header.then(|| Rect::new(area.x, area.y, area.width, HEADER_HEIGHT)),
            board,
            status_bar: Rect::new(area.x, board.bottom(), area.width, status_height),
        }
    }
}

/// Splits the board into four columns of equal width.
///
/// The last column absorbs the remainder of the division.
#[must_use]
pub fn column_areas(board: Rect) -> [Rect; 4] {
    let width = board.width / 4;
    let mut areas = [Rect::default(); 4];
    let mut x = board.x;
    for (i, area) in areas.iter_mut().enumerate() {
        let w = if i == 3 {
            board.right().saturating_sub(x)
        } else {
            width
        };
        *area = Rect::new(x, board.y, w, board.height);
        x += w;
    }
    areas
}

/// Returns the area inside a column's border.
#[must_use]
pub fn column_inner(column: Rect) -> Rect {
    Rect::new(
        column.x.saturating_add(1),
        column.y.saturating_add(1),
        column.width.saturating_sub(2),
        column.height.saturating_sub(2),
    )
}

/// Returns how many cards fit in a column.
#[must_use]
pub fn visible_cards(column: Rect) -> usize {
    usize::from(column_inner(column).height / TASK_CARD_HEIGHT)
}

/// Returns the first card shown so that `focus` stays visible.
///
/// # Examples
///
/// ```
/// use tasklane_tui::layout::scroll_offset;
///
/// assert_eq!(scroll_offset(None, 3), 0);
/// assert_eq!(scroll_offset(Some(2), 3), 0);
/// assert_eq!(scroll_offset(Some(5), 3), 3);
/// ```
#[must_use]
pub fn scroll_offset(focus: Option<usize>, visible: usize) -> usize {
    match focus {
        Some(index) if visible > 0 && index >= visible => index + 1 - visible,
        _ => 0,
    }
}

/// Returns the area of the card in visible `slot`, if it fits.
#[must_use]
pub fn card_area(column: Rect, slot: usize) -> Option<Rect> {
    if slot >= visible_cards(column) {
        return None;
    }
    let inner = column_inner(column);
    let offset = u16::try_from(slot).ok()?.checked_mul(TASK_CARD_HEIGHT)?;
    Some(Rect::new(
        inner.x,
        inner.y + offset,
        inner.width,
        TASK_CARD_HEIGHT,
    ))
}

/// Returns a `width` x `height` rectangle centered in `area`, clamped to fit.
#[must_use]
pub fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
