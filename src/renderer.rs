use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::entities::{Bounds, HostileKind};
use crate::game::{DrawKind, Drawable, MatchState, MatchStatus};

/// Simulation pixels covered by one terminal cell horizontally
pub const CELL_WIDTH: i32 = 8;
/// Simulation pixels covered by one terminal cell vertically
pub const CELL_HEIGHT: i32 = 16;
/// Rows reserved above (HUD) and below (controls hint) the play field
pub const HUD_ROWS: u16 = 1;
pub const HINT_ROWS: u16 = 1;

const ORANGE: Color = Color::Rgb(255, 165, 0);
const BUTTON_WIDTH: u16 = 17;
const BUTTON_HEIGHT: u16 = 3;

/// Play field size in simulation pixels for a terminal of the given size
pub fn play_area_for_terminal(columns: u16, rows: u16) -> (i32, i32) {
    let field_rows = rows.saturating_sub(HUD_ROWS + HINT_ROWS);
    (
        i32::from(columns) * CELL_WIDTH,
        i32::from(field_rows) * CELL_HEIGHT,
    )
}

/// Terminal rectangle that holds the play field
pub fn play_field(area: Rect) -> Rect {
    Rect {
        x: area.x,
        y: area.y + HUD_ROWS.min(area.height),
        width: area.width,
        height: area.height.saturating_sub(HUD_ROWS + HINT_ROWS),
    }
}

/// Cells covered by a bounding box, clipped to the play field
pub fn cells_for(bounds: &Bounds, field: Rect) -> Option<Rect> {
    let first_col = bounds.left().div_euclid(CELL_WIDTH).max(0);
    let last_col = (bounds.right() - 1)
        .div_euclid(CELL_WIDTH)
        .min(i32::from(field.width) - 1);
    let first_row = bounds.top().div_euclid(CELL_HEIGHT).max(0);
    let last_row = (bounds.bottom() - 1)
        .div_euclid(CELL_HEIGHT)
        .min(i32::from(field.height) - 1);

    if first_col > last_col || first_row > last_row {
        return None;
    }
    // All four values are now within the u16-sized field
    Some(Rect {
        x: field.x + first_col as u16,
        y: field.y + first_row as u16,
        width: (last_col - first_col + 1) as u16,
        height: (last_row - first_row + 1) as u16,
    })
}

/// Clickable buttons on the main menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MainMenuLayout {
    pub title: Rect,
    pub play: Rect,
    pub quit: Rect,
}

impl MainMenuLayout {
    pub fn new(area: Rect) -> Self {
        Self {
            title: row_at(area, area.height / 4),
            play: button_at(area, (area.height / 2).saturating_sub(1)),
            quit: button_at(area, area.height / 2 + BUTTON_HEIGHT),
        }
    }
}

/// Clickable buttons on the game over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameOverLayout {
    pub title: Rect,
    pub score: Rect,
    pub retry: Rect,
    pub main_menu: Rect,
}

impl GameOverLayout {
    pub fn new(area: Rect) -> Self {
        let top = area.height / 4;
        Self {
            title: row_at(area, top),
            score: row_at(area, top + 2),
            retry: button_at(area, top + 4),
            main_menu: button_at(area, top + 4 + BUTTON_HEIGHT + 1),
        }
    }
}

pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

fn row_at(area: Rect, y: u16) -> Rect {
    Rect {
        x: area.x,
        y: area.y + y.min(area.height.saturating_sub(1)),
        width: area.width,
        height: area.height.min(1),
    }
    .intersection(area)
}

fn button_at(area: Rect, y: u16) -> Rect {
    let width = BUTTON_WIDTH.min(area.width);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + y,
        width,
        height: BUTTON_HEIGHT,
    }
    .intersection(area)
}

/// What the current screen needs to draw
pub enum RenderView<'a> {
    MainMenu,
    Match {
        drawables: &'a [Drawable],
        status: MatchStatus,
    },
    GameOver {
        status: MatchStatus,
    },
}

/// Handles all rendering responsibilities for the game
#[derive(Debug, Default)]
pub struct GameRenderer;

impl GameRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Main render method that dispatches to screen-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        let area = frame.area();
        match view {
            RenderView::MainMenu => self.render_main_menu(frame, area),
            RenderView::Match { drawables, status } => {
                self.render_match(frame, area, drawables, status);
                if status.state == MatchState::Paused {
                    self.render_paused(frame, area);
                }
            }
            RenderView::GameOver { status } => self.render_game_over(frame, area, status),
        }
    }

    fn render_main_menu(&self, frame: &mut Frame, area: Rect) {
        let layout = MainMenuLayout::new(area);

        frame.render_widget(
            Paragraph::new(Line::from("GALACTIC DEFENDER").bold().yellow()).centered(),
            layout.title,
        );
        self.render_button(frame, layout.play, "Play", Color::Green);
        self.render_button(frame, layout.quit, "Quit", Color::Red);
    }

    fn render_button(&self, frame: &mut Frame, rect: Rect, label: &str, color: Color) {
        let style = Style::default()
            .fg(Color::Black)
            .bg(color)
            .add_modifier(Modifier::BOLD);
        frame.render_widget(
            Paragraph::new(Line::from(label))
                .style(style)
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).border_style(style)),
            rect,
        );
    }

    /// Renders the active play field and HUD
    fn render_match(
        &self,
        frame: &mut Frame,
        area: Rect,
        drawables: &[Drawable],
        status: &MatchStatus,
    ) {
        let field = play_field(area);
        let buffer = frame.buffer_mut();

        for drawable in drawables {
            let Some(cells) = cells_for(&drawable.bounds, field) else {
                continue;
            };
            let (glyph, color) = match drawable.kind {
                DrawKind::Player => ('A', Color::Green),
                DrawKind::Projectile => ('|', Color::Green),
                DrawKind::Hostile(HostileKind::Scout) => ('V', Color::Red),
                DrawKind::Hostile(HostileKind::Raider) => ('=', ORANGE),
                DrawKind::Hostile(HostileKind::Brute) => ('#', Color::Blue),
            };
            let style = Style::default().fg(color).add_modifier(Modifier::BOLD);
            let row_text = glyph.to_string().repeat(usize::from(cells.width));
            for row in cells.y..cells.y + cells.height {
                buffer.set_string(cells.x, row, &row_text, style);
            }
        }

        let hud_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: HUD_ROWS.min(area.height),
        };

        let score = Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", status.score),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);
        let wave = Line::from(vec![
            Span::styled("Wave: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", status.wave),
                Style::default().fg(ORANGE).add_modifier(Modifier::BOLD),
            ),
        ]);
        let lives = Line::from(vec![
            Span::styled("Lives: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", status.lives),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        frame.render_widget(Paragraph::new(score), hud_area);
        frame.render_widget(Paragraph::new(wave).centered(), hud_area);
        frame.render_widget(Paragraph::new(lives).alignment(Alignment::Right), hud_area);

        // Controls hint at bottom
        let controls = Line::from(vec![Span::styled(
            "[A/D/Arrows: Move] [Space: Fire] [Esc/P: Pause] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);

        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(HINT_ROWS),
            width: area.width.saturating_sub(2),
            height: HINT_ROWS.min(area.height),
        };

        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    /// Renders the pause overlay on top of the frozen play field
    fn render_paused(&self, frame: &mut Frame, area: Rect) {
        let pause_text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().white(),
            Line::from(""),
            Line::from("Press ESC to continue").centered().white(),
        ];

        let width = area.width.min(30);
        let height = area.height.min(6);
        let pause_area = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::White)),
                )
                .alignment(Alignment::Center),
            pause_area,
        );
    }

    /// Renders the game over screen
    fn render_game_over(&self, frame: &mut Frame, area: Rect, status: &MatchStatus) {
        let layout = GameOverLayout::new(area);

        frame.render_widget(
            Paragraph::new(Line::from("GAME OVER").red().bold()).centered(),
            layout.title,
        );
        frame.render_widget(
            Paragraph::new(
                Line::from(format!(
                    "Final Score: {}  (wave {})",
                    status.score, status.wave
                ))
                .white()
                .bold(),
            )
            .centered(),
            layout.score,
        );
        self.render_button(frame, layout.retry, "Retry", Color::Green);
        self.render_button(frame, layout.main_menu, "Main Menu", Color::Blue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> Rect {
        Rect::new(0, 1, 80, 22)
    }

    #[test]
    fn test_play_area_for_terminal() {
        assert_eq!(play_area_for_terminal(80, 24), (640, 352));
        assert_eq!(play_area_for_terminal(80, 1), (640, 0));
    }

    #[test]
    fn test_play_field_leaves_room_for_hud() {
        let field = play_field(Rect::new(0, 0, 80, 24));
        assert_eq!(field, Rect::new(0, 1, 80, 22));
    }

    #[test]
    fn test_cells_for_visible_box() {
        // 30x30 px box at (16, 32) spans columns 2..=5 and rows 2..=3
        let cells = cells_for(&Bounds::new(16, 32, 30, 30), field()).unwrap();
        assert_eq!(cells, Rect::new(2, 3, 4, 2));
    }

    #[test]
    fn test_cells_for_box_above_field_is_hidden() {
        assert_eq!(cells_for(&Bounds::new(100, -65, 30, 30), field()), None);
    }

    #[test]
    fn test_cells_for_clips_partially_visible_box() {
        let cells = cells_for(&Bounds::new(100, -10, 30, 30), field()).unwrap();
        assert_eq!(cells.y, 1);
        assert_eq!(cells.height, 2);
    }

    #[test]
    fn test_cells_for_clips_right_edge() {
        let cells = cells_for(&Bounds::new(630, 0, 40, 16), field()).unwrap();
        assert_eq!(cells.x + cells.width, 80);
    }

    #[test]
    fn test_menu_buttons_do_not_overlap() {
        let layout = MainMenuLayout::new(Rect::new(0, 0, 80, 24));
        assert!(!layout.play.intersects(layout.quit));
        let center = layout.play.x + layout.play.width / 2;
        assert!(contains(layout.play, center, layout.play.y + 1));
        assert!(!contains(layout.play, center, layout.quit.y + 1));

        let layout = GameOverLayout::new(Rect::new(0, 0, 80, 24));
        assert!(!layout.retry.intersects(layout.main_menu));
    }
}
