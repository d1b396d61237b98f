use crate::app::App;
use crate::components::ShapeKind;
use crate::game::{CELL_SIZE, COLS, ROWS};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

const MIN_INFO_WIDTH: u16 = 20;
const FILLED_CELL: &str = "█";
const EMPTY_CELL: &str = "[]";

// Board size in terminal cells, borders included
#[must_use]
pub fn board_size() -> (u16, u16) {
    (COLS as u16 * CELL_SIZE + 2, ROWS as u16 + 2)
}

// Smallest terminal that fits the board, the title and the info panel
#[must_use]
pub fn min_terminal_size() -> (u16, u16) {
    let (board_width, board_height) = board_size();
    (board_width + MIN_INFO_WIDTH, board_height + 3)
}

pub fn render(f: &mut Frame, app: &App) {
    let (min_width, min_height) = min_terminal_size();

    // Check if the terminal is too small to render the game properly
    if f.area().width < min_width || f.area().height < min_height {
        let warning_text = Paragraph::new(
            "Terminal too small!\nPlease resize your terminal\nto continue playing.",
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Blockfall"));

        let warning_area = centered_rect(50, 30, f.area());
        f.render_widget(warning_text, warning_area);
        return;
    }

    let (board_width, board_height) = board_size();

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(board_width), Constraint::Min(MIN_INFO_WIDTH)])
        .split(f.area());

    let game_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),            // Title
            Constraint::Length(board_height), // Game board (fixed height)
            Constraint::Fill(1),
        ])
        .split(main_layout[0]);

    let title = Paragraph::new("BLOCKFALL")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, game_layout[0]);

    render_game_board(f, app, game_layout[1]);
    render_info(f, app, main_layout[1]);
}

fn render_info(f: &mut Frame, app: &App, area: Rect) {
    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(4), // Current shape
            Constraint::Min(5),    // Controls
        ])
        .split(area);

    let info_title = Paragraph::new("INFO")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(info_title, info_layout[0]);

    let state = app.state();
    let status = format!(
        "Shape: {:?}\nX: {}  Y: {}",
        state.shape.kind(),
        state.position.x,
        state.position.y
    );
    let status_info = Paragraph::new(status)
        .block(Block::default().borders(Borders::NONE))
        .wrap(Wrap { trim: true });
    f.render_widget(status_info, info_layout[1]);

    let controls = Paragraph::new(
        "Controls:\n\
        ←/→: Move left/right\n\
        ↓: Move down\n\
        ↑: Rotate (no effect)\n\
        R: Restart\n\
        Q: Quit\n\
        ",
    )
    .block(Block::default().borders(Borders::TOP))
    .wrap(Wrap { trim: true });
    f.render_widget(controls, info_layout[2]);
}

fn render_game_board(f: &mut Frame, app: &App, area: Rect) {
    let inner_area = Block::default().borders(Borders::ALL).inner(area);
    f.render_widget(Block::default().borders(Borders::ALL), area);

    let display = app.display();
    let fill_override = display.fill_color();

    for (y, row) in app.snapshot().grid.rows().iter().enumerate() {
        for (x, &marker) in row.iter().enumerate() {
            let cell_x = inner_area.left() + x as u16 * CELL_SIZE;
            let cell_y = inner_area.top() + y as u16;
            if cell_x + CELL_SIZE > inner_area.right() || cell_y >= inner_area.bottom() {
                continue;
            }

            if marker != 0 {
                let color = fill_override.unwrap_or_else(|| cell_color(marker));
                for offset in 0..CELL_SIZE {
                    if let Some(cell) = f.buffer_mut().cell_mut((cell_x + offset, cell_y)) {
                        cell.set_symbol(FILLED_CELL);
                        cell.set_fg(color);
                    }
                }
            } else if display.show_grid_lines {
                draw_empty_cell(f, cell_x, cell_y);
            }
        }
    }
}

fn draw_empty_cell(f: &mut Frame, x: u16, y: u16) {
    for (offset, symbol) in EMPTY_CELL.chars().enumerate() {
        if let Some(cell) = f.buffer_mut().cell_mut((x + offset as u16, y)) {
            cell.set_char(symbol);
            cell.set_fg(Color::DarkGray);
        }
    }
}

/// Color for a snapshot marker when no fill color is configured.
#[must_use]
pub fn cell_color(marker: u8) -> Color {
    ShapeKind::from_marker(marker).map_or(Color::Blue, ShapeKind::get_color)
}

/// Helper function to create a centered rect using up certain percentage of the available rect
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
