//! Board drawing for the terminal, one colored glyph per cell.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{execute, queue};
use ndarray::Array2;
use sapper_core::CellView;

pub fn clear_screen(out: &mut impl Write) -> io::Result<()> {
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))
}

pub fn draw_board(out: &mut impl Write, board: &Array2<CellView>) -> io::Result<()> {
    for row in board.rows() {
        for &view in row.iter() {
            let (glyph, color) = cell_face(view);
            queue!(out, SetForegroundColor(color), Print(glyph), Print(' '))?;
        }
        queue!(out, ResetColor, Print('\n'))?;
    }
    out.flush()
}

/// Glyph and color for one cell, following the classic console palette.
fn cell_face(view: CellView) -> (char, Color) {
    match view {
        CellView::Hidden => ('?', Color::White),
        CellView::Flagged => ('V', Color::DarkCyan),
        CellView::Mine => ('X', Color::Red),
        CellView::Open(0) => ('#', Color::Grey),
        CellView::Open(count) => {
            let color = match count {
                1 => Color::Blue,
                2 => Color::Green,
                3 => Color::Yellow,
                4 => Color::Magenta,
                5 => Color::DarkMagenta,
                6 => Color::DarkRed,
                7 => Color::DarkYellow,
                _ => Color::Cyan,
            };
            (char::from_digit(count.into(), 10).unwrap_or('?'), color)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faces_match_the_console_palette() {
        assert_eq!(cell_face(CellView::Hidden), ('?', Color::White));
        assert_eq!(cell_face(CellView::Flagged), ('V', Color::DarkCyan));
        assert_eq!(cell_face(CellView::Mine), ('X', Color::Red));
        assert_eq!(cell_face(CellView::Open(0)), ('#', Color::Grey));
        assert_eq!(cell_face(CellView::Open(3)), ('3', Color::Yellow));
        assert_eq!(cell_face(CellView::Open(8)), ('8', Color::Cyan));
    }

    #[test]
    fn draw_board_emits_one_line_per_row() {
        let board = Array2::from_elem([2, 3], CellView::Hidden);
        let mut buf = Vec::new();

        draw_board(&mut buf, &board).unwrap();

        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert_eq!(text.matches('?').count(), 6);
    }
}
