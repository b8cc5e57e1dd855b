use std::fmt::Write;

use sapper_core::{Board, CellView, MineGenerator};

/// Draws the board: a header row of 1-based column numbers, row numbers down
/// the left, `—`/`│` framing, one character per cell.
pub fn render<G: MineGenerator>(board: &Board<G>) -> String {
    let (width, height) = board.size();
    let mut out = String::new();

    out.push_str(" │");
    for column in 1..=u16::from(width) {
        let _ = write!(out, "{column}");
    }
    out.push_str("│\n");
    let _ = writeln!(out, "—│{}│", "—".repeat(width as usize));

    for y in 0..height {
        let _ = write!(out, "{}│", u16::from(y) + 1);
        for x in 0..width {
            out.push(cell_char(board.cell_view((x, y))));
        }
        out.push_str("│\n");
    }
    let _ = writeln!(out, "—│{}│", "—".repeat(width as usize));
    out
}

fn cell_char(view: CellView) -> char {
    match view {
        CellView::Hidden => '.',
        CellView::Flagged => '*',
        CellView::Revealed(0) => '/',
        CellView::Revealed(count) => (b'0' + count) as char,
        CellView::Exploded => 'X',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sapper_core::{Coord2, GameConfig, MineLayout};

    struct FixedMines(&'static [Coord2]);

    impl MineGenerator for FixedMines {
        fn generate(&mut self, config: GameConfig, _safe: Coord2) -> MineLayout {
            MineLayout::from_mine_coords(config.size, self.0).unwrap()
        }
    }

    fn board(size: Coord2, mines: &'static [Coord2]) -> Board<FixedMines> {
        let config = GameConfig::new(size, mines.len() as u16).unwrap();
        Board::with_generator(config, FixedMines(mines))
    }

    #[test]
    fn fresh_board_renders_hidden_cells_in_a_frame() {
        let board = board((3, 3), &[(2, 2)]);
        assert_eq!(
            render(&board),
            " │123│\n\
             —│———│\n\
             1│...│\n\
             2│...│\n\
             3│...│\n\
             —│———│\n"
        );
    }

    #[test]
    fn opened_numbered_and_flagged_cells_render_distinctly() {
        let mut board = board((3, 3), &[(2, 2)]);
        board.reveal((0, 0)).unwrap();
        board.toggle_flag((2, 2)).unwrap();
        assert_eq!(
            render(&board),
            " │123│\n\
             —│———│\n\
             1│///│\n\
             2│/11│\n\
             3│/1*│\n\
             —│———│\n"
        );
    }

    #[test]
    fn loss_screen_marks_every_mine() {
        let mut board = board((2, 2), &[(0, 0)]);
        board.reveal((1, 1)).unwrap();
        board.reveal((0, 0)).unwrap();
        assert_eq!(
            render(&board),
            " │12│\n\
             —│——│\n\
             1│X.│\n\
             2│.1│\n\
             —│——│\n"
        );
    }
}
