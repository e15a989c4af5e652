use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connectk_ai::{Board, Cell};

/// Draws `board` to stdout, top row first, under a 1-indexed column header
pub fn display(board: &Board) -> Result<()> {
    let mut stdout = stdout();

    let columns: String = (1..=board.columns())
        .map(|x| (x % 10).to_string())
        .collect();
    stdout.queue(PrintStyledContent(style(columns + "\n")))?;

    for row in 0..board.rows() {
        for column in 0..board.columns() {
            stdout.queue(PrintStyledContent(
                style("O")
                    .attribute(Attribute::Bold)
                    .on(Color::DarkBlue)
                    .with(match board.get(row, column) {
                        Cell::PlayerOne => Color::Red,
                        Cell::PlayerTwo => Color::Yellow,
                        Cell::Empty => Color::DarkBlue,
                    }),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;
    Ok(())
}
