//! Menu screens: intro, dialogs, name entry and the leaderboard.
//!
//! Every screen is a bordered panel centered in the viewport. Dialogs that
//! belong to a round (confirm, game over) are drawn over the board the caller
//! already rendered; the others clear the frame first.

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::game_view::Viewport;
use crate::store::ScoreEntry;
use crate::types::MAX_NAME_CHARS;

/// Which menu to draw, with the data it shows.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScreenView<'a> {
    Intro,
    /// Return to the main menu mid-round.
    Confirm,
    GameOver {
        score: u32,
        can_register: bool,
    },
    NameEntry {
        score: u32,
        input: &'a str,
        error: Option<&'a str>,
    },
    Leaderboard {
        entries: &'a [ScoreEntry],
        /// 1-based rank to highlight.
        highlight: Option<usize>,
        after_register: bool,
    },
}

impl ScreenView<'_> {
    /// Dialogs keep the board visible underneath.
    pub fn is_overlay(&self) -> bool {
        matches!(self, Self::Confirm | Self::GameOver { .. })
    }
}

#[derive(Debug, Clone, Copy)]
enum Line<'a> {
    Title(&'a str),
    Text(&'a str),
    Number(&'a str, u32),
    Key(&'a str, &'a str),
    Input(&'a str),
    Error(&'a str),
    Entry {
        rank: usize,
        entry: &'a ScoreEntry,
        highlight: bool,
    },
    Blank,
}

const PANEL_W: u16 = 36;

const TITLE: CellStyle = CellStyle::new(Rgb::new(255, 120, 100), Rgb::new(10, 10, 16)).bold();
const TEXT: CellStyle = CellStyle::new(Rgb::new(220, 220, 220), Rgb::new(10, 10, 16));
const KEY: CellStyle = CellStyle::new(Rgb::new(255, 215, 0), Rgb::new(10, 10, 16)).bold();
const ERROR: CellStyle = CellStyle::new(Rgb::new(255, 90, 90), Rgb::new(10, 10, 16));
const INPUT: CellStyle = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(40, 40, 60));
const HIGHLIGHT: CellStyle = CellStyle::new(Rgb::new(20, 20, 20), Rgb::new(255, 215, 0)).bold();

pub fn render_screen(view: &ScreenView<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
    fb.resize(viewport.width, viewport.height);
    if !view.is_overlay() {
        fb.clear(CellStyle::default().into_cell(' '));
    }

    match *view {
        ScreenView::Intro => draw_panel(
            fb,
            viewport,
            &[
                Line::Title("APPLE TEN"),
                Line::Blank,
                Line::Text("Drag a box around apples"),
                Line::Text("that add up to 10."),
                Line::Text("Every apple cleared is a point."),
                Line::Blank,
                Line::Key("ENTER", "start"),
                Line::Key("L", "leaderboard"),
                Line::Key("Q", "quit"),
            ],
        ),
        ScreenView::Confirm => draw_panel(
            fb,
            viewport,
            &[
                Line::Title("RETURN TO MENU?"),
                Line::Blank,
                Line::Text("The current round is discarded."),
                Line::Blank,
                Line::Key("Y", "yes"),
                Line::Key("N", "keep playing"),
            ],
        ),
        ScreenView::GameOver {
            score,
            can_register,
        } => {
            let register = if can_register {
                Line::Key("R", "register score")
            } else {
                Line::Blank
            };
            draw_panel(
                fb,
                viewport,
                &[
                    Line::Title("GAME OVER"),
                    Line::Blank,
                    Line::Number("Final score", score),
                    Line::Blank,
                    register,
                    Line::Key("ENTER", "play again"),
                    Line::Key("ESC", "main menu"),
                ],
            )
        }
        ScreenView::NameEntry {
            score,
            input,
            error,
        } => draw_panel(
            fb,
            viewport,
            &[
                Line::Title("REGISTER SCORE"),
                Line::Blank,
                Line::Number("Score", score),
                Line::Blank,
                Line::Text("Name:"),
                Line::Input(input),
                error.map(Line::Error).unwrap_or(Line::Blank),
                Line::Blank,
                Line::Key("ENTER", "save"),
                Line::Key("ESC", "cancel"),
            ],
        ),
        ScreenView::Leaderboard {
            entries,
            highlight,
            after_register,
        } => {
            let mut lines = Vec::with_capacity(entries.len() + 6);
            lines.push(Line::Title("LEADERBOARD"));
            lines.push(Line::Blank);
            if entries.is_empty() {
                lines.push(Line::Text("No scores yet."));
            }
            for (i, entry) in entries.iter().enumerate() {
                lines.push(Line::Entry {
                    rank: i + 1,
                    entry,
                    highlight: highlight == Some(i + 1),
                });
            }
            lines.push(Line::Blank);
            if after_register {
                lines.push(Line::Key("ENTER", "play again"));
                lines.push(Line::Key("ESC", "main menu"));
            } else {
                lines.push(Line::Key("ENTER", "start"));
                lines.push(Line::Key("ESC", "back"));
            }
            draw_panel(fb, viewport, &lines);
        }
    }
}

fn draw_panel(fb: &mut FrameBuffer, viewport: Viewport, lines: &[Line<'_>]) {
    let w = PANEL_W.min(viewport.width);
    let h = (lines.len() as u16).saturating_add(4).min(viewport.height);
    let x = viewport.width.saturating_sub(w) / 2;
    let y = viewport.height.saturating_sub(h) / 2;

    fb.fill_rect(x, y, w, h, ' ', TEXT);
    fb.draw_border(x, y, w, h, TEXT);

    let left = x + 3;
    let inner_w = w.saturating_sub(2);
    for (i, line) in lines.iter().enumerate() {
        let ly = y + 2 + i as u16;
        if ly + 1 >= y + h {
            break;
        }
        match *line {
            Line::Title(s) => fb.put_str_centered(x + 1, inner_w, ly, s, TITLE),
            Line::Text(s) => fb.put_str_centered(x + 1, inner_w, ly, s, TEXT),
            Line::Number(label, n) => {
                let cx = fb.put_str(left, ly, label, TEXT);
                let cx = fb.put_str(cx, ly, ": ", TEXT);
                fb.put_u32(cx, ly, n, KEY);
            }
            Line::Key(key, action) => {
                let cx = fb.put_str(left, ly, "[", TEXT);
                let cx = fb.put_str(cx, ly, key, KEY);
                let cx = fb.put_str(cx, ly, "] ", TEXT);
                fb.put_str(cx, ly, action, TEXT);
            }
            Line::Input(s) => {
                fb.fill_rect(left, ly, MAX_NAME_CHARS as u16 + 2, 1, ' ', INPUT);
                let cx = fb.put_str(left + 1, ly, s, INPUT);
                fb.put_char(cx, ly, '_', INPUT);
            }
            Line::Error(s) => {
                fb.put_str(left, ly, s, ERROR);
            }
            Line::Entry {
                rank,
                entry,
                highlight,
            } => {
                let style = if highlight { HIGHLIGHT } else { TEXT };
                fb.fill_rect(left, ly, inner_w.saturating_sub(4), 1, ' ', style);
                let rank_x = if rank < 10 { left + 1 } else { left };
                let cx = fb.put_u32(rank_x, ly, rank as u32, style);
                fb.put_str(cx, ly, ".", style);
                fb.put_str(left + 4, ly, &entry.name, style);
                fb.put_u32(left + 4 + MAX_NAME_CHARS as u16 + 2, ly, entry.score, style);
            }
            Line::Blank => {}
        }
    }
}
