//! Draws the quiz flight: the play field, per-phase cards and the info panel.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::engine::constants::{
    BAND_BOTTOM, BIRD_HEIGHT, BIRD_WIDTH, BIRD_X, WORLD_HEIGHT, WORLD_WIDTH,
};
use crate::engine::obstacle::ObstacleKind;
use crate::engine::{Phase, Snapshot};
use crate::ui::game_common::{
    create_game_layout, progress_bar, render_banner, render_info_panel_frame, render_overlay,
    render_status_bar, OverlayTone,
};

const FLAP_CONTROLS: &[(&str, &str)] = &[("[Space/Up/Enter]", "Flap"), ("[Esc]", "Quit")];
const CONTINUE_CONTROLS: &[(&str, &str)] = &[("[Space]", "Retry"), ("[Esc]", "Quit")];

/// One character cell of the play field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub color: Color,
}

const EMPTY: Cell = Cell {
    ch: ' ',
    color: Color::Reset,
};

pub fn render_quiz(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    match snap.phase {
        Phase::Loading => {
            render_overlay(
                frame,
                area,
                OverlayTone::Neutral,
                "BALLOT BIRD",
                &["Loading chapters...".to_string()],
                "",
            );
            return;
        }
        Phase::ChapterComplete => {
            render_chapter_complete(frame, area, snap);
            return;
        }
        Phase::GameComplete => {
            render_game_complete(frame, area, snap);
            return;
        }
        _ => {}
    }

    let title = format!(
        " Chapter {}: {} ",
        snap.chapter.number, snap.chapter.title
    );
    let layout = create_game_layout(frame, area, &title, Color::Cyan, 10, 24);

    render_play_area(frame, layout.content, snap);
    render_phase_card(frame, layout.content, snap);
    render_status_bar_content(frame, layout.status_bar, snap);
    render_info_panel(frame, layout.info_panel, snap);
}

fn render_play_area(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    let grid = rasterize(snap, area.width as usize, area.height as usize);
    let lines: Vec<Line> = grid
        .into_iter()
        .map(|row| {
            Line::from(
                row.into_iter()
                    .map(|cell| Span::styled(cell.ch.to_string(), Style::default().fg(cell.color)))
                    .collect::<Vec<_>>(),
            )
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

/// Map the world onto a `width` x `height` character grid.
pub fn rasterize(snap: &Snapshot, width: usize, height: usize) -> Vec<Vec<Cell>> {
    let mut grid = vec![vec![EMPTY; width]; height];
    if width == 0 || height == 0 {
        return grid;
    }

    let x_scale = width as f64 / WORLD_WIDTH;
    let y_scale = height as f64 / WORLD_HEIGHT;
    // World y at the centre of a display row.
    let row_y = |row: usize| (row as f64 + 0.5) / y_scale;

    for (row, cells) in grid.iter_mut().enumerate() {
        if row_y(row) >= BAND_BOTTOM {
            let ch = if row_y(row) - BAND_BOTTOM < 1.0 / y_scale { '▀' } else { '░' };
            cells.fill(Cell {
                ch,
                color: Color::Yellow,
            });
        }
    }

    for obstacle in snap.obstacles {
        let first_col = (obstacle.x * x_scale).floor().max(0.0) as usize;
        let last_col = ((obstacle.right() * x_scale).ceil() as i64).min(width as i64);
        if last_col <= first_col as i64 {
            continue;
        }
        let spans = obstacle.solid_spans();
        let (pipe_color, slots) = match &obstacle.kind {
            ObstacleKind::Plain { .. } => (Color::Green, None),
            ObstacleKind::Question(gate) => (Color::Magenta, Some(gate)),
        };

        for row in 0..height {
            let y = row_y(row);
            if y >= BAND_BOTTOM {
                break;
            }
            let solid = spans.iter().any(|&(top, bottom)| y >= top && y < bottom);
            for col in first_col..last_col as usize {
                if solid {
                    grid[row][col] = Cell {
                        ch: '█',
                        color: pipe_color,
                    };
                }
            }
            if solid {
                continue;
            }
            if let Some(gate) = slots {
                let label = slot_label(gate.yes_slot(), y, y_scale, 'Y')
                    .or_else(|| slot_label(gate.no_slot(), y, y_scale, 'N'));
                if let Some(ch) = label {
                    let color = match gate.answer {
                        Some(_) => Color::DarkGray,
                        None if ch == 'Y' => Color::Green,
                        None => Color::Red,
                    };
                    grid[row][first_col] = Cell { ch, color };
                }
            }
        }
    }

    let bird_row = (((snap.bird_y + BIRD_HEIGHT / 2.0) * y_scale) as usize).min(height - 1);
    let bird_col = (((BIRD_X + BIRD_WIDTH / 2.0) * x_scale) as usize).min(width - 1);
    grid[bird_row][bird_col] = Cell {
        ch: bird_glyph(snap.bird_tilt, snap.wing_frame),
        color: Color::Yellow,
    };

    grid
}

/// Label for the row closest to the middle of a slot.
fn slot_label((top, bottom): (f64, f64), y: f64, y_scale: f64, ch: char) -> Option<char> {
    let middle = (top + bottom) / 2.0;
    ((y - middle).abs() < 0.5 / y_scale).then_some(ch)
}

fn bird_glyph(tilt: f64, wing_frame: u8) -> char {
    if tilt < -5.0 {
        '▲'
    } else if tilt > 30.0 {
        '▼'
    } else if wing_frame == 1 {
        '▸'
    } else {
        '►'
    }
}

fn render_phase_card(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    let countdown = snap
        .countdown_secs
        .map(|s| format!("{}...", s.max(1)))
        .unwrap_or_default();
    match snap.phase {
        Phase::ChapterIntro { .. } => {
            let mut lines = vec![Line::from(Span::styled(
                snap.chapter.title.clone(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ))];
            if !snap.chapter.subtitle.is_empty() {
                lines.push(Line::from(snap.chapter.subtitle.clone()));
            }
            if !snap.chapter.description.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    snap.chapter.description.clone(),
                    Style::default().fg(Color::DarkGray),
                )));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(format!(
                "{} questions  {}",
                snap.chapter.questions.len(),
                countdown
            )));
            let title = format!(" Chapter {} ", snap.chapter.number);
            render_banner(frame, area, Color::Cyan, &title, lines);
        }
        Phase::AutoFly { .. } | Phase::QuestionPreview { .. } => {
            if let Some(question) = snap.question {
                let mut lines = vec![
                    Line::from(Span::styled(
                        question.statement.clone(),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    )),
                    Line::from(""),
                    Line::from(vec![
                        Span::styled("Top = YES", Style::default().fg(Color::Green)),
                        Span::raw("   "),
                        Span::styled("Bottom = NO", Style::default().fg(Color::Red)),
                        Span::raw(format!("   {}", countdown)),
                    ]),
                ];
                if let Some(progress) = snap.phase_progress {
                    lines.push(progress_bar(progress, (area.width as usize).saturating_sub(12)));
                }
                let title = format!(" Question {} ", snap.question_index + 1);
                render_banner(frame, area, Color::Magenta, &title, lines);
            }
        }
        Phase::Crashed { .. } => {
            let lines = vec![Line::from(Span::styled(
                "Press Space to fly again",
                Style::default().fg(Color::White),
            ))];
            render_banner(frame, area, Color::Red, " CRASH! ", lines);
        }
        _ => {}
    }
}

fn render_status_bar_content(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    if let Some(feedback) = snap.feedback {
        let color = if feedback.correct {
            Color::Green
        } else {
            Color::Red
        };
        render_status_bar(frame, area, &feedback.text, color, FLAP_CONTROLS);
        return;
    }

    match snap.phase {
        Phase::ReadyToPlay { .. } => render_status_bar(
            frame,
            area,
            "Press Space to start!",
            Color::Yellow,
            FLAP_CONTROLS,
        ),
        Phase::Crashed { .. } => render_status_bar(
            frame,
            area,
            &format!("Score: {}", snap.display_score),
            Color::Red,
            CONTINUE_CONTROLS,
        ),
        Phase::Playing if snap.obstacles.iter().any(|o| o.is_unanswered_question()) => {
            let text = snap
                .question
                .map(|q| format!("{} (top YES / bottom NO)", q.statement))
                .unwrap_or_default();
            render_status_bar(frame, area, &text, Color::Magenta, FLAP_CONTROLS);
        }
        _ => render_status_bar(
            frame,
            area,
            &format!("Score: {}", snap.display_score),
            Color::Green,
            FLAP_CONTROLS,
        ),
    }
}

fn render_info_panel(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    let inner = render_info_panel_frame(frame, area);

    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let chapter_score = snap.score.chapter(snap.chapter_index);
    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![
        Line::from(Span::styled(
            format!(" Chapter {}/{}", snap.chapter_index + 1, snap.chapter_count),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Score: ", label),
            Span::styled(
                format!("{}", snap.display_score),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Correct: ", label),
            Span::styled(
                format!("{}/{}", chapter_score.correct, chapter_score.total),
                Style::default().fg(Color::Green),
            ),
        ]),
        Line::from(vec![
            Span::styled(" Overall: ", label),
            Span::styled(
                format!("{}/{}", snap.score.total_correct, snap.score.total_questions),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(" Progress:", label)),
    ];
    let bar_width = (inner.width as usize).saturating_sub(4);
    lines.push(progress_bar(snap.chapter_progress(), bar_width));

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!(" {}", snap.chapter.origin.label()),
        label,
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_chapter_complete(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    let chapter_score = snap.score.chapter(snap.chapter_index);
    let tone = if chapter_score.correct * 2 >= chapter_score.total {
        OverlayTone::Good
    } else {
        OverlayTone::Neutral
    };
    let last = snap.chapter_index + 1 >= snap.chapter_count;
    let body = vec![
        format!("{} complete", snap.chapter.title),
        format!(
            "{} of {} answered correctly",
            chapter_score.correct, chapter_score.total
        ),
        format!("Score: {}", snap.display_score),
    ];
    let prompt = if last {
        "[Space] See results"
    } else {
        "[Space] Next chapter"
    };
    render_overlay(frame, area, tone, "CHAPTER COMPLETE", &body, prompt);
}

fn render_game_complete(frame: &mut Frame, area: Rect, snap: &Snapshot) {
    let mut body = vec![
        format!(
            "You answered {} of {} questions correctly",
            snap.score.total_correct, snap.score.total_questions
        ),
        format!("Final score: {}", snap.display_score),
        String::new(),
    ];
    for (i, chapter) in snap.score.chapters.iter().enumerate() {
        body.push(format!("Chapter {}: {}/{}", i + 1, chapter.correct, chapter.total));
    }
    render_overlay(
        frame,
        area,
        OverlayTone::Good,
        "BALLOT COMPLETE!",
        &body,
        "[Space] Play again   [Esc] Quit",
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::sample_chapters;
    use crate::engine::obstacle::question_obstacle;
    use crate::engine::{EngineConfig, GameState};

    fn count(grid: &[Vec<Cell>], ch: char) -> usize {
        grid.iter().flatten().filter(|c| c.ch == ch).count()
    }

    #[test]
    fn test_rasterize_draws_bird_and_ground() {
        let mut state = GameState::new(sample_chapters(), EngineConfig::default()).unwrap();
        state.phase = Phase::Playing;
        let snap = Snapshot::capture(&state, 0);
        let grid = rasterize(&snap, 60, 32);
        assert_eq!(grid.len(), 32);
        assert_eq!(count(&grid, '►'), 1);
        assert!(count(&grid, '░') > 0);
    }

    #[test]
    fn test_rasterize_question_gate_labels() {
        let mut state = GameState::new(sample_chapters(), EngineConfig::default()).unwrap();
        state.phase = Phase::Playing;
        state
            .obstacles
            .push(question_obstacle(300.0, 0, &state.config));
        let snap = Snapshot::capture(&state, 0);
        let grid = rasterize(&snap, 60, 32);
        assert_eq!(count(&grid, 'Y'), 1);
        assert_eq!(count(&grid, 'N'), 1);
        assert!(count(&grid, '█') > 0);
    }

    #[test]
    fn test_rasterize_empty_area() {
        let state = GameState::new(sample_chapters(), EngineConfig::default()).unwrap();
        let snap = Snapshot::capture(&state, 0);
        assert!(rasterize(&snap, 0, 0).is_empty());
    }

    #[test]
    fn test_bird_glyph_follows_tilt() {
        assert_eq!(bird_glyph(-20.0, 0), '▲');
        assert_eq!(bird_glyph(60.0, 0), '▼');
        assert_eq!(bird_glyph(0.0, 1), '▸');
    }
}
