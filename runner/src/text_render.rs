use snake_common::games::snake::{Cell, FieldSize, GameSnapshot, Phase, RenderSink};

/// Draws each frame as a bordered character grid on stdout.
pub struct TextRenderSink {
    field_size: FieldSize,
    enabled: bool,
}

impl TextRenderSink {
    pub fn new(field_size: FieldSize, enabled: bool) -> Self {
        Self {
            field_size,
            enabled,
        }
    }
}

impl RenderSink for TextRenderSink {
    fn render(&mut self, snapshot: &GameSnapshot, high_score: u32) {
        if self.enabled {
            println!("{}", render_frame(snapshot, self.field_size, high_score));
        }
    }
}

pub fn render_frame(snapshot: &GameSnapshot, field_size: FieldSize, high_score: u32) -> String {
    let width = field_size.cols as usize;
    let mut rows: Vec<Vec<char>> = vec![vec![' '; width]; field_size.rows as usize];

    let mut put = |cell: Cell, glyph: char| {
        if field_size.contains(cell) {
            rows[cell.y as usize][cell.x as usize] = glyph;
        }
    };
    put(snapshot.food, '*');
    // Tail first so the head wins if segments ever overlap.
    for (i, cell) in snapshot.snake.iter().enumerate().rev() {
        put(*cell, if i == 0 { '@' } else { 'o' });
    }

    let border = format!("+{}+", "-".repeat(width));
    let mut lines = Vec::with_capacity(rows.len() + 4);
    lines.push(format!("Score: {}  Highest Score: {}", snapshot.score, high_score));
    lines.push(border.clone());
    for row in rows {
        lines.push(format!("|{}|", row.into_iter().collect::<String>()));
    }
    lines.push(border);
    if let Some(banner) = banner(snapshot, high_score) {
        lines.push(banner);
    }
    lines.join("\n")
}

fn banner(snapshot: &GameSnapshot, high_score: u32) -> Option<String> {
    match snapshot.phase {
        Phase::NotStarted => Some(format!(
            "Start: press Space or Enter | High score: {}",
            high_score
        )),
        Phase::Paused => Some("Paused | press P to resume".to_string()),
        Phase::GameOver => Some(format!(
            "Game Over | Score: {} | High score: {} | press R to restart",
            snapshot.score, high_score
        )),
        Phase::Running => None,
    }
}
