//! ASCII double-helix frames for the manifold visualization log

use std::f64::consts::PI;

pub const HELIX_HEIGHT: usize = 12;
pub const HELIX_WIDTH: usize = 40;

const SPEED: f64 = 0.4;
const FREQUENCY: f64 = 0.5;

/// Render frame `frame` of the rotating helix at the default size
pub fn helix_frame(frame: u32) -> String {
    render_helix(frame, HELIX_HEIGHT, HELIX_WIDTH)
}

/// Render a helix frame. The strand facing the viewer is drawn `O` with a
/// `-` rung; the rear strand is `o` and a rear-facing rung is `:`.
pub fn render_helix(frame: u32, height: usize, width: usize) -> String {
    let mut canvas = vec![vec![' '; width]; height];
    let half = width as f64 / 2.0;
    let radius = width as f64 / 3.0;

    for (y, row) in canvas.iter_mut().enumerate() {
        let angle = y as f64 * FREQUENCY + f64::from(frame) * SPEED;
        let x1 = (half + radius * angle.sin()) as i64;
        let x2 = (half + radius * (angle + PI).sin()) as i64;
        let front = angle.cos() > 0.0;

        let rung = if front { '-' } else { ':' };
        for x in (x1.min(x2) + 1)..x1.max(x2) {
            put(row, x, rung);
        }
        put(row, x1, if front { 'O' } else { 'o' });
        put(row, x2, if front { 'o' } else { 'O' });
    }

    canvas
        .into_iter()
        .map(|row| row.into_iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn put(row: &mut [char], x: i64, ch: char) {
    if let Ok(x) = usize::try_from(x) {
        if let Some(cell) = row.get_mut(x) {
            *cell = ch;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_dimensions() {
        let frame = helix_frame(7);
        let rows: Vec<&str> = frame.split('\n').collect();
        assert_eq!(rows.len(), HELIX_HEIGHT);
        assert!(rows.iter().all(|r| r.chars().count() == HELIX_WIDTH));
    }

    #[test]
    fn test_first_frame_rows() {
        let frame = helix_frame(0);
        let rows: Vec<&str> = frame.split('\n').collect();
        assert_eq!(rows[1], "             o------------O             ");
        assert_eq!(rows[2], "        o----------------------O        ");
        assert_eq!(rows[4], "       O::::::::::::::::::::::::o       ");
    }

    #[test]
    fn test_each_row_has_at_most_one_of_each_strand() {
        for frame in 0..10 {
            for row in helix_frame(frame).split('\n') {
                let front = row.matches('O').count();
                let back = row.matches('o').count();
                assert!(front <= 1 && back <= 1 && front + back >= 1, "row {:?}", row);
            }
        }
    }
}
