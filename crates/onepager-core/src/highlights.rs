//! Meeting highlights
//!
//! Picks up to six lines from free-form notes. Bullet lists win when the
//! notes contain at least three bullet lines; otherwise the first lines are
//! taken as they are.

/// Maximum number of highlights extracted
pub const MAX_HIGHLIGHTS: usize = 6;

/// Bullet lines required before bullets are preferred over plain lines
pub const MIN_BULLET_LINES: usize = 3;

const BULLET_MARKERS: [char; 3] = ['-', '*', '•'];

/// Extract highlight lines from notes text with any line ending style
pub fn extract_highlights(notes: &str) -> Vec<String> {
    let lines: Vec<&str> = notes
        .split(['\n', '\r'])
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let bullets: Vec<&str> = lines
        .iter()
        .copied()
        .filter(|line| line.starts_with(BULLET_MARKERS))
        .collect();

    if bullets.len() >= MIN_BULLET_LINES {
        return bullets
            .into_iter()
            .take(MAX_HIGHLIGHTS)
            .map(strip_bullet)
            .collect();
    }

    lines
        .into_iter()
        .take(MAX_HIGHLIGHTS)
        .map(str::to_string)
        .collect()
}

fn strip_bullet(line: &str) -> String {
    line.strip_prefix(BULLET_MARKERS)
        .unwrap_or(line)
        .trim_start()
        .to_string()
}
