//! Bullet extraction from raw completion text.

/// Leading character that marks a line as a bullet point.
pub const BULLET_MARKER: char = '-';

/// Upper bound on bullets returned for one request.
pub const MAX_BULLETS: usize = 3;

/// Keeps trimmed lines that start with the bullet marker, in emission order,
/// capped at `MAX_BULLETS`. The marker itself is retained.
pub fn extract_bullets(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| line.starts_with(BULLET_MARKER))
        .take(MAX_BULLETS)
        .map(str::to_string)
        .collect()
}
