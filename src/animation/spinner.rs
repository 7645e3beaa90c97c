/// Braille dot spinner shown in the status bar while a step is running
const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Spinner character for the given render frame count
pub fn spinner_frame(frame_count: u64) -> char {
    let idx = (frame_count / 2) as usize % SPINNER_FRAMES.len();
    SPINNER_FRAMES[idx]
}

/// Arrow glyph for a traversal direction sign
pub fn direction_glyph(sign: i32) -> &'static str {
    if sign < 0 {
        "▲"
    } else {
        "▼"
    }
}
