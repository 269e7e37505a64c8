/// Braille pattern frames for the fetch-in-flight indicator.
pub const SPINNER_FRAMES: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Spinner shown in the status bar while the configuration fetch is
/// still in flight. The app advances the frame on every poll tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct Spinner {
    frame: usize,
}

impl Spinner {
    pub fn new() -> Self {
        Self { frame: 0 }
    }

    pub fn current_char(&self) -> char {
        SPINNER_FRAMES[self.frame % SPINNER_FRAMES.len()]
    }

    pub fn advance(&mut self) {
        self.frame = (self.frame + 1) % SPINNER_FRAMES.len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_advances_and_wraps() {
        let mut spinner = Spinner::new();
        assert_eq!(spinner.current_char(), SPINNER_FRAMES[0]);

        for _ in 0..SPINNER_FRAMES.len() {
            spinner.advance();
        }
        assert_eq!(spinner.current_char(), SPINNER_FRAMES[0]);

        spinner.advance();
        assert_eq!(spinner.current_char(), SPINNER_FRAMES[1]);
    }
}
