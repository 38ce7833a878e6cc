use crate::prelude::{Color, ColorSource};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Uniform random colors: three independent bytes packed as RGB.
pub struct RandomColors {
    rng: StdRng,
}

impl RandomColors {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomColors {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorSource for RandomColors {
    fn next_color(&mut self) -> Color {
        let r: u8 = self.rng.gen();
        let g: u8 = self.rng.gen();
        let b: u8 = self.rng.gen();
        Color::from_rgb(r, g, b)
    }
}

/// Deterministic source that cycles through a fixed list.
pub struct SequenceColors {
    colors: Vec<Color>,
    cursor: usize,
}

impl SequenceColors {
    /// An empty list falls back to black.
    pub fn new(colors: Vec<Color>) -> Self {
        Self { colors, cursor: 0 }
    }
}

impl ColorSource for SequenceColors {
    fn next_color(&mut self) -> Color {
        if self.colors.is_empty() {
            return Color::from_rgb(0, 0, 0);
        }
        let color = self.colors[self.cursor % self.colors.len()];
        self.cursor += 1;
        color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_colors_repeat() {
        let mut first = RandomColors::seeded(7);
        let mut second = RandomColors::seeded(7);
        for _ in 0..5 {
            assert_eq!(first.next_color(), second.next_color());
        }
    }

    #[test]
    fn sequence_cycles() {
        let red = Color::from_rgb(255, 0, 0);
        let green = Color::from_rgb(0, 255, 0);
        let mut source = SequenceColors::new(vec![red, green]);
        assert_eq!(source.next_color(), red);
        assert_eq!(source.next_color(), green);
        assert_eq!(source.next_color(), red);
    }
}
