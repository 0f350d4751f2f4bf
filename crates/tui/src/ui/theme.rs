use engine::{BadgeTone, Tone};
use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub text: Color,
    pub dim: Color,
    pub border: Color,
    pub accent: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub info: Color,
    pub attention: Color,
    pub emerald: Color,
    pub indigo: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            text: Color::Rgb(220, 220, 220),
            dim: Color::Rgb(140, 140, 140),
            border: Color::Rgb(60, 70, 80),
            accent: Color::Rgb(80, 160, 160),
            positive: Color::Rgb(80, 200, 120),
            negative: Color::Rgb(220, 90, 90),
            warning: Color::Rgb(220, 170, 60),
            info: Color::Rgb(90, 150, 220),
            attention: Color::Rgb(230, 140, 60),
            emerald: Color::Rgb(60, 190, 150),
            indigo: Color::Rgb(140, 120, 230),
            error: Color::Rgb(200, 80, 80),
        }
    }
}

impl Theme {
    pub fn tone_color(&self, tone: Tone) -> Color {
        match tone {
            Tone::Positive => self.positive,
            Tone::Negative => self.negative,
            Tone::Warning => self.warning,
            Tone::Accent => self.accent,
            Tone::Info => self.info,
            Tone::Attention => self.attention,
            Tone::Emerald => self.emerald,
            Tone::Indigo => self.indigo,
            Tone::Neutral => self.text,
        }
    }

    pub fn badge_color(&self, tone: BadgeTone) -> Color {
        match tone {
            BadgeTone::Positive => self.positive,
            BadgeTone::Outline => self.dim,
            BadgeTone::Info => self.info,
            BadgeTone::Negative => self.negative,
        }
    }
}
