//! 15-bit colour helpers for the map and preview palettes.

/// Packed `0bbbbbgggggrrrrr` colour.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Rgb555(pub u16);

impl Rgb555 {
    pub const BLACK: Self = Self(0);
    pub const WHITE: Self = Self::new(31, 31, 31);

    pub const fn new(r: u16, g: u16, b: u16) -> Self {
        Self((r & 0x1F) | ((g & 0x1F) << 5) | ((b & 0x1F) << 10))
    }

    pub const fn r(self) -> u16 {
        self.0 & 0x1F
    }

    pub const fn g(self) -> u16 {
        (self.0 >> 5) & 0x1F
    }

    pub const fn b(self) -> u16 {
        (self.0 >> 10) & 0x1F
    }
}

/// Per-channel multiplier in 8.8 fixed point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tone {
    pub red: u16,
    pub green: u16,
    pub blue: u16,
}

impl Tone {
    /// Warm sepia the preview image starts from.
    pub const PREVIEW_START: Self = Self::new(0x133, 0x100, 0xF0);
    /// Amount removed from each channel per darkening tick.
    pub const PREVIEW_STEP: Self = Self::new(6, 5, 5);

    pub const fn new(red: u16, green: u16, blue: u16) -> Self {
        Self { red, green, blue }
    }

    pub fn darkened(self, step: Tone) -> Self {
        Self {
            red: self.red.saturating_sub(step.red),
            green: self.green.saturating_sub(step.green),
            blue: self.blue.saturating_sub(step.blue),
        }
    }
}

/// Scales every channel to `percent` of its value.
pub fn darken(colors: &mut [Rgb555], percent: u16) {
    let percent = u32::from(percent);
    for color in colors.iter_mut() {
        let scale = |c: u16| ((((u32::from(c) << 8) / 100) * percent) >> 8) as u16;
        *color = Rgb555::new(scale(color.r()), scale(color.g()), scale(color.b()));
    }
}

/// Greyscales the colours and re-tints them with `tone`.
pub fn tinted(colors: &[Rgb555], tone: Tone) -> Vec<Rgb555> {
    colors
        .iter()
        .map(|color| {
            let luma = (u32::from(color.r()) * 76
                + u32::from(color.g()) * 151
                + u32::from(color.b()) * 29)
                >> 8;
            let channel = |t: u16| ((u32::from(t) * luma) >> 8).min(31) as u16;
            Rgb555::new(channel(tone.red), channel(tone.green), channel(tone.blue))
        })
        .collect()
}
