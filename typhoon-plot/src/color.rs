use plotters::style::RGBColor;

///
/// Linear white-to-blue gradient: white at 0, pure blue at the saturation
/// ceiling and above.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScale {
    ceiling: u32,
}

impl ColorScale {
    pub const LOW: RGBColor = RGBColor(255, 255, 255);
    pub const HIGH: RGBColor = RGBColor(0, 0, 255);

    pub fn new(ceiling: u32) -> Self {
        ColorScale {
            ceiling: ceiling.max(1),
        }
    }

    pub fn ceiling(&self) -> u32 {
        self.ceiling
    }

    pub fn color(&self, value: u32) -> RGBColor {
        let t = value.min(self.ceiling) as f64 / self.ceiling as f64;
        let channel = |low: u8, high: u8| -> u8 {
            (low as f64 + (high as f64 - low as f64) * t).round() as u8
        };

        RGBColor(
            channel(Self::LOW.0, Self::HIGH.0),
            channel(Self::LOW.1, Self::HIGH.1),
            channel(Self::LOW.2, Self::HIGH.2),
        )
    }
}
