use std::f64::consts::TAU;

/// One laid-out wedge.
#[derive(Clone, Debug, PartialEq)]
pub struct PieSlice {
    /// Position of the source value in the input.
    pub index: usize,
    /// Source value.
    pub value: f64,
    /// Start angle in radians, clockwise from twelve o'clock.
    pub start_angle: f64,
    /// End angle in radians.
    pub end_angle: f64,
    /// Padding applied between adjacent wedges.
    pub pad_angle: f64,
}

impl PieSlice {
    /// Angular span including padding.
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }
}

/// Pie layout that keeps input order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PieLayout {
    /// Angle of the first wedge.
    pub start_angle: f64,
    /// Angle after the last wedge.
    pub end_angle: f64,
    /// Requested padding between wedges.
    pub pad_angle: f64,
}

impl Default for PieLayout {
    fn default() -> Self {
        Self {
            start_angle: 0.0,
            end_angle: TAU,
            pad_angle: 0.0,
        }
    }
}

impl PieLayout {
    /// Replace the pad angle.
    pub fn with_pad_angle(mut self, pad_angle: f64) -> Self {
        self.pad_angle = pad_angle;
        self
    }

    /// Lay out `values` in input order.
    ///
    /// Each wedge's span is proportional to its value; non-positive and `NaN` values get a zero
    /// span plus padding. When every value is zero all wedges collapse onto the start angle.
    pub fn layout(&self, values: &[f64]) -> Vec<PieSlice> {
        let n = values.len();
        let da = (self.end_angle - self.start_angle).clamp(-TAU, TAU);
        let pad = if n == 0 {
            0.0
        } else {
            (da.abs() / n as f64).min(self.pad_angle)
        };
        let signed_pad = if da < 0.0 { -pad } else { pad };

        let sum: f64 = values.iter().copied().filter(|v| *v > 0.0).sum();
        let k = if sum > 0.0 {
            (da - n as f64 * signed_pad) / sum
        } else {
            0.0
        };

        let mut a0 = self.start_angle;
        values
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                let grow = if value > 0.0 { value * k } else { 0.0 };
                let a1 = a0 + grow + signed_pad;
                let slice = PieSlice {
                    index,
                    value,
                    start_angle: a0,
                    end_angle: a1,
                    pad_angle: pad,
                };
                a0 = a1;
                slice
            })
            .collect()
    }
}
