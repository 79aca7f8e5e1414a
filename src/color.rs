use palette::{IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Continuous colour scale
// ---------------------------------------------------------------------------

/// Stops of the CARTO "Mint" sequential scale, light to dark.
const MINT: [&str; 7] = [
    "#e4f1e1", "#b4d9cc", "#89c0b6", "#63a6a0", "#448c8a", "#287274", "#0d585f",
];

/// A sequential colour scale given as evenly spaced stops.
#[derive(Debug, Clone)]
pub struct ColorScale {
    stops: Vec<LinSrgb>,
}

impl ColorScale {
    /// The scale used to mark bicluster membership: light for rows outside
    /// the bicluster, dark for rows inside.
    pub fn mint() -> Self {
        Self::from_hex(&MINT).unwrap_or_else(|| ColorScale {
            stops: vec![LinSrgb::new(1.0, 1.0, 1.0), LinSrgb::new(0.0, 0.0, 0.0)],
        })
    }

    /// Build from `#rrggbb` strings. Returns `None` if any entry is invalid
    /// or fewer than two stops are given.
    pub fn from_hex(hex: &[&str]) -> Option<Self> {
        if hex.len() < 2 {
            return None;
        }
        let stops = hex
            .iter()
            .map(|h| {
                let rgb: Srgb<u8> = h.parse().ok()?;
                let linear: LinSrgb = rgb.into_format::<f32>().into_color();
                Some(linear)
            })
            .collect::<Option<Vec<_>>>()?;
        Some(ColorScale { stops })
    }

    /// Colour at position `t` in `[0, 1]`, interpolated in linear RGB.
    pub fn color_at(&self, t: f64) -> Srgb<u8> {
        let t = t.clamp(0.0, 1.0) as f32;
        let segments = (self.stops.len() - 1) as f32;
        let pos = t * segments;
        let lo = (pos.floor() as usize).min(self.stops.len() - 2);
        let frac = pos - lo as f32;
        let mixed = self.stops[lo].mix(self.stops[lo + 1], frac);
        let rgb: Srgb = mixed.into_color();
        rgb.into_format()
    }

    /// Plotly `colorscale` with `samples` evenly spaced stops
    /// (at least two): `[[0.0, "#rrggbb"], ..., [1.0, "#rrggbb"]]`.
    pub fn to_plotly(&self, samples: usize) -> Vec<(f64, String)> {
        let samples = samples.max(2);
        (0..samples)
            .map(|i| {
                let t = i as f64 / (samples - 1) as f64;
                let c = self.color_at(t);
                (t, format!("#{:02x}{:02x}{:02x}", c.red, c.green, c.blue))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_match_stops() {
        let scale = ColorScale::mint().to_plotly(2);
        assert_eq!(scale, vec![(0.0, "#e4f1e1".to_string()), (1.0, "#0d585f".to_string())]);
    }

    #[test]
    fn midpoint_is_between_neighbours() {
        let scale = ColorScale::from_hex(&["#000000", "#ffffff"]).unwrap();
        let mid = scale.color_at(0.5);
        assert!(mid.red > 0 && mid.red < 255);
        assert_eq!(mid.red, mid.green);
    }

    #[test]
    fn invalid_hex_is_rejected() {
        assert!(ColorScale::from_hex(&["#zzzzzz", "#000000"]).is_none());
        assert!(ColorScale::from_hex(&["#000000"]).is_none());
    }
}
