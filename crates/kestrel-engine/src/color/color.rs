/// Hue/saturation/value view of a [`Color`].
///
/// `hue` is in degrees `[0, 360)`; `saturation` and `value` are in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Hsv {
    pub hue: f32,
    pub saturation: f32,
    pub value: f32,
}

/// Hue/saturation/lightness view of a [`Color`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Hsl {
    pub hue: f32,
    pub saturation: f32,
    pub lightness: f32,
}

/// Straight-alpha RGBA color with `f32` channels clamped to `[0, 1]`.
///
/// The HSV/HSL views are derived on demand, never stored. Setting a derived
/// property (hue, saturation, value, lightness) round-trips through a full
/// conversion and overwrites all three RGB channels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Color {
    red: f32,
    green: f32,
    blue: f32,
    alpha: f32,
}

impl Color {
    /// Creates a color from `[0, 1]` channels. Out-of-range inputs clamp.
    pub fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red: clamp01(red),
            green: clamp01(green),
            blue: clamp01(blue),
            alpha: clamp01(alpha),
        }
    }

    /// Creates an opaque color from `[0, 1]` channels.
    pub fn opaque(red: f32, green: f32, blue: f32) -> Self {
        Self::new(red, green, blue, 1.0)
    }

    /// Creates a color from `0`–`255` byte channels.
    ///
    /// This is the explicit construction path for the byte-range caller
    /// convention; there is no wraparound arithmetic anywhere in this type.
    pub fn from_rgba8(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self::new(
            f32::from(red) / 255.0,
            f32::from(green) / 255.0,
            f32::from(blue) / 255.0,
            f32::from(alpha) / 255.0,
        )
    }

    /// Converts HSV coordinates to a color.
    ///
    /// `hue` is in degrees and wraps modulo 360 (negative hues wrap up into
    /// range); `saturation`, `value`, and `alpha` clamp to `[0, 1]`.
    pub fn from_hsv(hue: f32, saturation: f32, value: f32, alpha: f32) -> Self {
        let h = wrap_hue(hue);
        let s = clamp01(saturation);
        let v = clamp01(value);

        // Standard chroma/hue-sector decomposition, k = (n + h/60) mod 6.
        let f = |n: f32| {
            let k = (n + h / 60.0).rem_euclid(6.0);
            v - v * s * k.min(4.0 - k).min(1.0).max(0.0)
        };

        Self::new(f(5.0), f(3.0), f(1.0), clamp01(alpha))
    }

    /// Converts HSL coordinates to a color.
    ///
    /// Input domains are handled as in [`Color::from_hsv`].
    pub fn from_hsl(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Self {
        let h = wrap_hue(hue);
        let s = clamp01(saturation);
        let l = clamp01(lightness);

        let a = s * l.min(1.0 - l);
        let f = |n: f32| {
            let k = (n + h / 30.0).rem_euclid(12.0);
            l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0)
        };

        Self::new(f(0.0), f(8.0), f(4.0), clamp01(alpha))
    }

    pub fn red(&self) -> f32 {
        self.red
    }

    pub fn green(&self) -> f32 {
        self.green
    }

    pub fn blue(&self) -> f32 {
        self.blue
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Derives the HSV view using max/min/delta channel analysis.
    ///
    /// The degenerate gray case (`max == min`) yields hue 0.
    pub fn to_hsv(&self) -> Hsv {
        let max = self.red.max(self.green).max(self.blue);
        let min = self.red.min(self.green).min(self.blue);

        Hsv {
            hue: six_sector_hue(self.red, self.green, self.blue, max, min),
            saturation: if max > 0.0 { (max - min) / max } else { 0.0 },
            value: max,
        }
    }

    /// Derives the HSL view.
    pub fn to_hsl(&self) -> Hsl {
        let max = self.red.max(self.green).max(self.blue);
        let min = self.red.min(self.green).min(self.blue);
        let lightness = (max + min) / 2.0;

        let saturation = if max > 0.0 && min < 1.0 {
            (max - lightness) / lightness.min(1.0 - lightness)
        } else {
            0.0
        };

        Hsl {
            hue: six_sector_hue(self.red, self.green, self.blue, max, min),
            saturation,
            lightness,
        }
    }

    pub fn hue(&self) -> f32 {
        self.to_hsv().hue
    }

    pub fn saturation(&self) -> f32 {
        self.to_hsv().saturation
    }

    pub fn value(&self) -> f32 {
        self.to_hsv().value
    }

    pub fn lightness(&self) -> f32 {
        self.to_hsl().lightness
    }

    pub fn set_red(&mut self, red: f32) {
        self.red = clamp01(red);
    }

    pub fn set_green(&mut self, green: f32) {
        self.green = clamp01(green);
    }

    pub fn set_blue(&mut self, blue: f32) {
        self.blue = clamp01(blue);
    }

    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = clamp01(alpha);
    }

    /// Replaces the hue while keeping the derived saturation and value.
    ///
    /// Rewrites all three RGB channels; alpha is untouched.
    pub fn set_hue(&mut self, hue: f32) {
        let hsv = self.to_hsv();
        let c = Self::from_hsv(wrap_hue(hue), hsv.saturation, hsv.value, self.alpha);
        self.copy_rgb(c);
    }

    /// Replaces the HSV saturation, rewriting the RGB channels.
    pub fn set_saturation(&mut self, saturation: f32) {
        let hsv = self.to_hsv();
        let c = Self::from_hsv(hsv.hue, clamp01(saturation), hsv.value, self.alpha);
        self.copy_rgb(c);
    }

    /// Replaces the HSV value, rewriting the RGB channels.
    pub fn set_value(&mut self, value: f32) {
        let hsv = self.to_hsv();
        let c = Self::from_hsv(hsv.hue, hsv.saturation, clamp01(value), self.alpha);
        self.copy_rgb(c);
    }

    /// Replaces the HSL lightness, rewriting the RGB channels.
    pub fn set_lightness(&mut self, lightness: f32) {
        let hsl = self.to_hsl();
        let c = Self::from_hsl(hsl.hue, hsl.saturation, clamp01(lightness), self.alpha);
        self.copy_rgb(c);
    }

    /// Copies all four channels from another color.
    pub fn set_from_color(&mut self, other: Color) {
        *self = other;
    }

    /// Sets all four channels, clamping each.
    pub fn set_from_rgba(&mut self, red: f32, green: f32, blue: f32, alpha: f32) {
        self.set_red(red);
        self.set_green(green);
        self.set_blue(blue);
        self.set_alpha(alpha);
    }

    /// Sets the RGB channels from HSV coordinates, keeping the current alpha.
    pub fn set_from_hsv(&mut self, hsv: Hsv) {
        let c = Self::from_hsv(hsv.hue, hsv.saturation, hsv.value, self.alpha);
        self.copy_rgb(c);
    }

    /// Sets the RGB channels from HSL coordinates, keeping the current alpha.
    pub fn set_from_hsl(&mut self, hsl: Hsl) {
        let c = Self::from_hsl(hsl.hue, hsl.saturation, hsl.lightness, self.alpha);
        self.copy_rgb(c);
    }

    /// Converts to the f64 color used by render-pass clear operations.
    pub fn to_wgpu(self) -> wgpu::Color {
        wgpu::Color {
            r: f64::from(self.red),
            g: f64::from(self.green),
            b: f64::from(self.blue),
            a: f64::from(self.alpha),
        }
    }

    fn copy_rgb(&mut self, other: Color) {
        self.red = other.red;
        self.green = other.green;
        self.blue = other.blue;
    }
}

impl Default for Color {
    /// Opaque black.
    fn default() -> Self {
        Self::opaque(0.0, 0.0, 0.0)
    }
}

fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

fn wrap_hue(hue: f32) -> f32 {
    hue.rem_euclid(360.0)
}

/// Six-sector hue formula shared by the HSV and HSL derivations.
fn six_sector_hue(r: f32, g: f32, b: f32, max: f32, min: f32) -> f32 {
    let delta = max - min;
    if delta <= 0.0 {
        return 0.0;
    }

    let hue = if max == r {
        60.0 * ((g - b) / delta)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    if hue < 0.0 { hue + 360.0 } else { hue }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < EPS, "expected {b}, got {a}");
    }

    // ── channel clamping ──────────────────────────────────────────────────

    #[test]
    fn constructor_clamps_channels() {
        let c = Color::new(-0.5, 1.5, 0.25, 2.0);
        assert_eq!(c.red(), 0.0);
        assert_eq!(c.green(), 1.0);
        assert_eq!(c.blue(), 0.25);
        assert_eq!(c.alpha(), 1.0);
    }

    #[test]
    fn set_red_clamps_low() {
        let mut c = Color::opaque(0.5, 0.5, 0.5);
        c.set_red(-0.5);
        assert_eq!(c.red(), 0.0);
    }

    #[test]
    fn set_red_clamps_high() {
        let mut c = Color::opaque(0.5, 0.5, 0.5);
        c.set_red(1.5);
        assert_eq!(c.red(), 1.0);
    }

    #[test]
    fn from_rgba8_maps_bytes_to_unit_range() {
        let c = Color::from_rgba8(255, 0, 51, 255);
        assert_close(c.red(), 1.0);
        assert_close(c.green(), 0.0);
        assert_close(c.blue(), 0.2);
        assert_close(c.alpha(), 1.0);
    }

    // ── HSV round trips ───────────────────────────────────────────────────

    #[test]
    fn hsv_primaries() {
        let red = Color::from_hsv(0.0, 1.0, 1.0, 1.0);
        assert_close(red.red(), 1.0);
        assert_close(red.green(), 0.0);
        assert_close(red.blue(), 0.0);

        let green = Color::from_hsv(120.0, 1.0, 1.0, 1.0);
        assert_close(green.green(), 1.0);
        assert_close(green.red(), 0.0);

        let blue = Color::from_hsv(240.0, 1.0, 1.0, 1.0);
        assert_close(blue.blue(), 1.0);
    }

    #[test]
    fn hsv_round_trip_recovers_hue() {
        for hue in [0.0_f32, 30.0, 75.0, 120.0, 200.0, 260.0, 300.0, 345.0] {
            let c = Color::from_hsv(hue, 0.8, 0.6, 1.0);
            let hsv = c.to_hsv();
            assert_close(hsv.hue, hue);
            assert_close(hsv.saturation, 0.8);
            assert_close(hsv.value, 0.6);
        }
    }

    #[test]
    fn negative_hue_wraps_up() {
        let a = Color::from_hsv(-60.0, 1.0, 1.0, 1.0);
        let b = Color::from_hsv(300.0, 1.0, 1.0, 1.0);
        assert_eq!(a, b);
    }

    #[test]
    fn hue_wraps_past_full_turn() {
        let c = Color::from_hsv(480.0, 1.0, 1.0, 1.0);
        assert_close(c.to_hsv().hue, 120.0);
    }

    #[test]
    fn gray_has_hue_zero() {
        let c = Color::opaque(0.4, 0.4, 0.4);
        assert_eq!(c.to_hsv().hue, 0.0);
        assert_eq!(c.to_hsv().saturation, 0.0);
        assert_close(c.to_hsv().value, 0.4);
    }

    #[test]
    fn black_has_zero_saturation() {
        let hsv = Color::default().to_hsv();
        assert_eq!(hsv.saturation, 0.0);
        assert_eq!(hsv.value, 0.0);
    }

    // ── HSL round trips ───────────────────────────────────────────────────

    #[test]
    fn hsl_round_trip_recovers_coordinates() {
        for hue in [15.0_f32, 90.0, 180.0, 270.0] {
            let c = Color::from_hsl(hue, 0.5, 0.4, 1.0);
            let hsl = c.to_hsl();
            assert_close(hsl.hue, hue);
            assert_close(hsl.saturation, 0.5);
            assert_close(hsl.lightness, 0.4);
        }
    }

    #[test]
    fn hsl_mid_lightness_full_saturation_is_pure_hue() {
        let c = Color::from_hsl(120.0, 1.0, 0.5, 1.0);
        assert_close(c.green(), 1.0);
        assert_close(c.red(), 0.0);
        assert_close(c.blue(), 0.0);
    }

    #[test]
    fn hsl_white_and_black_have_zero_saturation() {
        assert_eq!(Color::opaque(1.0, 1.0, 1.0).to_hsl().saturation, 0.0);
        assert_eq!(Color::opaque(0.0, 0.0, 0.0).to_hsl().saturation, 0.0);
    }

    // ── derived-property setters ──────────────────────────────────────────

    #[test]
    fn set_hue_preserves_saturation_and_value() {
        let mut c = Color::from_hsv(40.0, 0.7, 0.9, 1.0);
        c.set_hue(200.0);
        let hsv = c.to_hsv();
        assert_close(hsv.hue, 200.0);
        assert_close(hsv.saturation, 0.7);
        assert_close(hsv.value, 0.9);
    }

    #[test]
    fn set_hue_wraps_modulo_360() {
        let mut c = Color::from_hsv(10.0, 0.5, 0.5, 1.0);
        c.set_hue(380.0);
        assert_close(c.to_hsv().hue, 20.0);
    }

    #[test]
    fn set_hue_keeps_alpha() {
        let mut c = Color::from_hsv(10.0, 0.5, 0.5, 0.25);
        c.set_hue(90.0);
        assert_close(c.alpha(), 0.25);
    }

    #[test]
    fn set_saturation_rewrites_rgb() {
        let mut c = Color::from_hsv(120.0, 1.0, 1.0, 1.0);
        c.set_saturation(0.0);
        // Fully desaturated: all channels collapse to the value.
        assert_close(c.red(), 1.0);
        assert_close(c.green(), 1.0);
        assert_close(c.blue(), 1.0);
    }

    #[test]
    fn set_value_scales_brightness() {
        let mut c = Color::from_hsv(240.0, 1.0, 1.0, 1.0);
        c.set_value(0.5);
        let hsv = c.to_hsv();
        assert_close(hsv.value, 0.5);
        assert_close(hsv.hue, 240.0);
    }

    #[test]
    fn set_lightness_round_trips_through_hsl() {
        let mut c = Color::from_hsl(300.0, 0.6, 0.3, 1.0);
        c.set_lightness(0.7);
        let hsl = c.to_hsl();
        assert_close(hsl.lightness, 0.7);
        assert_close(hsl.hue, 300.0);
        assert_close(hsl.saturation, 0.6);
    }

    // ── bulk setters ──────────────────────────────────────────────────────

    #[test]
    fn set_from_rgba_clamps_each_channel() {
        let mut c = Color::default();
        c.set_from_rgba(2.0, -1.0, 0.5, 0.5);
        assert_eq!(c.red(), 1.0);
        assert_eq!(c.green(), 0.0);
        assert_eq!(c.blue(), 0.5);
        assert_eq!(c.alpha(), 0.5);
    }

    #[test]
    fn set_from_hsv_keeps_current_alpha() {
        let mut c = Color::new(0.0, 0.0, 0.0, 0.5);
        c.set_from_hsv(Hsv { hue: 120.0, saturation: 1.0, value: 1.0 });
        assert_close(c.green(), 1.0);
        assert_close(c.alpha(), 0.5);
    }

    #[test]
    fn to_wgpu_widens_channels() {
        let c = Color::new(0.1, 0.2, 0.3, 1.0);
        let w = c.to_wgpu();
        assert!((w.r - 0.1).abs() < 1e-6);
        assert!((w.g - 0.2).abs() < 1e-6);
        assert!((w.b - 0.3).abs() < 1e-6);
        assert_eq!(w.a, 1.0);
    }
}
