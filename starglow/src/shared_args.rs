use crate::photometry::color::{LinearRgb, VEGA_COLOR};
use crate::psf::bounded::DEFAULT_MAX_SQUARE_SIZE;
use crate::psf::BoundedProfile;
use clap::Parser;

/// Parse color string in format "r,g,b"
fn parse_color(s: &str) -> Result<LinearRgb, String> {
    s.parse::<LinearRgb>()
        .map_err(|e| format!("Invalid star color: {}", e))
}

/// Parse a strictly positive angular scale
fn parse_degrees_per_pixel(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid numeric value: {}", s))?;

    if !(value.is_finite() && value > 0.0) {
        return Err("Degrees per pixel must be positive".to_string());
    }

    Ok(value)
}

/// Default star color string, Vega in linear light
const DEFAULT_STAR_COLOR: &str = "0.417,0.612,1.0";

/// Common arguments shared across rendering binaries
#[derive(Parser, Debug, Clone)]
pub struct SharedRenderArgs {
    /// Angular size of one render pixel in degrees.
    /// Lower values are less realistic in the central brightness peak
    #[arg(long, default_value_t = 0.05, value_parser = parse_degrees_per_pixel)]
    pub degrees_per_pixel: f64,

    /// Exposure multiplier. At 1 a Vega-bright star barely fills one pixel,
    /// at 5 the same holds for a star five times dimmer
    #[arg(long, default_value_t = 1.0)]
    pub exposure: f64,

    /// Linear star color (format: "r,g,b")
    #[arg(long, default_value = DEFAULT_STAR_COLOR, value_parser = parse_color)]
    pub star_color: LinearRgb,

    /// Largest square in render pixels the bounded PSF may occupy
    #[arg(long, default_value_t = DEFAULT_MAX_SQUARE_SIZE)]
    pub max_square_size: usize,
}

impl SharedRenderArgs {
    /// Soft-clip ceiling for the bounded PSF
    pub fn max_brightness(&self) -> f64 {
        BoundedProfile::ceiling_for_square(self.max_square_size, self.degrees_per_pixel)
    }
}

impl Default for SharedRenderArgs {
    fn default() -> Self {
        Self {
            degrees_per_pixel: 0.05,
            exposure: 1.0,
            star_color: VEGA_COLOR,
            max_square_size: DEFAULT_MAX_SQUARE_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        shared: SharedRenderArgs,
    }

    #[test]
    fn test_default_color_matches_vega() {
        let parsed =
            parse_color(DEFAULT_STAR_COLOR).expect("Default color string should be valid");
        assert_eq!(parsed, VEGA_COLOR, "Default color should be Vega");
    }

    #[test]
    fn test_defaults_from_empty_command_line() {
        let cli = TestCli::try_parse_from(["test"]).unwrap();
        let defaults = SharedRenderArgs::default();
        assert_eq!(cli.shared.degrees_per_pixel, defaults.degrees_per_pixel);
        assert_eq!(cli.shared.exposure, defaults.exposure);
        assert_eq!(cli.shared.star_color, defaults.star_color);
        assert_eq!(cli.shared.max_square_size, 512);
    }

    #[test]
    fn test_parse_overrides() {
        let cli = TestCli::try_parse_from([
            "test",
            "--degrees-per-pixel",
            "0.1",
            "--star-color",
            "1.0, 0.5, 0.25",
            "--max-square-size",
            "256",
        ])
        .unwrap();
        assert_eq!(cli.shared.degrees_per_pixel, 0.1);
        assert_eq!(cli.shared.star_color.b(), 0.25);
        assert_eq!(cli.shared.max_square_size, 256);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(parse_degrees_per_pixel("0").is_err());
        assert!(parse_degrees_per_pixel("-0.05").is_err());
        assert!(parse_degrees_per_pixel("abc").is_err());
        assert!(parse_color("1,2").is_err());
        assert!(parse_color("0,0,0").is_err());
        assert!(TestCli::try_parse_from(["test", "--star-color", "red"]).is_err());
    }

    #[test]
    fn test_max_brightness_fills_square() {
        let args = SharedRenderArgs::default();
        let saturated = BoundedProfile::saturated_brightness(args.max_brightness());
        let radius_px = 0.123 * saturated.sqrt() / args.degrees_per_pixel;
        assert!((radius_px - 256.0).abs() < 1e-9);
    }
}
