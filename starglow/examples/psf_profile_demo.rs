use clap::Parser;
use plotters::prelude::*;
use starglow::psf::fullscreen::{fullscreen_psf, DEFAULT_MIN_THETA2};
use starglow::psf::{
    BoundedProfile, GlowProfile, OptimizedProfile, OriginalProfile, SimplifiedProfile,
};
use std::path::Path;

#[derive(Parser, Debug)]
#[command(about = "Plots photopic PSF approximations against the original profile")]
struct Args {
    /// Linear star brightness in Vegas
    #[arg(long, default_value_t = 100.0)]
    brightness: f64,

    /// Degrees per pixel used to derive the bounded ceiling
    #[arg(long, default_value_t = 0.05)]
    degrees_per_pixel: f64,

    /// Largest square the bounded PSF may occupy, pixels
    #[arg(long, default_value_t = 512)]
    max_square_size: usize,
}

/// One sampled profile ready for plotting
struct Curve {
    name: &'static str,
    color: RGBColor,
    values: Vec<f64>,
}

fn sample<P: GlowProfile>(profile: &P, thetas: &[f64]) -> Vec<f64> {
    thetas.iter().map(|&theta| profile.intensity(theta)).collect()
}

fn total_abs_error(reference: &[f64], values: &[f64]) -> f64 {
    reference
        .iter()
        .zip(values.iter())
        .map(|(r, v)| (r - v).abs())
        .sum()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    println!("Photopic PSF Profile Comparison");
    println!("===============================");
    println!();

    let ceiling = BoundedProfile::ceiling_for_square(args.max_square_size, args.degrees_per_pixel);
    let original = OriginalProfile::new();
    let optimized = OptimizedProfile::from_brightness(args.brightness);
    let simplified = SimplifiedProfile::from_brightness(args.brightness);
    // Center value 1 keeps the bounded curve on the same scale as the others
    let bounded = BoundedProfile::from_brightness(args.brightness, ceiling);

    println!("Parameters:");
    println!("  Brightness: {:.2} Vega", args.brightness);
    println!("  Degrees per pixel: {:.3}", args.degrees_per_pixel);
    println!("  Bounded ceiling: {:.1}", ceiling);
    println!();

    println!("Thresholds (degrees):");
    println!("  {:<12} {:>10} {:>10}", "Model", "min_theta", "max_theta");
    println!(
        "  {:<12} {:>10.4} {:>10.4}",
        "Optimized", optimized.min_theta, optimized.max_theta
    );
    println!(
        "  {:<12} {:>10.4} {:>10.4}",
        "Simplified", simplified.min_theta, simplified.max_theta
    );
    println!(
        "  {:<12} {:>10.4} {:>10.4}",
        "Bounded", bounded.min_theta, bounded.max_theta
    );
    println!();

    // Sample past the widest bounded profile so every cutoff is visible
    let theta_max = optimized
        .max_theta
        .max(simplified.max_theta)
        .max(bounded.max_theta)
        * 1.2;
    let num_points = 1000;
    let thetas: Vec<f64> = (0..num_points)
        .map(|i| theta_max * i as f64 / (num_points - 1) as f64)
        .collect();

    let reference = sample(&original, &thetas);
    let curves = vec![
        Curve {
            name: "Optimized",
            color: RED,
            values: sample(&optimized, &thetas),
        },
        Curve {
            name: "Simplified",
            color: GREEN,
            values: sample(&simplified, &thetas),
        },
        Curve {
            name: "Bounded",
            color: MAGENTA,
            values: sample(&bounded, &thetas),
        },
        Curve {
            name: "Full-screen",
            color: CYAN,
            values: thetas
                .iter()
                .map(|&theta| fullscreen_psf(theta * theta, DEFAULT_MIN_THETA2))
                .collect(),
        },
    ];

    println!("Total absolute error against the original PSF:");
    for curve in &curves {
        println!(
            "  {:<12} {:.4}",
            curve.name,
            total_abs_error(&reference, &curve.values)
        );
    }
    println!();

    // Create plots directory if it doesn't exist
    if !Path::new("plots").exists() {
        std::fs::create_dir("plots")?;
    }

    let plot_path = "plots/psf_profile_comparison.png";
    create_profile_plot(&thetas, &reference, &curves, theta_max, plot_path)?;

    println!("Plot saved to: {}", plot_path);

    Ok(())
}

/// Plot every profile over the original, and their differences below
fn create_profile_plot(
    thetas: &[f64],
    reference: &[f64],
    curves: &[Curve],
    theta_max: f64,
    save_path: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(save_path, (1600, 1200)).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.margin(20, 20, 20, 20);

    let (upper, lower) = root.split_vertically(600);

    let mut upper_chart = ChartBuilder::on(&upper)
        .caption(
            "Photopic PSF vs Approximations",
            ("sans-serif", 32).into_font().color(&BLACK),
        )
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(0.0..theta_max, 0.0..1.05)?;

    upper_chart
        .configure_mesh()
        .x_desc("Angle from star center (degrees)")
        .y_desc("Normalized Intensity")
        .axis_desc_style(("sans-serif", 20))
        .label_style(("sans-serif", 16))
        .draw()?;

    upper_chart
        .draw_series(LineSeries::new(
            thetas.iter().zip(reference.iter()).map(|(&t, &v)| (t, v)),
            BLUE,
        ))?
        .label("Original")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));

    for curve in curves {
        let color = curve.color;
        upper_chart
            .draw_series(LineSeries::new(
                thetas.iter().zip(curve.values.iter()).map(|(&t, &v)| (t, v)),
                color,
            ))?
            .label(curve.name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    upper_chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.9))
        .border_style(BLACK)
        .label_font(("sans-serif", 18))
        .draw()?;

    let differences: Vec<Vec<f64>> = curves
        .iter()
        .map(|curve| {
            curve
                .values
                .iter()
                .zip(reference.iter())
                .map(|(v, r)| v - r)
                .collect()
        })
        .collect();
    let error_max = differences
        .iter()
        .flatten()
        .map(|e| e.abs())
        .fold(0.0, f64::max);
    let error_range = error_max.max(1e-6) * 1.1;

    let mut lower_chart = ChartBuilder::on(&lower)
        .caption(
            "Difference from Original",
            ("sans-serif", 32).into_font().color(&BLACK),
        )
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(0.0..theta_max, -error_range..error_range)?;

    lower_chart
        .configure_mesh()
        .x_desc("Angle from star center (degrees)")
        .y_desc("Approximation - Original")
        .axis_desc_style(("sans-serif", 20))
        .label_style(("sans-serif", 16))
        .draw()?;

    for (curve, difference) in curves.iter().zip(differences.iter()) {
        let color = curve.color;
        lower_chart
            .draw_series(LineSeries::new(
                thetas.iter().zip(difference.iter()).map(|(&t, &e)| (t, e)),
                color,
            ))?
            .label(curve.name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    // Horizontal zero line
    lower_chart.draw_series(std::iter::once(PathElement::new(
        vec![(0.0, 0.0), (theta_max, 0.0)],
        BLACK,
    )))?;

    lower_chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.9))
        .border_style(BLACK)
        .label_font(("sans-serif", 18))
        .draw()?;

    root.present()?;

    Ok(())
}
