use argh::FromArgs;
use std::path::PathBuf;

use twopoint::calib::{
    self, AxisAssignment, CalibrationInput, Corner, ImageSize, ScriptParams, SignedAxis,
};
use twopoint::linalg::Axis;

#[derive(FromArgs)]
/// Recover focal length and camera pose from two corners in an image
struct Args {
    /// path to a JSON calibration input; replaces the corner and axis options
    #[argh(option)]
    config: Option<PathBuf>,

    /// first corner as `u,v,du1,dv1,du2,dv2` in UV units, edges relative to
    /// the anchor; with `--image-size`, `x,y,x1,y1,x2,y2` absolute pixels
    #[argh(option, from_str_fn(parse_corner))]
    corner_a: Option<[f64; 6]>,

    /// second corner, same layout as `--corner-a`
    #[argh(option, from_str_fn(parse_corner))]
    corner_b: Option<[f64; 6]>,

    /// image size as `width,height`; corners are then read in pixels
    #[argh(option, from_str_fn(parse_image_size))]
    image_size: Option<ImageSize>,

    /// world axis of the first vanishing point, e.g. `+x`
    #[argh(option, default = "SignedAxis::positive(Axis::X)")]
    axis1: SignedAxis,

    /// world axis of the second vanishing point, e.g. `-z`
    #[argh(option, default = "SignedAxis::positive(Axis::Y)")]
    axis2: SignedAxis,

    /// longer side of the sensor, in mm
    #[argh(option, default = "36.0")]
    sensor_length: f64,

    /// distance from the camera to the origin point, in world units
    #[argh(option)]
    distance: Option<f64>,

    /// camera object name used in the pose script
    #[argh(option, default = "String::from(\"camera\")")]
    object: String,

    /// digits after the decimal point in the pose script
    #[argh(option, default = "6")]
    precision: usize,
}

fn parse_numbers<const N: usize>(value: &str) -> Result<[f64; N], String> {
    let nums = value
        .split(',')
        .map(|s| s.trim().parse::<f64>().map_err(|e| format!("'{s}': {e}")))
        .collect::<Result<Vec<_>, _>>()?;
    let len = nums.len();
    nums.try_into()
        .map_err(|_| format!("expected {N} comma separated numbers, got {len}"))
}

fn parse_corner(value: &str) -> Result<[f64; 6], String> {
    parse_numbers::<6>(value)
}

fn parse_image_size(value: &str) -> Result<ImageSize, String> {
    let [width, height] = parse_numbers::<2>(value)?;
    if width <= 0.0 || height <= 0.0 {
        return Err(format!("image size must be positive, got {width}x{height}"));
    }
    Ok(ImageSize::new(width, height))
}

fn build_corner(v: [f64; 6], image_size: Option<&ImageSize>) -> Corner {
    let [a0, a1, b0, b1, c0, c1] = v;
    match image_size {
        Some(size) => Corner::from_pixels(size, [a0, a1], [b0, b1], [c0, c1]),
        None => Corner::new([a0, a1], [b0, b1], [c0, c1]),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let mut input = match (&args.config, args.corner_a, args.corner_b) {
        (Some(path), _, _) => {
            let text = std::fs::read_to_string(path)?;
            serde_json::from_str::<CalibrationInput>(&text)?
        }
        (None, Some(a), Some(b)) => CalibrationInput::new(
            [
                build_corner(a, args.image_size.as_ref()),
                build_corner(b, args.image_size.as_ref()),
            ],
            AxisAssignment::new(args.axis1, args.axis2),
            args.sensor_length,
        ),
        _ => return Err("either --config or both --corner-a and --corner-b are required".into()),
    };
    if let Some(distance) = args.distance {
        input.origin_distance = Some(distance);
    }

    log::info!("calibrating with {:?}", input);
    let result = calib::calibrate(&input)?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    if let Some(focal) = &result.focal {
        log::info!(
            "focal length {:.3} mm, field of view {:.2} deg",
            focal.focal_length,
            focal.field_of_view_degrees()
        );
    }

    let params = ScriptParams {
        object: args.object,
        precision: args.precision,
    };
    match calib::pose_script(&result, &params) {
        Ok(script) => println!("{script}"),
        Err(e) => log::warn!("no pose script: {e}"),
    }

    Ok(())
}
