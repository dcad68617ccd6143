use approx::assert_relative_eq;
use twopoint_calib::{
    calibrate, pose_script, AxisAssignment, CalibError, CalibrationInput, Corner, EulerAngles,
    ImageSize, ScriptParams, Sign, SignedAxis,
};
use twopoint_linalg::{vector, Axis, Matrix};

fn fixture_corners() -> [Corner; 2] {
    [
        Corner::new([-0.30, 0.07], [0.04, 0.24], [-0.08, -0.10]),
        Corner::new([0.36, 0.21], [0.17, 0.27], [0.11, -0.02]),
    ]
}

#[test]
fn fixture_full_calibration() -> Result<(), CalibError> {
    let input = CalibrationInput::new(fixture_corners(), AxisAssignment::default(), 36.0)
        .with_origin_distance(10.0);
    let result = calibrate(&input)?;
    assert!(result.withheld.is_empty());

    let [v0, v1] = result.vanishing_points;
    assert_relative_eq!(v0[0], -0.505_866_666_7, epsilon = 1e-9);
    assert_relative_eq!(v0[1], -1.165_2, epsilon = 1e-9);
    assert_relative_eq!(v1[0], -0.118_412_698_4, epsilon = 1e-9);
    assert_relative_eq!(v1[1], 0.296_984_127_0, epsilon = 1e-9);

    let focal = result.focal.ok_or(CalibError::MissingPose)?;
    assert_relative_eq!(focal.focal_length, 9.628_651_886, epsilon = 1e-6);
    assert_relative_eq!(focal.field_of_view, 2.159_201_103, epsilon = 1e-6);

    let pose = result.pose.ok_or(CalibError::MissingPose)?;
    let expected = Matrix::from_rows(&[
        [-0.367_019_656, -0.845_383_440, -0.388_102_322],
        [-0.190_010_532, 0.476_554_564, -0.858_365_741],
        [0.910_600_115, -0.241_293_570, -0.335_536_649],
    ])?;
    assert!(pose.camera_rotation.squared_distance(&expected)? < 1e-14);
    assert!(pose.world_transform.squared_distance(&expected.transpose())? < 1e-14);
    assert_relative_eq!(pose.camera_rotation.determinant()?, 1.0, epsilon = 1e-9);

    // any Euler branch is fine as long as it rebuilds the rotation
    let rebuilt = pose.euler.to_matrix()?;
    assert!(rebuilt.squared_distance(&pose.camera_rotation)? < 1e-18);

    let location = pose.location.ok_or(CalibError::MissingDistance)?;
    assert_relative_eq!(location[0], -4.188_233_008, epsilon = 1e-6);
    assert_relative_eq!(location[1], -8.902_215_492, epsilon = 1e-6);
    assert_relative_eq!(location[2], 1.791_441_765, epsilon = 1e-6);
    assert_relative_eq!(vector::norm(&location), 10.0, epsilon = 1e-9);
    Ok(())
}

#[test]
fn fixture_pose_script() -> Result<(), CalibError> {
    let input = CalibrationInput::new(fixture_corners(), AxisAssignment::default(), 36.0)
        .with_origin_distance(10.0);
    let result = calibrate(&input)?;
    let script = pose_script(&result, &ScriptParams::default())?;

    let lines: Vec<&str> = script.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("camera.matrix_world = (("));
    assert!(lines[0].ends_with(", (0, 0, 0, 1))"));
    assert!(lines[0].contains("-4.188233)"));
    assert_eq!(lines[1], "camera.lens = 9.628652");
    Ok(())
}

/// Point `target` seen from `anchor`, a fraction of the way towards it.
fn toward(anchor: [f64; 2], target: [f64; 2], frac: f64) -> [f64; 2] {
    [
        anchor[0] + frac * (target[0] - anchor[0]),
        anchor[1] + frac * (target[1] - anchor[1]),
    ]
}

/// Project a camera-space point onto the image plane at `depth`.
fn project(p: &[f64], depth: f64) -> [f64; 2] {
    [p[0] * depth / -p[2], p[1] * depth / -p[2]]
}

#[test]
fn synthetic_camera_recovered() -> Result<(), CalibError> {
    let sensor = 36.0;
    let focal_length = 30.0;
    let depth = 2.0 * focal_length / sensor;

    // rows are world axes in camera coordinates
    let camera_rotation = EulerAngles::new(1.1, 0.25, 0.6).to_matrix()?;
    let camera_position = [4.0, -6.0, 3.0];

    // use whichever direction of x and y lies in front of the camera
    let mut vps = [[0.0; 2]; 2];
    let mut labels = [SignedAxis::positive(Axis::X); 2];
    for (k, axis) in [Axis::X, Axis::Y].into_iter().enumerate() {
        let row = camera_rotation.row(axis.index());
        let (dir, label) = if row[2] < 0.0 {
            (row.to_vec(), SignedAxis::positive(axis))
        } else {
            (vector::scale(row, -1.0), SignedAxis::negative(axis))
        };
        vps[k] = project(&dir, depth);
        labels[k] = label;
    }
    assert_eq!(labels[0].sign, Sign::Negative);

    // world origin in camera space
    let origin_cam = camera_rotation
        .transpose()
        .mul_vec(&vector::scale(&camera_position, -1.0))?;
    let origin = project(&origin_cam, depth);

    let a_anchor = origin;
    let b_anchor = [origin[0] + 0.4, origin[1] - 0.3];
    let corners = [
        Corner::from_absolute(
            a_anchor,
            toward(a_anchor, vps[0], 0.1),
            toward(a_anchor, vps[1], 0.2),
        ),
        Corner::from_absolute(
            b_anchor,
            toward(b_anchor, vps[0], 0.15),
            toward(b_anchor, vps[1], 0.1),
        ),
    ];

    let input = CalibrationInput::new(corners, AxisAssignment::new(labels[0], labels[1]), sensor)
        .with_origin(origin)
        .with_origin_distance(vector::norm(&camera_position));
    let result = calibrate(&input)?;
    assert!(result.withheld.is_empty());

    let focal = result.focal.ok_or(CalibError::MissingPose)?;
    assert_relative_eq!(focal.focal_length, focal_length, epsilon = 1e-8);

    let pose = result.pose.ok_or(CalibError::MissingPose)?;
    assert!(pose.camera_rotation.squared_distance(&camera_rotation)? < 1e-16);

    let location = pose.location.ok_or(CalibError::MissingDistance)?;
    for k in 0..3 {
        assert_relative_eq!(location[k], camera_position[k], epsilon = 1e-7);
    }
    Ok(())
}

#[test]
fn parallel_edges_are_singular() {
    let corners = [
        Corner::new([-0.5, 0.0], [0.25, 0.25], [0.25, -0.25]),
        Corner::new([0.5, 0.0], [0.5, 0.5], [-0.25, -0.25]),
    ];
    let input = CalibrationInput::new(corners, AxisAssignment::default(), 36.0);
    assert_eq!(
        calibrate(&input),
        Err(CalibError::SingularGeometry { family: 0 })
    );
}

#[test]
fn swapped_edges_have_no_real_focal_length() -> Result<(), CalibError> {
    let mut corners = fixture_corners();
    let b = corners[1];
    corners[1] = Corner::new(b.anchor, b.point2, b.point1);

    let input = CalibrationInput::new(corners, AxisAssignment::default(), 36.0)
        .with_origin_distance(10.0);
    let result = calibrate(&input)?;
    assert!(result.focal.is_none());
    assert!(result.pose.is_none());
    assert_eq!(result.withheld.len(), 1);
    assert!(matches!(
        result.withheld[0],
        CalibError::NoRealFocalLength { radicand } if radicand < 0.0
    ));
    Ok(())
}

#[test]
fn same_axis_withholds_pose() -> Result<(), CalibError> {
    let axes = AxisAssignment::new("+z".parse()?, "-z".parse()?);
    let input = CalibrationInput::new(fixture_corners(), axes, 36.0).with_origin_distance(10.0);
    let result = calibrate(&input)?;
    assert!(result.focal.is_some());
    assert!(result.pose.is_none());
    assert_eq!(
        result.withheld,
        vec![CalibError::AmbiguousAxisAssignment { axis: Axis::Z }]
    );
    assert_eq!(
        pose_script(&result, &ScriptParams::default()),
        Err(CalibError::MissingPose)
    );
    Ok(())
}

#[test]
fn missing_distance_keeps_rotation() -> Result<(), CalibError> {
    let input = CalibrationInput::new(fixture_corners(), AxisAssignment::default(), 36.0);
    let result = calibrate(&input)?;
    assert_eq!(result.withheld, vec![CalibError::MissingDistance]);
    let pose = result.pose.as_ref().ok_or(CalibError::MissingPose)?;
    assert!(pose.location.is_none());
    assert_eq!(
        pose_script(&result, &ScriptParams::default()),
        Err(CalibError::MissingDistance)
    );
    Ok(())
}

#[test]
fn input_and_result_json() -> Result<(), Box<dyn std::error::Error>> {
    let json = r#"{
        "corners": [
            {"anchor": [-0.30, 0.07], "point1": [0.04, 0.24], "point2": [-0.08, -0.10]},
            {"anchor": [0.36, 0.21], "point1": [0.17, 0.27], "point2": [0.11, -0.02]}
        ],
        "axes": {"first": "+x", "second": "+y"},
        "sensor_length": 36.0,
        "origin_distance": 10.0
    }"#;
    let input: CalibrationInput = serde_json::from_str(json)?;
    let result = calibrate(&input)?;

    let value = serde_json::to_value(&result)?;
    assert_eq!(value["withheld"], serde_json::json!([]));
    assert_eq!(value["pose"]["camera_rotation"].as_array().map(Vec::len), Some(3));
    assert!(value["focal"]["focal_length"].is_f64());
    Ok(())
}

#[test]
fn pixel_corners_match_uv_corners() -> Result<(), CalibError> {
    let size = ImageSize::new(800.0, 600.0);
    let uv = fixture_corners();
    let pixel = uv.map(|c| {
        Corner::from_pixels(
            &size,
            size.uv_to_pixel(c.anchor),
            size.uv_to_pixel(c.endpoint(0)),
            size.uv_to_pixel(c.endpoint(1)),
        )
    });
    // anchor (-0.30, 0.07) sits at pixel (280, 272)
    assert_relative_eq!(size.uv_to_pixel(uv[0].anchor)[0], 280.0, epsilon = 1e-9);
    assert_relative_eq!(size.uv_to_pixel(uv[0].anchor)[1], 272.0, epsilon = 1e-9);

    let input = CalibrationInput::new(pixel, AxisAssignment::default(), 36.0)
        .with_origin_distance(10.0);
    let result = calibrate(&input)?;
    assert!(result.withheld.is_empty());
    let focal = result.focal.ok_or(CalibError::MissingPose)?;
    assert_relative_eq!(focal.focal_length, 9.628_651_886, epsilon = 1e-6);
    Ok(())
}
