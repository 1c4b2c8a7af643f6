use image::{Rgb, RgbImage, Rgba, RgbaImage};
use image_stack_pre_processing::{
    ConversionError, ConversionSettings, DepthDirection, ImageStackConverter, convert,
};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn save_slice(dir: &Path, name: &str, width: u32, height: u32, pixel: [u8; 4]) {
    RgbaImage::from_pixel(width, height, Rgba(pixel))
        .save(dir.join(name))
        .unwrap();
}

/// Returns the declared vertex count and the parsed records.
fn read_cloud(path: &Path) -> (u64, Vec<([f64; 3], [u8; 3])>) {
    let content = fs::read_to_string(path).unwrap();
    let (header, body) = content.split_once("end_header\n").unwrap();

    let declared = header
        .lines()
        .find_map(|line| line.strip_prefix("element vertex "))
        .unwrap()
        .parse()
        .unwrap();

    let records = body
        .lines()
        .map(|line| {
            let fields: Vec<&str> = line.split(' ').collect();
            assert_eq!(fields.len(), 6, "record '{}'", line);
            let position = [
                fields[0].parse().unwrap(),
                fields[1].parse().unwrap(),
                fields[2].parse().unwrap(),
            ];
            let colour = [
                fields[3].parse().unwrap(),
                fields[4].parse().unwrap(),
                fields[5].parse().unwrap(),
            ];
            (position, colour)
        })
        .collect();

    (declared, records)
}

#[test]
fn test_single_pixel_slice() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    save_slice(input.path(), "0001.png", 1, 1, [10, 20, 30, 255]);
    let ply = output.path().join("cloud.ply");

    let summary = convert(input.path(), &ply, &ConversionSettings::new([4.0, 5.0, 6.0])).unwrap();
    assert_eq!(summary.images_processed, 1);
    assert_eq!(summary.points_written, 1);
    assert_eq!(summary.output, ply);

    let content = fs::read_to_string(&ply).unwrap();
    assert!(content.ends_with("end_header\n0.000 0.000 0.000 10 20 30\n"));
    assert_eq!(read_cloud(&ply).0, 1);
}

#[test]
fn test_declared_count_matches_records() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();

    let mut slice = RgbaImage::from_pixel(5, 4, Rgba([90, 90, 90, 255]));
    slice.put_pixel(1, 1, Rgba([0, 0, 0, 0]));
    slice.put_pixel(3, 2, Rgba([0, 0, 0, 24]));
    slice.save(input.path().join("a.png")).unwrap();
    save_slice(input.path(), "b.png", 3, 3, [1, 2, 3, 200]);

    let ply = output.path().join("cloud.ply");
    let summary = convert(input.path(), &ply, &ConversionSettings::new([1.0, 1.0, 1.0])).unwrap();

    let (declared, records) = read_cloud(&ply);
    assert_eq!(declared, records.len() as u64);
    assert_eq!(declared, summary.points_written);
    assert_eq!(declared, 20 - 2 + 9);
}

#[test]
fn test_alpha_kept_when_not_ignored() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    save_slice(input.path(), "clear.png", 2, 2, [5, 6, 7, 0]);

    let ply = output.path().join("ignored.ply");
    let summary = convert(input.path(), &ply, &ConversionSettings::new([1.0, 1.0, 1.0])).unwrap();
    assert_eq!(summary.points_written, 0);
    assert_eq!(read_cloud(&ply), (0, Vec::new()));

    let ply = output.path().join("kept.ply");
    let settings = ConversionSettings::new([1.0, 1.0, 1.0]).ignore_alpha(false);
    convert(input.path(), &ply, &settings).unwrap();
    let (declared, records) = read_cloud(&ply);
    assert_eq!(declared, 4);
    assert!(records.iter().all(|(_, colour)| *colour == [5, 6, 7]));
}

#[test]
fn test_repeated_conversion_is_identical() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    for i in 0..3u8 {
        save_slice(input.path(), &format!("s{}.png", i), 7, 5, [i * 40, 100, 200, 255]);
    }

    let settings = ConversionSettings::new([3.0, 2.0, 1.0])
        .depth_direction(DepthDirection::Y)
        .samples(4, 0);
    let first = output.path().join("first.ply");
    let second = output.path().join("second.ply");
    convert(input.path(), &first, &settings).unwrap();
    convert(input.path(), &second, &settings).unwrap();

    assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
}

#[test]
fn test_unsupported_files_fail_without_output() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    fs::write(input.path().join("notes.txt"), "slices go here").unwrap();
    RgbaImage::new(2, 2).save(input.path().join("slice.bmp")).unwrap();

    let ply = output.path().join("cloud.ply");
    let err = convert(input.path(), &ply, &ConversionSettings::new([1.0, 1.0, 1.0])).unwrap_err();

    assert!(matches!(err, ConversionError::EmptySequence(_)));
    assert!(!ply.exists());
    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
}

#[test]
fn test_corrupt_image_aborts_without_output() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    save_slice(input.path(), "0.png", 2, 2, [1, 1, 1, 255]);
    fs::write(input.path().join("1.png"), b"not a png").unwrap();

    let ply = output.path().join("cloud.ply");
    let err = convert(input.path(), &ply, &ConversionSettings::new([1.0, 1.0, 1.0])).unwrap_err();

    assert!(matches!(err, ConversionError::Image { .. }));
    assert!(!ply.exists());
    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
}

#[test]
fn test_invalid_bounding_box_rejected() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    save_slice(input.path(), "0.png", 1, 1, [1, 1, 1, 255]);

    let ply = output.path().join("cloud.ply");
    let err = convert(input.path(), &ply, &ConversionSettings::new([1.0, f64::NAN, 1.0]))
        .unwrap_err();
    assert!(matches!(err, ConversionError::InvalidBoundingBox { .. }));
    assert!(!ply.exists());
}

#[test]
fn test_depth_spacing_and_inverse() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    for i in 0..4 {
        save_slice(input.path(), &format!("slice_{:02}.png", i), 1, 1, [9, 9, 9, 255]);
    }

    let forward = output.path().join("forward.ply");
    let settings = ConversionSettings::new([1.0, 1.0, 8.0]);
    convert(input.path(), &forward, &settings).unwrap();

    let depths: Vec<f64> = read_cloud(&forward).1.iter().map(|(p, _)| p[2]).collect();
    assert_eq!(depths, [0.0, 2.0, 4.0, 6.0]);

    let backward = output.path().join("backward.ply");
    convert(input.path(), &backward, &settings.inverse(true)).unwrap();

    let inverted: Vec<f64> = read_cloud(&backward).1.iter().map(|(p, _)| p[2]).collect();
    assert_eq!(inverted, [0.0, -2.0, -4.0, -6.0]);
    for (a, b) in depths.iter().zip(&inverted) {
        assert_eq!(*a, -*b);
    }
}

#[test]
fn test_x_depth_direction_mapping() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    for i in 0..3 {
        save_slice(input.path(), &format!("{}.png", i), 2, 1, [50, 60, 70, 255]);
    }

    let ply = output.path().join("cloud.ply");
    let settings = ConversionSettings::new([6.0, 3.0, 10.0]).depth_direction(DepthDirection::X);
    let summary = convert(input.path(), &ply, &settings).unwrap();
    assert_eq!(summary.axis_mapping.as_array(), [2, 1, 0]);

    let positions: Vec<[f64; 3]> = read_cloud(&ply).1.iter().map(|(p, _)| *p).collect();
    assert_eq!(
        positions,
        [
            [0.0, 0.0, 0.0],
            [0.0, 0.0, 5.0],
            [2.0, 0.0, 0.0],
            [2.0, 0.0, 5.0],
            [4.0, 0.0, 0.0],
            [4.0, 0.0, 5.0],
        ]
    );
}

#[test]
fn test_width_samples_keep_aspect_ratio() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    save_slice(input.path(), "wide.png", 40, 30, [120, 130, 140, 255]);

    let ply = output.path().join("cloud.ply");
    let settings = ConversionSettings::new([1.0, 1.0, 1.0]).samples(8, 0);
    let summary = convert(input.path(), &ply, &settings).unwrap();

    // 8 columns by floor(8 * 30 / 40) rows
    assert_eq!(summary.points_written, 8 * 6);
    let (_, records) = read_cloud(&ply);
    assert!(records.iter().all(|(p, _)| p[0] < 1.0 && p[1] < 1.0));
}

#[test]
fn test_jpg_slices_and_manifest() {
    let input = tempdir().unwrap();
    let output = tempdir().unwrap();
    RgbImage::from_pixel(4, 4, Rgb([200, 10, 10]))
        .save(input.path().join("b.JPG"))
        .unwrap();
    save_slice(input.path(), "a.png", 2, 2, [1, 2, 3, 255]);

    let ply = output.path().join("cloud.ply");
    let manifest = output.path().join("cloud.json");
    let summary = ImageStackConverter::new(input.path(), &ply, ConversionSettings::new([2.0, 2.0, 2.0]))
        .with_manifest(&manifest)
        .convert()
        .unwrap();
    assert_eq!(summary.points_written, 4 + 16);

    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&manifest).unwrap()).unwrap();
    assert_eq!(value["images"], serde_json::json!(["a.png", "b.JPG"]));
    assert_eq!(value["summary"]["points_written"], 20);
    assert_eq!(value["settings"]["depth_direction"], "z");
}
