use std::fs::{self, File};
use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use image::{Rgb, RgbImage};
use spatial_photo_combiner::image_pipeline::container::PAGE_NUMBER_TAG;
use spatial_photo_combiner::image_pipeline::{
    ContainerCompression, ConversionConfig, ConversionError, ImageProperties,
    StereoToSpatialPipeline,
};
use tiff::decoder::{Decoder, DecodingResult};
use tiff::tags::Tag;

fn write_png(dir: &Path, name: &str, width: u32, height: u32, value: u8) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, Rgb([value, value / 2, 255 - value]))
        .save(&path)
        .unwrap();
    path
}

struct Page {
    dimensions: (u32, u32),
    page_number: Vec<u16>,
    properties: ImageProperties,
    samples: Vec<u8>,
}

fn read_pages(path: &Path) -> Vec<Page> {
    let mut decoder = Decoder::new(File::open(path).unwrap()).unwrap();
    let mut pages = Vec::new();
    loop {
        let description = decoder.get_tag_ascii_string(Tag::ImageDescription).unwrap();
        let samples = match decoder.read_image().unwrap() {
            DecodingResult::U8(samples) => samples,
            _ => panic!("expected 8-bit samples"),
        };
        pages.push(Page {
            dimensions: decoder.dimensions().unwrap(),
            page_number: decoder
                .get_tag_u16_vec(Tag::from_u16_exhaustive(PAGE_NUMBER_TAG))
                .unwrap(),
            properties: ImageProperties::from_json(description.trim_end_matches('\0')).unwrap(),
            samples,
        });
        if !decoder.more_images() {
            break;
        }
        decoder.next_image().unwrap();
    }
    pages
}

#[test]
fn test_pair_becomes_two_page_container() {
    let dir = tempfile::tempdir().unwrap();
    let left = write_png(dir.path(), "left.png", 400, 300, 40);
    let right = write_png(dir.path(), "right.png", 400, 300, 200);
    let output = dir.path().join("spatial.tiff");

    let pipeline = StereoToSpatialPipeline::new(ConversionConfig::default());
    pipeline.convert_files(&left, &right, &output).unwrap();

    let pages = read_pages(&output);
    assert_eq!(pages.len(), 2);

    assert_eq!(pages[0].dimensions, (400, 300));
    assert_eq!(pages[1].dimensions, (400, 300));
    assert_eq!(pages[0].page_number, vec![0, 2]);
    assert_eq!(pages[1].page_number, vec![1, 2]);
    assert_eq!(&pages[0].samples[..3], &[40, 20, 215]);
    assert_eq!(&pages[1].samples[..3], &[200, 100, 55]);

    let properties = &pages[0].properties;
    assert_eq!(properties, &pages[1].properties);
    assert_eq!(properties.groups.group_index, 0);
    assert_eq!(properties.groups.left_image_index, 0);
    assert_eq!(properties.groups.right_image_index, 1);

    let k = properties.heif.camera_model.intrinsics;
    let expected_f = 200.0 / 27.5f64.to_radians().tan();
    assert_relative_eq!(k[0], expected_f, epsilon = 1e-9);
    assert_eq!(k[0], k[4]);
    assert_eq!(&k[1..4], &[0.0, 200.0, 0.0]);
    assert_eq!(&k[5..], &[150.0, 0.0, 0.0, 1.0]);

    let extrinsics = &properties.heif.camera_extrinsics;
    assert_eq!(extrinsics.coordinate_system_id, 0);
    assert_eq!(extrinsics.position, [0.0; 3]);
    assert_eq!(extrinsics.rotation, [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
}

#[test]
fn test_raw_json_uses_viewer_keys() {
    let dir = tempfile::tempdir().unwrap();
    let left = write_png(dir.path(), "left.png", 20, 10, 0);
    let right = write_png(dir.path(), "right.png", 20, 10, 0);
    let output = dir.path().join("spatial.tiff");

    StereoToSpatialPipeline::new(ConversionConfig::default())
        .convert_files(&left, &right, &output)
        .unwrap();

    let mut decoder = Decoder::new(File::open(&output).unwrap()).unwrap();
    let description = decoder.get_tag_ascii_string(Tag::ImageDescription).unwrap();
    let value: serde_json::Value = serde_json::from_str(description.trim_end_matches('\0')).unwrap();

    assert_eq!(value["Groups"]["GroupType"], "StereoPair");
    assert_eq!(value["Groups"]["GroupImageIndexLeft"], 0);
    assert_eq!(value["Groups"]["GroupImageIndexRight"], 1);
    assert_eq!(value["{HEIF}"]["CameraModel"]["Intrinsics"].as_array().unwrap().len(), 9);
    assert_eq!(value["{HEIF}"]["CameraExtrinsics"]["CoordinateSystemID"], 0);
    assert_eq!(value["{HEIF}"]["CameraExtrinsics"]["Position"].as_array().unwrap().len(), 3);
}

#[test]
fn test_mixed_resolutions_with_compression() {
    let dir = tempfile::tempdir().unwrap();
    let left = write_png(dir.path(), "left.png", 64, 48, 10);
    let right = write_png(dir.path(), "right.png", 32, 24, 10);
    let output = dir.path().join("spatial.tiff");

    let config = ConversionConfig::builder()
        .hfov_degrees(90.0)
        .compression(ContainerCompression::Lzw)
        .predictor(Some(2))
        .build();
    StereoToSpatialPipeline::new(config)
        .convert_files(&left, &right, &output)
        .unwrap();

    let pages = read_pages(&output);
    assert_eq!(pages[0].dimensions, (64, 48));
    assert_eq!(pages[1].dimensions, (32, 24));
    assert_relative_eq!(pages[0].properties.heif.camera_model.intrinsics[0], 32.0, epsilon = 1e-9);
    assert_relative_eq!(pages[1].properties.heif.camera_model.intrinsics[0], 16.0, epsilon = 1e-9);
    assert_eq!(pages[0].properties.groups, pages[1].properties.groups);
    assert!(pages[1].samples.chunks(3).all(|px| px == [10, 5, 245]));
}

#[test]
fn test_replaces_existing_output() {
    let dir = tempfile::tempdir().unwrap();
    let left = write_png(dir.path(), "left.png", 16, 16, 1);
    let right = write_png(dir.path(), "right.png", 16, 16, 2);
    let output = dir.path().join("spatial.tiff");
    fs::write(&output, b"stale").unwrap();

    StereoToSpatialPipeline::new(ConversionConfig::default())
        .convert_files(&left, &right, &output)
        .unwrap();

    assert_eq!(read_pages(&output).len(), 2);
}

#[test]
fn test_fov_of_180_creates_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let left = write_png(dir.path(), "left.png", 16, 16, 1);
    let right = write_png(dir.path(), "right.png", 16, 16, 2);
    let output = dir.path().join("spatial.tiff");

    let config = ConversionConfig::builder().hfov_degrees(180.0).build();
    let result = StereoToSpatialPipeline::new(config).convert_files(&left, &right, &output);

    assert!(matches!(result, Err(ConversionError::InvalidGeometry(_))));
    assert!(!output.exists());
}

#[test]
fn test_undecodable_right_image_creates_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let left = write_png(dir.path(), "left.png", 16, 16, 1);
    let right = dir.path().join("right.jpg");
    fs::write(&right, b"").unwrap();
    let output = dir.path().join("spatial.tiff");

    let result = StereoToSpatialPipeline::new(ConversionConfig::default())
        .convert_files(&left, &right, &output);

    assert!(matches!(result, Err(ConversionError::ImageLoadError(_))));
    assert!(!output.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 2);
}

#[test]
fn test_corrupt_input_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let left = dir.path().join("left.png");
    fs::write(&left, b"\x89PNG\r\n\x1a\ncorrupted beyond repair").unwrap();
    let right = write_png(dir.path(), "right.png", 16, 16, 2);
    let output = dir.path().join("spatial.tiff");

    let result = StereoToSpatialPipeline::new(ConversionConfig::default())
        .convert_files(&left, &right, &output);

    match result {
        Err(ConversionError::ImageLoadError(message)) => assert!(message.contains("left.png")),
        other => panic!("expected ImageLoadError, got {:?}", other),
    }
    assert!(!output.exists());
}

#[test]
fn test_truncated_raw_input_reports_only_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let left = dir.path().join("bad.mrw");
    let mut data = b"\0MRM".to_vec();
    data.extend_from_slice(&[0x5A; 36]);
    fs::write(&left, &data).unwrap();
    let right = write_png(dir.path(), "right.png", 16, 16, 2);
    let output = dir.path().join("spatial.tiff");

    let result = StereoToSpatialPipeline::new(ConversionConfig::default())
        .convert_files(&left, &right, &output);

    match result {
        Err(error @ ConversionError::ImageLoadError(_)) => {
            let message = error.to_string();
            assert!(message.contains("bad.mrw"));
            assert!(!message.contains('\n'));
            assert!(!message.contains("http"));
            assert!(!message.to_lowercase().contains("panic"));
        }
        other => panic!("expected ImageLoadError, got {:?}", other),
    }
    assert!(!output.exists());
}
