use image::{Rgba, RgbaImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use stegger::common::image_io::{
    default_output_path, hide_in_file, load_image, reveal_from_file, save_png,
};
use stegger::processing::{hide, hide_str, max_message_len, reveal, reveal_string};
use stegger::{MemoryGrid, PixelGrid, StegError};

fn noisy_image(rng: &mut StdRng, width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |_, _| Rgba(rng.gen::<[u8; 4]>()))
}

#[test]
fn test_hide_and_reveal_in_blank_image() {
    let message = "I say what it occurs to me to say when I think I hear people say things...";
    let mut img = RgbaImage::new(50, 50);

    hide_str(message, &mut img).unwrap();

    assert_eq!(reveal_string(&img).unwrap(), message);
}

#[test]
fn test_capacity_exceeded_on_image() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut img = noisy_image(&mut rng, 50, 50);
    let snapshot = img.clone();
    let message = "x".repeat(400);

    let err = hide_str(&message, &mut img).unwrap_err();

    assert!(matches!(err, StegError::CapacityExceeded { available_bits: 2500, .. }));
    assert_eq!(img, snapshot);
}

#[test]
fn test_largest_message_fits() {
    let mut img = RgbaImage::new(50, 50);
    let max = max_message_len(img.capacity_bits()).unwrap() as usize;

    let message = vec![b'm'; max];
    hide(&message, &mut img).unwrap();
    assert_eq!(reveal(&img).unwrap(), message);

    let too_long = vec![b'm'; max + 1];
    assert!(matches!(
        hide(&too_long, &mut img),
        Err(StegError::CapacityExceeded { .. })
    ));
}

#[test]
fn test_random_round_trips() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..50 {
        let width = rng.gen_range(1..64);
        let height = rng.gen_range(1..64);
        let pixels: Vec<u32> = (0..width * height).map(|_| rng.gen()).collect();
        let mut grid = MemoryGrid::from_pixels(width, height, pixels.clone()).unwrap();

        let max = match max_message_len(grid.capacity_bits()) {
            Some(max) => max as usize,
            None => continue,
        };
        let len = rng.gen_range(0..=max);
        let message: Vec<u8> = (0..len).map(|_| rng.gen()).collect();

        hide(&message, &mut grid).unwrap();

        assert_eq!(reveal(&grid).unwrap(), message);
        for (before, after) in pixels.iter().zip(grid.pixels()) {
            assert_eq!(before >> 1, after >> 1);
        }
    }
}

#[test]
fn test_png_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("small_kitten.png");
    let mut rng = StdRng::seed_from_u64(42);
    save_png(&noisy_image(&mut rng, 40, 30), &input).unwrap();

    let output = default_output_path(&input, "_out");
    let message = "We few, we happy few, we band of brothers.";
    let summary = hide_in_file(&input, &output, message.as_bytes()).unwrap();

    assert_eq!(output, dir.path().join("small_kitten_out.png"));
    assert_eq!(summary.message_bytes, message.len());
    assert_eq!(reveal_from_file(&output).unwrap(), message.as_bytes());

    // Only the blue channel's low bit may differ
    let before = load_image(&input).unwrap();
    let after = load_image(&output).unwrap();
    for (a, b) in before.pixels().zip(after.pixels()) {
        assert_eq!(a.0[..2], b.0[..2]);
        assert_eq!(a.0[3], b.0[3]);
        assert_eq!(a.0[2] >> 1, b.0[2] >> 1);
    }
}

#[test]
fn test_reveal_from_plain_png_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plain.png");
    save_png(&RgbaImage::new(16, 16), &path).unwrap();

    let err = reveal_from_file(&path).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<StegError>(),
        Some(StegError::MalformedLength { .. })
    ));
}

#[test]
fn test_hide_in_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.png");
    let output = dir.path().join("out.png");

    assert!(hide_in_file(&missing, &output, b"hi").is_err());
    assert!(!output.exists());
}
