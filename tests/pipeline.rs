//! End-to-end analysis through real image files on disk.

use bitplanes::bitplane::{self, PlaneContractViolation};
use bitplanes::config::{AnalysisConfig, PreviewConfig, load_config};
use bitplanes::imaging::{ImageSource, RustSource, SourceError};
use bitplanes::memory::MemoryError;
use bitplanes::pipeline::{self, PipelineError};
use bitplanes::present::TerminalPresenter;
use image::{GrayImage, Luma};
use std::path::PathBuf;
use tempfile::TempDir;

fn every_byte_image() -> GrayImage {
    GrayImage::from_fn(16, 16, |x, y| Luma([(y * 16 + x) as u8]))
}

fn save(dir: &TempDir, name: &str, image: &GrayImage) -> PathBuf {
    let path = dir.path().join(name);
    image.save(&path).unwrap();
    path
}

#[test]
fn png_round_trip_is_lossless() {
    let _ = env_logger::builder().is_test(true).try_init();
    let tmp = TempDir::new().unwrap();
    let img = every_byte_image();
    let path = save(&tmp, "bytes.png", &img);

    let loaded = RustSource::new().load(&path).unwrap();
    let analysis = pipeline::analyze_image(loaded, &AnalysisConfig::default()).unwrap();

    assert!(analysis.is_lossless());
    assert_eq!(analysis.reconstructed, img);
    for plane in analysis.planes.iter() {
        assert_eq!(plane.ones(), 128);
    }
}

#[test]
fn run_draws_every_section_in_order() {
    let tmp = TempDir::new().unwrap();
    let path = save(
        &tmp,
        "board.png",
        &GrayImage::from_fn(100, 100, |x, y| {
            Luma([if (x / 10 + y / 10) % 2 == 0 { 0 } else { 255 }])
        }),
    );

    let mut presenter = TerminalPresenter::new(Vec::new(), PreviewConfig::default());
    pipeline::run(
        &path,
        &RustSource::new(),
        &AnalysisConfig::default(),
        &mut presenter,
    )
    .unwrap();
    let text = String::from_utf8(presenter.into_inner()).unwrap();

    let markers = [
        "== Original Grayscale Image ==",
        "Bit Plane 0",
        "Bit Plane 7",
        "== Reconstructed Grayscale Image ==",
        "Original Image Size: 10000 bytes",
        "Bit Planes Size: 1250 bytes (one packed plane)",
        "Memory Reduction: 87.50%",
        "Thresholding",
        "Edge Detection",
    ];
    let mut last = 0;
    for marker in markers {
        let at = text[last..]
            .find(marker)
            .unwrap_or_else(|| panic!("{marker:?} missing or out of order"));
        last += at;
    }
}

#[test]
fn batch_mixes_successes_and_failures() {
    let tmp = TempDir::new().unwrap();
    let good = save(&tmp, "good.png", &every_byte_image());
    let missing = tmp.path().join("missing.png");
    let broken = tmp.path().join("broken.png");
    std::fs::write(&broken, b"not an image").unwrap();

    let paths = vec![good.clone(), missing.clone(), broken.clone()];
    let results = pipeline::run_batch(&paths, &RustSource::new(), &AnalysisConfig::default());

    assert_eq!(results[0].0, good);
    assert!(results[0].1.as_ref().unwrap().is_lossless());

    for (path, result) in &results[1..] {
        match result {
            Err(PipelineError::Source(SourceError::InvalidImage { path: p, .. })) => {
                assert_eq!(p, path)
            }
            other => panic!("expected invalid image for {}, got {other:?}", path.display()),
        }
    }
}

#[test]
fn memory_reports_follow_dimensions() {
    let tmp = TempDir::new().unwrap();
    let a = save(&tmp, "a.png", &GrayImage::new(100, 100));
    let b = save(&tmp, "b.png", &GrayImage::new(3, 5));

    let reports = pipeline::memory_report_batch(&[a, b], &RustSource::new());
    let a = reports[0].as_ref().unwrap();
    assert_eq!(a.report.original_bytes, 10000);
    assert_eq!(a.report.bit_plane_bytes, 1250);
    assert!((a.report.reduction_percent - 87.5).abs() < 1e-9);

    let b = reports[1].as_ref().unwrap();
    assert_eq!(b.report.original_bytes, 15);
    assert_eq!(b.report.bit_plane_bytes, 1);
}

#[test]
fn fatal_preconditions() {
    let mut planes = bitplane::split(&every_byte_image()).into_planes();
    planes.pop();
    let err = bitplane::reconstruct(&planes).unwrap_err();
    assert!(matches!(err, PlaneContractViolation::Count(7)));
    assert!(err.to_string().starts_with("plane contract violation"));

    let err = pipeline::analyze_image(GrayImage::new(0, 0), &AnalysisConfig::default())
        .unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Memory(MemoryError::DegenerateDimensions(_))
    ));
}

#[test]
fn config_file_changes_comparison() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("bitplanes.toml");
    std::fs::write(&config_path, "threshold_cutoff = 200\n").unwrap();
    let config = load_config(Some(config_path.as_path())).unwrap();

    let img = GrayImage::from_pixel(8, 8, Luma([150]));
    let strict = pipeline::analyze_image(img.clone(), &config).unwrap();
    let stock = pipeline::analyze_image(img, &AnalysisConfig::default()).unwrap();

    assert!(strict.comparison.thresholded.iter().all(|&v| v == 0));
    assert!(stock.comparison.thresholded.iter().all(|&v| v == 255));
}
