//! End-to-end behavior of the editor pipeline: load, transform, read back.

use rasterkit::*;

/// Gradient test image with varying alpha
fn create_test_image(width: usize, height: usize) -> PixelBuffer {
    let mut data = vec![0u8; width * height * 4];
    for y in 0..height {
        for x in 0..width {
            let idx = (y * width + x) * 4;
            data[idx] = ((x * 255) / width.max(1)) as u8;
            data[idx + 1] = ((y * 255) / height.max(1)) as u8;
            data[idx + 2] = (((x + y) * 255) / (width + height).max(1)) as u8;
            data[idx + 3] = (255 - (x % 7) * 10) as u8;
        }
    }
    PixelBuffer::from_bytes(width, height, data).unwrap()
}

fn checkerboard_2x2(a: u8, b: u8) -> PixelBuffer {
    let bytes = vec![
        a, a, a, 255, b, b, b, 255, //
        b, b, b, 255, a, a, a, 255,
    ];
    PixelBuffer::from_bytes(2, 2, bytes).unwrap()
}

#[test]
fn test_white_4x4_resized_to_2x2() {
    let white = PixelBuffer::filled(4, 4, [255, 255, 255, 255]).unwrap();
    let out = resize_nearest(&white, 2, 2).unwrap();

    assert_eq!((out.width(), out.height()), (2, 2));
    assert_eq!(out, PixelBuffer::filled(2, 2, [255, 255, 255, 255]).unwrap());
}

#[test]
fn test_identity_operations_are_lossless() {
    let src = create_test_image(31, 17);

    assert_eq!(resize_nearest(&src, 31, 17).unwrap(), src);
    assert_eq!(apply_kernel(&src, &Kernel::Identity).unwrap(), src);
    assert_eq!(apply_tone_curve(&src, ToneCurvePoints::default()).unwrap(), src);
}

#[test]
fn test_transformations_leave_source_untouched() {
    let src = create_test_image(8, 8);
    let snapshot = src.clone();

    let _ = resize_nearest(&src, 3, 5).unwrap();
    let _ = apply_kernel(&src, &Kernel::Sharpen).unwrap();
    let _ = apply_tone_curve(
        &src,
        ToneCurvePoints {
            enter: CurvePoint::new(40, 0),
            exit: CurvePoint::new(220, 255),
        },
    )
    .unwrap();
    let _ = Histogram::build(&src);

    assert_eq!(src, snapshot);
}

/// Border policy is clamp-to-edge. On a 2x2 checkerboard each pixel sees
/// itself 4 times, its two edge neighbors twice and the diagonal once, so the
/// result is gray but not uniform: (5a + 4b) / 9 on the `a` diagonal and
/// (4a + 5b) / 9 on the `b` diagonal. The mean stays the checkerboard mean.
#[test]
fn test_checkerboard_box_blur_clamp_to_edge() {
    let src = checkerboard_2x2(255, 0);
    let out = apply_kernel(&src, &Kernel::BoxBlur3x3).unwrap();

    for y in 0..2 {
        for x in 0..2 {
            let p = out.get(x, y).unwrap();
            assert_eq!(p.color.r, p.color.g);
            assert_eq!(p.color.g, p.color.b);
            assert_eq!(p.alpha, 255);
        }
    }

    // 1275 / 9 = 141.7 and 1020 / 9 = 113.3
    assert_eq!(out.get(0, 0).unwrap().color.r, 142);
    assert_eq!(out.get(1, 1).unwrap().color.r, 142);
    assert_eq!(out.get(1, 0).unwrap().color.r, 113);
    assert_eq!(out.get(0, 1).unwrap().color.r, 113);

    let mean: f64 = (0..4)
        .map(|i| out.get(i % 2, i / 2).unwrap().color.r as f64)
        .sum::<f64>()
        / 4.0;
    assert!((mean - 127.5).abs() <= 0.5);
}

#[test]
fn test_histogram_sums_to_pixel_count() {
    let src = create_test_image(50, 40);
    let hist = Histogram::build(&src);
    for ch in Channel::ALL {
        assert_eq!(hist.total(ch), 2000);
    }
}

#[test]
fn test_resize_then_filter_pipeline() {
    let src = create_test_image(64, 48);
    let settings = {
        let mut s = ResizeSettings::pixels(64, 48).with_proportions(true);
        s.set_width(32);
        s
    };
    assert_eq!((settings.width, settings.height), (32, 24));

    let small = settings.apply(&src).unwrap();
    let blurred = apply_kernel(&small, &Kernel::Gaussian3x3).unwrap();
    let toned = apply_tone_curve(&blurred, ToneCurvePoints::default()).unwrap();

    assert_eq!(toned.as_bytes().len(), 32 * 24 * 4);
    assert_eq!(toned, blurred);
}

#[test]
fn test_pipette_on_zoomed_canvas() {
    let src = checkerboard_2x2(0, 255);
    let zoom = Zoom::new(200);
    assert_eq!(zoom.display_size(src.width(), src.height()), (4, 4));

    // Pointer at (3, 0) on screen is source pixel (1, 0)
    let (x, y) = zoom.to_image_coords(3.0, 0.0);
    let white = ColorReadout::pick(&src, x, y).unwrap();
    let black = ColorReadout::pick(&src, 0, 0).unwrap();

    assert_eq!(white.xyz, Xyz { x: 95, y: 100, z: 109 });
    assert_eq!(black.lab, Lab { l: 0, a: 0, b: 0 });

    let score = white.contrast_with(&black);
    assert!(score.ratio >= 4.5);
    assert!(score.passes_threshold);
    assert_eq!(contrast(white.rgb, white.rgb).ratio, 1.0);
}

#[test]
fn test_errors_surface_to_caller() {
    let src = create_test_image(4, 4);

    assert!(matches!(
        PixelBuffer::from_bytes(4, 4, vec![0; 10]),
        Err(Error::InvalidDimensions { len: 10, .. })
    ));
    assert!(matches!(
        resize_nearest(&src, 0, 4),
        Err(Error::InvalidDimensions { .. })
    ));
    assert_eq!(
        apply_kernel(&src, &Kernel::custom([0, -1, 0, -1, 4, -1, 0, -1, 0])),
        Err(Error::DivisorZero)
    );
    assert!(matches!(
        apply_tone_curve(
            &src,
            ToneCurvePoints {
                enter: CurvePoint::new(9, 0),
                exit: CurvePoint::new(9, 255),
            }
        ),
        Err(Error::InvalidCurve { enter: 9, exit: 9 })
    ));
}
