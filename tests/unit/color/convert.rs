use super::*;

fn yuv(y: u8, u: u8, v: u8) -> Yuv8 {
    Yuv8 { y, u, v }
}

#[test]
fn white_and_black_are_neutral() {
    assert_eq!(rgb_to_yuv(Rgb8::new(255, 255, 255)), yuv(255, 128, 128));
    assert_eq!(rgb_to_yuv(Rgb8::new(0, 0, 0)), yuv(0, 128, 128));
}

#[test]
fn saturated_primaries_clamp_instead_of_wrapping() {
    // V for pure red is round(127.5) + 128 = 256, which must clamp to 255.
    assert_eq!(rgb_to_yuv(Rgb8::new(255, 0, 0)), yuv(76, 85, 255));
    assert_eq!(rgb_to_yuv(Rgb8::new(0, 255, 0)), yuv(150, 44, 21));
    assert_eq!(rgb_to_yuv(Rgb8::new(0, 0, 255)), yuv(29, 255, 107));
}

#[test]
fn luma_rounds_to_nearest() {
    // 0.299 * 10 + 0.587 * 10 + 0.114 * 10 = 10, and 0.587 * 1 rounds to 1.
    assert_eq!(rgb_to_yuv(Rgb8::new(10, 10, 10)).y, 10);
    assert_eq!(rgb_to_yuv(Rgb8::new(0, 1, 0)).y, 1);
}

#[test]
fn from_packed_keeps_top_left_chroma_of_each_block() {
    // 4x2 image; chroma comes from columns 0 and 2 of row 0.
    let mut packed = Vec::new();
    for i in 0..8u8 {
        packed.push(yuv(i, 100 + i, 200 + i));
    }
    let img = YuvImage::from_packed(4, 2, &packed).unwrap();
    assert_eq!(img.y, (0..8).collect::<Vec<u8>>());
    assert_eq!(img.u, vec![100, 102]);
    assert_eq!(img.v, vec![200, 202]);
}

#[test]
fn odd_dimensions_keep_partial_edge_blocks() {
    let packed: Vec<Yuv8> = (0..9u8).map(|i| yuv(i, 20 + i, 40 + i)).collect();
    let img = YuvImage::from_packed(3, 3, &packed).unwrap();
    assert_eq!(img.y.len(), 9);
    assert_eq!((img.chroma_width(), img.chroma_height()), (2, 2));
    assert_eq!(img.u, vec![20, 22, 26, 28]);
    assert_eq!(img.v, vec![40, 42, 46, 48]);

    let line = YuvImage::from_packed(5, 1, &vec![yuv(1, 2, 3); 5]).unwrap();
    assert_eq!(line.u, vec![2; 3]);
}

#[test]
fn zero_width_image_converts_without_scanning_rows() {
    let image = RasterImage::new(0, 0x7fff_ffff, Vec::new()).unwrap();
    let out = convert(&image, &ConvertOpts { threads: Some(2) }).unwrap();
    assert!(out.is_empty());
    assert!(out.y.is_empty() && out.u.is_empty() && out.v.is_empty());
}

#[test]
fn convert_is_independent_of_worker_count() {
    let (w, h) = (37u32, 11u32);
    let pixels = (0..w * h)
        .map(|i| Rgb8::new((i * 7) as u8, (i * 13) as u8, (i * 29) as u8))
        .collect();
    let image = RasterImage::new(w, h, pixels).unwrap();

    let one = convert(&image, &ConvertOpts { threads: Some(1) }).unwrap();
    let eight = convert(&image, &ConvertOpts { threads: Some(8) }).unwrap();
    assert_eq!(one, eight);
    assert_eq!(one.y.len(), (w * h) as usize);
    assert_eq!(one.u.len(), (w.div_ceil(2) * h.div_ceil(2)) as usize);
}

#[test]
fn convert_matches_per_pixel_formula() {
    let pixels = vec![
        Rgb8::new(255, 0, 0),
        Rgb8::new(0, 255, 0),
        Rgb8::new(0, 0, 255),
        Rgb8::new(255, 255, 255),
    ];
    let image = RasterImage::new(2, 2, pixels.clone()).unwrap();
    let out = convert(&image, &ConvertOpts::default()).unwrap();
    let expected_y: Vec<u8> = pixels.iter().map(|p| rgb_to_yuv(*p).y).collect();
    assert_eq!(out.y, expected_y);
    assert_eq!(out.u, vec![rgb_to_yuv(pixels[0]).u]);
    assert_eq!(out.v, vec![rgb_to_yuv(pixels[0]).v]);
}

#[test]
fn write_planar_emits_y_then_u_then_v() {
    let img = YuvImage::new(2, 2, vec![1, 2, 3, 4], vec![5], vec![6]).unwrap();
    let mut out = Vec::new();
    img.write_planar(&mut out).unwrap();
    assert_eq!(out, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn new_rejects_mismatched_planes() {
    assert!(YuvImage::new(2, 2, vec![0; 4], vec![0; 2], vec![0]).is_err());
}

#[test]
fn convert_rejects_zero_workers() {
    let image = RasterImage::new(1, 1, vec![Rgb8::default()]).unwrap();
    assert!(convert(&image, &ConvertOpts { threads: Some(0) }).is_err());
}
