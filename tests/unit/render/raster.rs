use super::*;

#[test]
fn background_fills_every_pixel_before_any_frame() {
    let s = RasterSurface::with_background(
        Canvas::new(4, 3).unwrap(),
        Rgba::from_rgba8(10, 20, 30, 1.0),
    );
    let frame = s.snapshot();
    assert_eq!(frame.data.len(), 4 * 3 * 4);
    assert_eq!(frame.pixel(3, 2), Some([10, 20, 30, 255]));
    assert_eq!(frame.pixel(4, 0), None);
}

#[test]
fn opaque_fill_lands_in_the_pixmap_on_present() {
    let mut s = RasterSurface::new(Canvas::new(8, 8).unwrap());
    s.clear(s.canvas().rect());
    s.set_fill(Rgba::from_rgba8(255, 0, 0, 1.0));
    s.fill_rect(Rect::new(0.0, 0.0, 4.0, 8.0));
    s.present();

    let frame = s.snapshot();
    assert_eq!(frame.pixel(1, 4), Some([255, 0, 0, 255]));
    assert_eq!(frame.pixel(6, 4), Some([0, 0, 0, 0]));
}

#[test]
fn clear_drops_previous_frame() {
    let mut s = RasterSurface::new(Canvas::new(8, 8).unwrap());
    s.set_fill(Rgba::from_rgba8(0, 0, 255, 1.0));
    s.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0));
    s.present();
    s.clear(s.canvas().rect());
    s.present();
    assert_eq!(s.snapshot().pixel(2, 2), Some([0, 0, 0, 0]));
}

#[test]
fn resize_reallocates_backing_store() {
    let mut s = RasterSurface::new(Canvas::new(8, 8).unwrap());
    s.resize(Canvas::new(16, 4).unwrap());
    let frame = s.snapshot();
    assert_eq!((frame.width, frame.height), (16, 4));
    assert_eq!(frame.data.len(), 16 * 4 * 4);
}

#[test]
fn unpremultiply_restores_straight_alpha() {
    let mut frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![64, 32, 0, 128],
        premultiplied: true,
    };
    frame.unpremultiply();
    assert_eq!(frame.data, vec![128, 64, 0, 128]);
    assert!(!frame.premultiplied);
}

#[test]
fn oversized_canvas_is_clamped_consistently() {
    let mut s = RasterSurface::new(Canvas::new(70_000, 2).unwrap());
    assert_eq!(s.canvas(), Canvas::new(u32::from(u16::MAX), 2).unwrap());
    let frame = s.snapshot();
    assert_eq!(frame.width, u32::from(u16::MAX));
    assert_eq!(frame.data.len(), usize::from(u16::MAX) * 2 * 4);

    s.resize(Canvas::new(3, 80_000).unwrap());
    let frame = s.snapshot();
    assert_eq!((frame.width, frame.height), (3, u32::from(u16::MAX)));
    assert_eq!(frame.data.len(), 3 * usize::from(u16::MAX) * 4);
}
