use inkboard::composite;
use inkboard::export::write_png;
use inkboard::model::{Point, Rgb, Stroke, Tool};
use inkboard::surface::Surface;
use tempfile::tempdir;

fn painted_surface() -> Surface {
    let mut surface = Surface::new(16, 12, 1.0);
    let stroke = Stroke {
        points: vec![Point::new(2.0, 2.0), Point::new(13.0, 9.0)],
        color: Rgb::rgb(255, 64, 64),
        tool: Tool::Pen,
        line_width: 3.0,
        opacity: 100,
    };
    composite::configure(&mut surface, stroke.tool, stroke.color, stroke.opacity);
    composite::paint_stroke(&mut surface, &stroke);
    surface
}

#[test]
fn png_on_disk_matches_the_surface_pixels() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shot.png");
    let surface = painted_surface();

    write_png(&surface, &path).unwrap();

    let decoded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (16, 12));
    assert_eq!(decoded.as_raw().as_slice(), surface.pixels());
}

#[test]
fn export_creates_nested_folders() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a").join("b").join("shot.png");

    write_png(&painted_surface(), &path).unwrap();
    assert!(path.exists());
}

#[test]
fn empty_surface_cannot_be_exported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("shot.png");

    let err = write_png(&Surface::new(0, 0, 1.0), &path);
    assert!(err.is_err());
    assert!(!path.exists(), "a failed export must not leave files behind");
}
