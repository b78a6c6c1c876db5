use gridfx::{
    Canvas, GridConfig, GridController, Point, RecordingSurface, Rect, SimHost, Size,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let viewport = Size::new(640.0, 400.0);
    let mut host: SimHost = SimHost::new(viewport);
    host.insert_container(
        "bg",
        Some(Rect::from_origin_size(Point::ZERO, viewport)),
        RecordingSurface::new(Canvas::new(1, 1)?),
    );

    let mut grid = GridController::new("bg", GridConfig::viewport_background())?;
    grid.mount(&mut host);
    host.run_for(&mut grid, 120.0);
    println!("phase after mount: {:?}", grid.phase());

    for step in 0..8 {
        let p = Point::new(40.0 + 80.0 * f64::from(step), 40.0 + 40.0 * f64::from(step));
        host.move_pointer(&mut grid, p);
        host.run_frames(&mut grid, 4);
        let lit = grid
            .instance()
            .store()
            .cells()
            .iter()
            .filter(|c| c.opacity > 0.01)
            .count();
        println!("pointer ({:>5.1}, {:>5.1}): {lit} cells lit", p.x, p.y);
    }

    host.resize(
        &mut grid,
        Size::new(960.0, 400.0),
        Some(("bg", Rect::new(0.0, 0.0, 960.0, 400.0))),
    );
    host.run_for(&mut grid, 300.0);
    if let Some(g) = grid.instance().geometry() {
        println!("after resize: {} x {} cells", g.columns, g.rows);
    }

    let painted = host.surface_ref("bg").map_or(0, RecordingSurface::frame_count);
    grid.teardown(&mut host);
    println!("{painted} frames painted, host quiet: {}", host.is_quiet());
    Ok(())
}
