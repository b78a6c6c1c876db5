use gridfx::{ChoreographyDef, LayoutQuery as _, Rect, ScrollDirector, SimHost, Size};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let mut host: SimHost = SimHost::new(Size::new(1280.0, 800.0));
    host.set_element("benefits", Rect::new(0.0, 900.0, 1280.0, 1700.0));
    host.set_element("cards-frame", Rect::new(0.0, 14_000.0, 1280.0, 14_800.0));
    host.set_element("cards", Rect::new(0.0, 14_000.0, 1280.0, 16_400.0));

    let mut director = ScrollDirector::new();
    let benefits = director.register(&mut host, ChoreographyDef::benefits_showcase())?;
    let cards = director.register(&mut host, ChoreographyDef::cards_scroller())?;
    director.mount(&mut host);

    for y in (0..=16_000).step_by(2_000) {
        host.scroll_to(&mut director, f64::from(y));
        host.run_for(&mut director, 1_200.0);

        for t in director.take_transitions() {
            println!("  {:?} on #{} (pinned: {})", t.event, t.id.0, t.active);
        }
        if let (Some(b), Some(c)) = (director.get(benefits), director.get(cards)) {
            let width = b.values()["mockup"]["width"];
            let cards_y = c.values()["cards"]["y"];
            println!(
                "scroll {:>6}: benefits {:<10} mockup width {width}, cards y {cards_y}",
                host.scroll_y(),
                b.phase().unwrap_or("-"),
            );
        }
    }

    director.teardown(&mut host);
    println!("host quiet: {}", host.is_quiet());
    Ok(())
}
