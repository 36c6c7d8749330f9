//! Plain-text report of a diagram after replay.

use std::fmt::{self, Write};

use feyndraw::{
    Diagram,
    geometry::{Bounds, Point},
    region::{diagram_bounding_box, selection_bounding_box},
    topology::component_count,
};

fn point(p: Point) -> String {
    format!("({}, {})", p.x(), p.y())
}

fn bounds(bounds: Option<Bounds>) -> String {
    match bounds {
        Some(b) => format!(
            "{} - {} ({} x {})",
            point(b.min_point()),
            point(b.max_point()),
            b.width(),
            b.height()
        ),
        None => "none".to_string(),
    }
}

/// Writes the report for `diagram` into `out`
pub fn write_report(out: &mut impl Write, diagram: &Diagram) -> fmt::Result {
    let info = diagram.info();
    let elements = diagram.elements();

    if info.title().is_empty() {
        writeln!(out, "diagram")?;
    } else {
        writeln!(out, "diagram \"{}\"", info.title())?;
    }
    writeln!(
        out,
        "grid: {} ({}), zoom: {}, pan: {}, anchors {}",
        info.grid_size(),
        if info.show_grid() { "on" } else { "off" },
        info.zoom(),
        point(info.pan()),
        if info.show_anchors() { "shown" } else { "hidden" },
    )?;

    writeln!(out, "anchors ({}):", elements.anchors().len())?;
    for anchor in elements.anchors().values() {
        writeln!(out, "  {} {}", anchor.id(), point(anchor.position()))?;
    }

    writeln!(out, "propagators ({}):", elements.propagators().len())?;
    for propagator in elements.propagators().values() {
        writeln!(
            out,
            "  {} {} {} -> {}",
            propagator.id(),
            propagator.kind(),
            propagator.anchor1(),
            propagator.anchor2()
        )?;
    }

    let selected: Vec<String> = elements
        .selection()
        .iter()
        .map(|element| element.to_string())
        .collect();
    if selected.is_empty() {
        writeln!(out, "selection: none")?;
    } else {
        writeln!(out, "selection: {}", selected.join(", "))?;
    }

    writeln!(out, "bounding box: {}", bounds(diagram_bounding_box(elements)))?;
    writeln!(
        out,
        "selection box: {}",
        bounds(selection_bounding_box(elements))
    )?;
    writeln!(out, "components: {}", component_count(elements))?;
    Ok(())
}

/// Renders the report for `diagram` as a string
pub fn render_report(diagram: &Diagram) -> String {
    let mut out = String::new();
    write_report(&mut out, diagram).expect("Writing to String buffer is infallible");
    out
}

#[cfg(test)]
mod tests {
    use feyndraw::{
        config::AppConfig,
        element::{ElementRef, PropagatorKind, Selection},
    };

    use super::*;

    #[test]
    fn test_report_lists_elements() {
        let mut diagram = Diagram::new(&AppConfig::default());
        diagram.info_mut().set_title("tree");
        let a = diagram.add_anchor(Point::new(0.0, 0.0)).unwrap();
        let b = diagram.add_anchor(Point::new(40.0, 20.0)).unwrap();
        let p = diagram
            .add_propagator(PropagatorKind::Gluon, a, b)
            .unwrap();
        diagram
            .select(Selection::single(ElementRef::propagator(p)))
            .unwrap();

        let report = render_report(&diagram);
        assert!(report.starts_with("diagram \"tree\"\n"));
        assert!(report.contains("anchors (2):\n  1 (0, 0)\n  2 (40, 20)\n"));
        assert!(report.contains("  1 gluon 1 -> 2\n"));
        assert!(report.contains("selection: propagators/1\n"));
        assert!(report.contains("bounding box: (0, 0) - (40, 20) (40 x 20)\n"));
        assert!(report.contains("components: 1\n"));
    }

    #[test]
    fn test_empty_report() {
        let report = render_report(&Diagram::new(&AppConfig::default()));
        assert!(report.contains("selection: none\n"));
        assert!(report.contains("bounding box: none\n"));
        assert!(report.contains("components: 0\n"));
    }
}
