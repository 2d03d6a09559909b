//! Runs both clash methods over a small sample model and prints the result.
//!
//! Usage:
//! ```text
//! cargo run --example scan                          # default configuration
//! cargo run --example scan -- clash.toml            # configuration from TOML
//! RUST_LOG=geoclash=debug cargo run --example scan  # per-stage logs
//! ```

use std::error::Error;
use std::sync::Arc;

use geoclash::clash::{Category, ClashDetector, Element, ElementId, GeometryNode, Model};
use geoclash::clash::{Method, RecordingSink, RectilinearKernel};
use geoclash::math::{Point3, Vector3};
use geoclash::operations::creation::{MakeBox, MakeSolid};
use geoclash::operations::transform::Placement;
use geoclash::topology::SolidId;
use geoclash::ClashConfig;

fn main() -> Result<(), Box<dyn Error>> {
    // Default: WARN for everything, INFO for geoclash.
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("geoclash=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = match std::env::args().nth(1) {
        Some(path) => ClashConfig::load(path)?,
        None => ClashConfig::default(),
    };

    let model = sample_model()?;
    let sink = Arc::new(RecordingSink::new());
    let detector = ClashDetector::new(RectilinearKernel)
        .with_config(config)
        .with_selection(sink.clone());

    for method in Method::ALL {
        let report = detector.detect(&model, method, None, false)?;
        let names: Vec<String> = report
            .sorted()
            .into_iter()
            .map(|id| label(&model, id))
            .collect();
        println!(
            "{method}: {} clashing ({} pairs, {} rejected) {names:?}",
            report.elements.len(),
            report.stats.pairs,
            report.stats.rejected,
        );
    }
    println!("selections forwarded: {}", sink.selections().len());
    Ok(())
}

fn label(model: &Model, id: ElementId) -> String {
    use geoclash::clash::ElementSource;
    model
        .element(id)
        .and_then(Element::name)
        .map_or_else(|| id.to_string(), ToString::to_string)
}

/// Two walls meeting at a corner, a slab under them, a duct ending inside one wall
/// and a pair of columns placed from one shared symbol.
fn sample_model() -> geoclash::Result<Model> {
    let mut model = Model::new();
    let solids = model.solids_mut();

    let north = MakeBox::new(Point3::new(0.0, 4.0, 0.0), Point3::new(6.0, 4.2, 3.0)).execute(solids)?;
    let east = MakeBox::new(Point3::new(6.0, 0.0, 0.0), Point3::new(6.2, 4.2, 3.0)).execute(solids)?;
    let slab = MakeBox::new(Point3::new(0.0, 0.0, -0.3), Point3::new(6.2, 4.2, 0.0)).execute(solids)?;
    let duct = MakeSolid::new(vec![
        (Point3::new(2.0, 3.0, 2.0), Point3::new(2.4, 4.1, 2.4)),
        (Point3::new(2.0, 2.6, 2.0), Point3::new(4.0, 3.0, 2.4)),
    ])
    .execute(solids)?;
    let column = MakeBox::new(Point3::origin(), Point3::new(0.3, 0.3, 3.0)).execute(solids)?;

    let column = Arc::new(GeometryNode::solid(column));
    let columns = GeometryNode::container(vec![
        GeometryNode::instance(Placement::translation(Vector3::new(1.0, 1.0, 0.0)), Arc::clone(&column)),
        GeometryNode::instance(Placement::new(1, Vector3::new(5.0, 1.0, 0.0)), column),
    ]);

    let depth = 64;
    let wall = |id: u64, name: &str, solid: SolidId| {
        Element::new(ElementId(id))
            .named(name)
            .with_category(Category::Walls)
            .with_geometry(GeometryNode::solid(solid))
    };
    model.add_fitted(wall(1, "North wall", north), depth);
    model.add_fitted(wall(2, "East wall", east), depth);
    model.add_fitted(
        Element::new(ElementId(3))
            .named("Ground slab")
            .with_category(Category::Floors)
            .with_geometry(GeometryNode::solid(slab)),
        depth,
    );
    model.add_fitted(
        Element::new(ElementId(4))
            .named("Supply duct")
            .with_category(Category::Ducts)
            .as_family_instance()
            .with_geometry(GeometryNode::solid(duct)),
        depth,
    );
    model.add_fitted(
        Element::new(ElementId(5))
            .named("Columns")
            .with_category(Category::Columns)
            .as_family_instance()
            .with_geometry(columns),
        depth,
    );
    Ok(model)
}
