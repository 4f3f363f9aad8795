//! Keyword proximity search
//!
//! This example demonstrates the nearby-search session:
//! - Wiring a controller over a canned in-memory provider
//! - The keyword fan-out triggered by the map idle event
//! - How the zoom tier changes the marker cap

use std::sync::Arc;

use placescout::{
    Coordinate, FixtureLocator, FixtureProvider, MapController, PlaceResult, VecMarkerStore,
    Viewport,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    placescout::init_logging(tracing::Level::INFO)?;

    let center = Coordinate::new(18.5204, 73.8567);
    let provider = FixtureProvider::new()
        .with_place(PlaceResult::new(
            "e1",
            Coordinate::new(18.53, 73.85),
            "Bhosari industrial estate",
            "Bhosari, Pune",
        ))
        .with_place(PlaceResult::new(
            "e2",
            Coordinate::new(18.51, 73.86),
            "Deccan warehouse",
            "Deccan, Pune",
        ))
        .with_place(PlaceResult::new(
            "e3",
            Coordinate::new(18.60, 73.78),
            "Hinjewadi manufacturing works",
            "Hinjewadi, Pune",
        ));

    let markers = Arc::new(VecMarkerStore::new());
    let controller = MapController::builder(
        Arc::new(provider),
        Arc::clone(&markers),
        Arc::new(FixtureLocator::at(center)),
    )
    .build();

    // The map idle event kicks off one nearby search per keyword.
    let emitted = controller.on_map_idle().await;
    println!("District view emitted {emitted} markers:");
    for marker in markers.snapshot() {
        println!("  {} ({}) - {}", marker.title, marker.coordinate, marker.description);
    }

    // Street zoom shrinks the radius: the far-off sites drop out.
    controller.set_viewport(Viewport::new(center, 16));
    let emitted = controller.on_map_idle().await;
    println!("\nStreet view emitted {emitted} markers:");
    for marker in markers.snapshot() {
        println!("  {} ({})", marker.title, marker.coordinate);
    }

    Ok(())
}
