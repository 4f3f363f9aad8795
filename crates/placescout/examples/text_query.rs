//! Free-text query routing
//!
//! This example demonstrates the three routing paths:
//! - "near me" queries, gated on an explicit location confirmation
//! - place-name queries that recenter the view before searching
//! - generic queries anchored at the current map center

use std::sync::Arc;

use placescout::{
    Coordinate, FixtureLocator, FixtureProvider, MapController, PlaceResult, VecMarkerStore,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    placescout::init_logging(tracing::Level::INFO)?;

    let home = Coordinate::new(18.5204, 73.8567);
    let provider = FixtureProvider::new()
        .with_place(PlaceResult::new(
            "c1",
            Coordinate::new(18.52, 73.85),
            "Corner cafe",
            "FC Road, Pune",
        ))
        .with_place(PlaceResult::new(
            "d1",
            Coordinate::new(18.5314, 73.8446),
            "Shivajinagar depot",
            "near the station",
        ))
        .with_geocode("Shivajinagar", Coordinate::new(18.5314, 73.8446));

    let markers = Arc::new(VecMarkerStore::new());
    let controller = MapController::builder(
        Arc::new(provider),
        Arc::clone(&markers),
        Arc::new(FixtureLocator::at(home)),
    )
    .build();

    // "near me" before locating is rejected, with no provider call.
    match controller.on_search_submitted("cafe near me").await {
        Err(error) => println!("before locating: {error}"),
        Ok(_) => unreachable!("near me must be gated"),
    }

    // Locate, then try again.
    controller.on_locate().await?;
    let report = controller.on_search_submitted("cafe near me").await?;
    println!(
        "near-me search at {} emitted {} markers via {:?}",
        report.anchor, report.emitted, report.path
    );

    // A place name recenters the view first, then searches there.
    let report = controller.on_search_submitted("Shivajinagar").await?;
    println!(
        "place search at {} emitted {} markers via {:?} (viewport now {})",
        report.anchor,
        report.emitted,
        report.path,
        controller.viewport().center
    );

    Ok(())
}
