// SPDX-License-Identifier: MIT OR Apache-2.0
//! Scripted checkout session exercising the choreography layer.

use crate::error::Result;
use crate::form_controller::FormController;
use crate::presentation_controller::{LayoutEvent, PresentationController};
use checkout_choreo_animation::{AnimationScheduler, ChoreographyConfig, TimedAnimator};
use checkout_choreo_presentation::{
    ContentNode, DeviceClass, Dimensions, Orientation, PresentationGeometry, Rect, Size,
};
use std::path::Path;

/// Load configuration and play one scripted session
pub fn run(choreography_path: Option<&str>, dimensions_path: Option<&str>) -> Result<()> {
    let config = match choreography_path {
        Some(path) => ChoreographyConfig::load(Path::new(path))?,
        None => ChoreographyConfig::default(),
    };
    let dimensions = match dimensions_path {
        Some(path) => Dimensions::load(Path::new(path))?,
        None => Dimensions::default(),
    };
    tracing::debug!("Using {:?} and {:?}", config, dimensions);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let scheduler = AnimationScheduler::from_current(TimedAnimator, config)?;
        present_panel(dimensions)?;
        validate_form(scheduler).await
    })
}

/// Lay the panel out through a rotation and a keyboard cycle
fn present_panel(dimensions: Dimensions) -> Result<()> {
    let content = ContentNode::container("drop-in")
        .with_child(ContentNode::container("payment-methods"))
        .with_child(ContentNode::form("card", true));
    let geometry = PresentationGeometry::new(
        Rect::new(0.0, 0.0, 390.0, 844.0),
        DeviceClass::Phone,
        Orientation::Portrait,
    )
    .with_display_scale(3.0)
    .with_safe_area_bottom_inset(34.0)
    .with_desired_content_size(Size::new(390.0, 420.0));

    let mut controller = PresentationController::new(geometry, dimensions, &content);
    print_snapshot("presented", &controller)?;

    let events = [
        ("keyboard shown", LayoutEvent::KeyboardChanged { height: 336.0 }),
        ("content grew", LayoutEvent::ContentSizeChanged(Size::new(390.0, 560.0))),
        ("keyboard hidden", LayoutEvent::KeyboardChanged { height: 0.0 }),
        (
            "rotated",
            LayoutEvent::Rotated {
                orientation: Orientation::Landscape,
                container: Rect::new(0.0, 0.0, 844.0, 390.0),
            },
        ),
    ];
    for (label, event) in events {
        if controller.handle(event) {
            print_snapshot(label, &controller)?;
        } else {
            tracing::info!("{}: panel unchanged", label);
        }
    }
    tracing::debug!(
        "Final frame {:?} with constraints {:?}",
        controller.frame(),
        controller.constraints()
    );
    Ok(())
}

/// Fire a burst of validation feedback at one error label
async fn validate_form(scheduler: AnimationScheduler) -> Result<()> {
    let form = FormController::new(scheduler);

    let revealed = form.show_validation_error("Invalid card number");
    let shaken = form.shake();
    let corrected = form.show_validation_error("Card expired");
    let hidden = form.hide_validation_error();
    tracing::debug!("Error label busy: {}", form.is_animating());

    for (label, rx) in [
        ("reveal", revealed),
        ("shake", shaken),
        ("correct", corrected),
        ("hide", hidden),
    ] {
        let finished = rx.await.unwrap_or(false);
        tracing::info!("{} finished: {} (label: {:?})", label, finished, form.label());
    }
    Ok(())
}

fn print_snapshot(label: &str, controller: &PresentationController) -> Result<()> {
    let json = serde_json::to_string(&controller.snapshot())?;
    println!("{label}: {json}");
    Ok(())
}
