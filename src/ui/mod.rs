pub mod legend;
pub mod tooltip;

#[cfg(feature = "egui")]
pub mod widget;
