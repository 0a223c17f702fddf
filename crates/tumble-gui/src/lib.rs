//! Graphical front end for Tumble.
//!
//! A macroquad window showing the die and its "Roll the dice" button on a
//! virtual canvas. Haptic pulses become a short screen shake.

pub mod app;
pub mod haptics;
pub mod input;
pub mod theme;
pub mod widget;
