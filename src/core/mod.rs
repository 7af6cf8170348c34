//! Core types shared by every module.
//!
//! - [`Cell`], [`State`] and [`GridSpec`] for cell addressing
//! - [`Heading`] and [`Bearing`] for orientation
//! - [`Action`], [`Percept`] and [`AgentView`] for the world contract

mod action;
mod cell;
mod heading;
mod percept;

pub use action::Action;
pub use cell::{Cell, GridSpec, State};
pub use heading::{Bearing, Heading};
pub use percept::{AgentView, Percept};
