//! Intake wizard — a linear, step-by-step brief form.
//!
//! The controller owns the brief and the current step. The presentation
//! layer sends it [`WizardEvent`]s and renders the [`WizardView`] it hands
//! back; a successful submission moves the wizard to the confirm step and
//! opens the scheduling widget.

pub mod controller;
pub mod scheduling;
pub mod step;

pub use controller::{FieldView, SchedulingView, WizardController, WizardEvent, WizardView};
pub use scheduling::{EmbedStatus, SchedulingEmbed};
pub use step::WizardStep;
