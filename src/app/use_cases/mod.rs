//! Use-Cases: fachliche Schritte auf dem `RoiState`.
//!
//! Handler rufen diese Funktionen auf; reine Geometrie-Schritte arbeiten
//! direkt auf einer `Measurement` und sind damit ohne State testbar.

pub mod create;
pub mod drag;
pub mod finish;
pub mod hover;
pub mod move_all;
pub mod move_handle;
pub mod pick;
pub mod statistics;
