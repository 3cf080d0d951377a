/// Chess domain types.
pub mod chess;
/// The interactive session state machine.
pub mod session;
/// Board views, camera geometry, and scene descriptors.
pub mod view;
