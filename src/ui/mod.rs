/// UI support module
///
/// Presentation math that the view builds on:
/// - Grid geometry and scroll windowing (grid.rs)

pub mod grid;
