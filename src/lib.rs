pub mod game_theory;
pub mod games;
#[cfg(feature = "instrumentation")]
pub mod instrumentation;
pub mod prelude;
