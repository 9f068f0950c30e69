pub mod controller;
pub mod presets;
pub mod probe;
pub mod voice;

pub use controller::{ChatController, RejectReason, TurnOutcome};
pub use probe::{refresh_connectivity, spawn_probe};
pub use voice::{AudioRecorder, VoiceCapture};
