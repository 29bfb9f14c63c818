pub mod capture;
pub mod wav;

pub use capture::{CaptureError, MicCapture, Recorder, Recording};
pub use wav::{read_recording, write_recording};
