mod gemini;
mod unconfigured;

pub use gemini::GeminiProvider;
pub use unconfigured::UnconfiguredProvider;
