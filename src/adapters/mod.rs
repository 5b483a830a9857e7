// Adapters - External system implementations

pub mod exec_process;
pub mod exec_scripted;
pub mod toml_config;
pub mod transcribe_openai;

// Re-export adapters
pub use exec_process::TokioProcessAdapter;
pub use exec_scripted::ScriptedProcessAdapter;
pub use toml_config::{AppConfig, TomlConfigAdapter};
pub use transcribe_openai::OpenAiTranscribeAdapter;
