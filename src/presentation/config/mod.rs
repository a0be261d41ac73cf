mod settings;

pub use settings::{
    AsrSettings, PipelineSettings, Settings, SpeechSettings, TranslationSettings,
};
