mod gemini_client;
mod google_translate;
mod mock_backend;
mod openai_compat_client;
mod prompt;

pub use gemini_client::GeminiTranslationBackend;
pub use google_translate::GoogleTranslateBackend;
pub use mock_backend::MockTranslationBackend;
pub use openai_compat_client::OpenAiCompatBackend;
pub use prompt::build_translation_prompt;
