mod azure_neural_tts;
mod google_basic_tts;
mod mock_tts;

pub use azure_neural_tts::AzureNeuralTts;
pub use google_basic_tts::GoogleBasicTts;
pub use mock_tts::{MockBasicBackend, MockNeuralBackend};
