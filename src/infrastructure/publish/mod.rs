mod local_publisher;
mod mock_publisher;

pub use local_publisher::LocalPublisher;
pub use mock_publisher::MockPublisher;
