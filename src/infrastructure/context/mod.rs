mod file_context_repository;

pub use file_context_repository::FileContextRepository;
