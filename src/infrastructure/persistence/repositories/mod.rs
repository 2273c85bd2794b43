mod in_memory_batch_repository;

pub use in_memory_batch_repository::InMemoryBatchRepository;
