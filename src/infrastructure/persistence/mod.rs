mod repositories;

pub use repositories::InMemoryBatchRepository;
