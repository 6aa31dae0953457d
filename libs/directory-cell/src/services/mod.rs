pub mod provider;
pub mod search;
pub mod seed;

pub use provider::{InMemoryDirectory, ReferenceDataProvider};
pub use search::DirectoryService;
pub use seed::{demo_directory, directory_from_seed, load_directory_seed};
