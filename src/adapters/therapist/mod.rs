//! Therapist service adapters.

mod mock_directory;
mod rest_client;

pub use mock_directory::MockTherapistDirectory;
pub use rest_client::RestTherapistDirectory;
