pub mod date_repository;
pub mod organization_repository;
pub mod quote_repository;

// Re-export all repositories for convenient access
pub use date_repository::DateRepository;
pub use organization_repository::OrganizationRepository;
pub use quote_repository::QuoteRepository;
