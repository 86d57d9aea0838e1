//! Repository pattern for database access
//!
//! Each repo borrows the pool and returns plain records; relationships
//! are resolved with explicit joins.

pub mod artists;
pub mod shows;
pub mod venues;

pub use artists::ArtistRepo;
pub use shows::ShowRepo;
pub use venues::VenueRepo;
