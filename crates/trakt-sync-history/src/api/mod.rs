pub mod trakt;
