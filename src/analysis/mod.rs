pub mod map_stats;
pub mod summary;
