pub mod chrom_sizes;
pub mod depth_block;
pub mod depth_track;
pub mod window;

// re-export for cleaner imports
pub use self::chrom_sizes::ChromSizes;
pub use self::depth_block::DepthBlock;
pub use self::depth_track::DepthTrack;
pub use self::window::Window;
