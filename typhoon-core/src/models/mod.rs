pub mod gene;
pub mod read;
pub mod window;

// re-export for cleaner imports
pub use self::gene::{GeneBody, read_gene_bodies};
pub use self::read::ReadRecord;
pub use self::window::GenomicWindow;
