pub mod classifier;
pub mod connection;
pub mod export;
pub mod palette;
pub mod pipeline;
pub mod registry;
pub mod report;

pub use classifier::CertaintyClassifier;
pub use connection::{build_connections, Connection};
pub use export::{output_paths, write_connections_csv, write_network_html, OutputPaths};
pub use palette::Palette;
pub use pipeline::{Analysis, Mention, Pipeline};
pub use registry::{EntityRegistry, MergePolicy};
pub use report::{render_report, render_summary};
