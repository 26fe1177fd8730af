pub mod block;
pub mod drop;
pub mod export;
pub mod init;

pub use block::{block, BlockArgs};
pub use drop::{drop_block, DropArgs};
pub use export::{export, ExportArgs};
pub use init::{init, InitArgs};
