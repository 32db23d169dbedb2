//! Filesystem operations for each archive step.

mod atomic;
mod compress;
mod copy;
mod destination;
mod file_move;
mod helpers;
mod io_copy;
mod meta;
mod util;
mod verify;

pub use compress::{GZIP_SUFFIX, compress, compressed_path};
pub use destination::{DestinationStatus, ensure_destination};
pub use file_move::{ensure_vacant, move_file, validate_input};
pub use helpers::io_error_with_help;
pub use verify::verify;
