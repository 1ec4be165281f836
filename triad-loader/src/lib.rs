//! # Triad Program Loader
//!
//! Populate program memory from a byte stream before execution begins.
//!
//! The loader reads bytes one at a time until the encoding's sentinel
//! terminator, which is not stored. An optional leading `b'#'` selects the
//! numeric encoding; any other first byte leaves the symbolic encoding in
//! force and is retained as program data. Opcode positions (every third
//! word) are mapped through the encoding table into canonical values, so
//! the dispatch loop never sees encoding-specific bytes.
//!
//! The loader consumes exactly the program's bytes: the same stream can
//! then feed the VM's INPUT and READ_BLOCK instructions at run time.
//!
//! ## Example
//!
//! ```rust
//! use std::io::Cursor;
//! use triad_loader::load_program;
//!
//! let mut stream = Cursor::new(b"h00x".to_vec());
//! let (program, mode) = load_program(&mut stream).unwrap();
//! assert_eq!(mode, triad_spec::EncodingMode::Symbolic);
//! assert_eq!(program.instruction_count(), 1);
//! ```

pub mod error;
pub mod loader;

pub use error::{LoaderError, Result};
pub use loader::load_program;
