//! # qrmini
//!
//! A small QR code generator for short payloads such as room join links. It turns a byte
//! string into a square grid of dark and light modules that any standard QR reader decodes
//! back to the same bytes.
//!
//! The profile is fixed:
//!
//! - **Encoding**: byte mode only, any byte value is accepted
//! - **Error correction**: level L (~7% recovery)
//! - **Versions**: 1 to 6, i.e. 21x21 to 41x41 modules, up to 134 bytes of data
//! - **Mask**: checkerboard (pattern 000), no penalty-based mask selection
//!
//! Rendering is left to the caller. A quiet zone of 4 light modules around the grid is
//! recommended.
//!
//! ## Quick Start
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let grid = qrmini::generate("https://example.com/join?room=QX7P")?;
//!
//! assert_eq!(grid.len(), 29);  // version 3
//! for row in &grid {
//!     let line: String = row.iter().map(|&dark| if dark { '█' } else { ' ' }).collect();
//!     println!("{line}");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Builder
//!
//! ```rust
//! use qrmini::{QRBuilder, Version};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let qr = QRBuilder::new(b"CYBERSHIELD")
//!     .version(Version::new(2).unwrap())  // if not provided, finds smallest version to fit data
//!     .build()?;
//!
//! assert_eq!(qr.width(), 25);
//! assert!(qr.is_dark(0, 0));
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Data longer than [`MAX_DATA_LEN`] bytes, or longer than a forced version can hold, fails with
//! [`QRError::CapacityExceeded`]. No partial grid is ever returned.

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;

pub use builder::{QRBuilder, QR};
pub use common::codec::MAX_DATA_LEN;
pub use common::error::{QRError, QRResult};
pub use common::mask::MaskPattern;
pub use common::metadata::{Version, MAX_VERSION, MIN_VERSION};

/// Encodes `data` into the smallest fitting symbol and returns its modules row by row,
/// `true` for dark.
pub fn generate(data: impl AsRef<[u8]>) -> QRResult<Vec<Vec<bool>>> {
    let qr = QRBuilder::new(data.as_ref()).build()?;
    Ok(qr.to_bool_grid())
}
