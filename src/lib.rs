//! # veb-arbor
//!
//! A van Emde Boas integer set over a fixed universe `[0, U)`, and a small
//! term taxonomy that hands out dense ids and indexes them with it.
//!
//! ## Example
//!
//! ```rust
//! use veb_arbor::VebTree;
//!
//! let mut set = VebTree::new(16)?;
//! for key in [5, 3, 11, 0, 7] {
//!     set.insert(key)?;
//! }
//!
//! assert!(set.contains(3));
//! assert!(!set.contains(4));
//! assert_eq!(set.enumerate(), vec![0, 3, 5, 7, 11]);
//! assert_eq!((set.min(), set.max()), (Some(0), Some(11)));
//! # Ok::<(), veb_arbor::IndexError>(())
//! ```
//!
//! Keys outside the universe are rejected rather than wrapped:
//!
//! ```rust
//! use veb_arbor::{IndexError, VebTree};
//!
//! let mut set = VebTree::new(4).unwrap();
//! assert_eq!(
//!     set.insert(4),
//!     Err(IndexError::KeyOutOfUniverse { key: 4, universe_size: 4 })
//! );
//! ```

pub mod error;
pub mod output;
pub mod samples;
pub mod taxonomy;
pub mod veb;
pub mod view;

pub use error::{ArborError, IndexError};
pub use taxonomy::Taxonomy;
pub use veb::{cluster_size, Iter, VebTree};
pub use view::{ClusterGroup, ClusterView};


#[cfg(test)]
mod proptests;
