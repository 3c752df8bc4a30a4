//! `sp-spatial` — the playground's dynamic spatial index.
//!
//! # Crate layout
//!
//! | Module    | Contents                                               |
//! |-----------|--------------------------------------------------------|
//! | [`index`] | `SpatialIndex` (R-tree + key map), `EntityKey`         |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                 |
//! |-----------|--------------------------------------------------------|
//! | `fx-hash` | Uses `rustc-hash` for the key → box map.               |
//! | `serde`   | Derives `Serialize`/`Deserialize` on `EntityKey`.      |

pub mod index;


pub use index::{EntityKey, SpatialIndex};
