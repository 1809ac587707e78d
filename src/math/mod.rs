//! Arithmetic utilities for pair accounting.
//!
//! This module provides [`CheckedArithmetic`] for overflow-safe domain
//! arithmetic, 256-bit helpers for products of two reserves, integer
//! square roots for share issuance, the [`Uq112x112`] fixed-point type for
//! the price accumulators, and single-hop quoting.

mod checked;
mod quote;
mod sqrt;
mod uq112x112;

pub use checked::{mul_div, narrow, wide, CheckedArithmetic};
pub use quote::{get_amount_in, get_amount_out, quote};
pub use sqrt::isqrt_u256;
pub use uq112x112::Uq112x112;
