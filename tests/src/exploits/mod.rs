//! # Relay Attacks
//!
//! A relay sits between gateway and resolver and holds a validly signed
//! response. These tests check that every way of reusing or reshaping that
//! response is refused by `resolveWithProof`.

pub mod relay;
