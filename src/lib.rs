//! This crate implements a content-addressed model of git objects,
//! centered on commits: their canonical encoding, the derivation of
//! their object IDs, and lazy resolution of the trees and parents
//! they reference through an abstract object store.

pub mod object;
pub mod repo;
