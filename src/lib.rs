//! Read, write, and build GFA1 graphs.
//!
//! The [`gfa`] module holds the data model, [`parser`] and [`writer`]
//! the text codec, and [`msa`] turns a multiple sequence alignment
//! into a compacted variation graph.

pub mod cigar;
pub mod gfa;
pub mod mmap;
pub mod msa;
pub mod optfields;
pub mod parser;
pub mod writer;
