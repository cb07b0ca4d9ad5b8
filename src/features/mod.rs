//! TF-IDF feature extraction.
//!
//! `tokenizer` splits text into terms, `tfidf` fits and applies the bounded
//! vocabulary, and `stage` turns train/test tables into feature tables.

pub mod stage;
pub mod tfidf;
pub mod tokenizer;
