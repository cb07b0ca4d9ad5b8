use std::collections::{BTreeMap, HashMap, HashSet};

use ndarray::{Array1, Array2};

use super::tokenizer::Tokenizer;
use crate::error::{FeatureError, Result};

// ---------------------------------------------------------------------------
// TfidfVectorizer – unfitted configuration
// ---------------------------------------------------------------------------

/// TF-IDF vectorizer with a bounded vocabulary.
///
/// * terms are ranked by total count over the fitting corpus (ties broken
///   alphabetically) and the top `max_features` are kept;
/// * features are ordered alphabetically;
/// * idf is smoothed: `ln((1 + n) / (1 + df)) + 1`;
/// * each output row is the raw term count times idf, L2-normalized.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    tokenizer: Tokenizer,
    max_features: usize,
}

impl TfidfVectorizer {
    pub fn new(max_features: usize) -> Self {
        Self {
            tokenizer: Tokenizer::default(),
            max_features,
        }
    }

    /// Learn the vocabulary and idf weights from `docs`.
    pub fn fit<S: AsRef<str>>(&self, docs: &[S]) -> Result<FittedTfidf> {
        if self.max_features == 0 {
            return Err(FeatureError::Transform(
                "max_features must be a positive integer".to_string(),
            ));
        }

        // term -> (total count, document frequency)
        let mut stats: HashMap<String, (usize, usize)> = HashMap::new();
        for doc in docs {
            let tokens = self.tokenizer.tokenize(doc.as_ref());
            let mut seen: HashSet<&str> = HashSet::new();
            for token in &tokens {
                let entry = stats.entry(token.clone()).or_insert((0, 0));
                entry.0 += 1;
                if seen.insert(token.as_str()) {
                    entry.1 += 1;
                }
            }
        }

        if stats.is_empty() {
            return Err(FeatureError::Transform(
                "empty vocabulary; the training text contains no tokens".to_string(),
            ));
        }

        let mut ranked: Vec<(String, usize, usize)> = stats
            .into_iter()
            .map(|(term, (total, df))| (term, total, df))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(self.max_features);

        // Alphabetical feature order
        ranked.sort_by(|a, b| a.0.cmp(&b.0));

        let n = docs.len() as f64;
        let mut vocabulary = BTreeMap::new();
        let mut terms = Vec::with_capacity(ranked.len());
        let mut idf = Vec::with_capacity(ranked.len());
        for (idx, (term, _, df)) in ranked.into_iter().enumerate() {
            idf.push(((1.0 + n) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term.clone(), idx);
            terms.push(term);
        }

        Ok(FittedTfidf {
            tokenizer: self.tokenizer.clone(),
            vocabulary,
            terms,
            idf: Array1::from(idf),
        })
    }
}

// ---------------------------------------------------------------------------
// FittedTfidf – frozen vocabulary and idf
// ---------------------------------------------------------------------------

/// A fitted vectorizer. Transforming never changes the vocabulary.
#[derive(Debug, Clone)]
pub struct FittedTfidf {
    tokenizer: Tokenizer,
    vocabulary: BTreeMap<String, usize>,
    terms: Vec<String>,
    idf: Array1<f64>,
}

impl FittedTfidf {
    /// Map documents to a `(documents, terms)` matrix. Tokens outside the
    /// vocabulary are ignored.
    pub fn transform<S: AsRef<str>>(&self, docs: &[S]) -> Array2<f64> {
        let mut matrix = Array2::zeros((docs.len(), self.terms.len()));

        for (doc_idx, doc) in docs.iter().enumerate() {
            for token in self.tokenizer.tokenize(doc.as_ref()) {
                if let Some(&term_idx) = self.vocabulary.get(&token) {
                    matrix[[doc_idx, term_idx]] += 1.0;
                }
            }

            let mut row = matrix.row_mut(doc_idx);
            row *= &self.idf;
            let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                row.mapv_inplace(|v| v / norm);
            }
        }

        matrix
    }

    /// Feature names in column order.
    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    pub fn idf(&self) -> &Array1<f64> {
        &self.idf
    }
}
