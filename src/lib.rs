#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;
#[cfg_attr(test, macro_use)]
extern crate serde_json;

pub mod error;
pub mod types;
pub mod matrix;
pub mod decomposition;
pub mod similarity;
pub mod ranking;
pub mod recommend;
pub mod encoders;
pub mod io;
pub mod utils;
mod usage_tests;

use serde_json::Value;

use crate::decomposition::Decomposition;
use crate::encoders::NameEncoder;
use crate::error::{Result, SvdRecError};
use crate::matrix::InteractionMatrix;
use crate::ranking::ScoredItem;
use crate::types::{DenseVector, ItemSet};

/// A recommendation session. It owns the interaction matrix, its decomposition and the optional
/// id encoders.
///
/// Loading a new matrix discards the current decomposition, so similarities and recommendations
/// are never computed from the factors of an older matrix. Recommendations use one-based user and
/// item ids, while the raw accessors `cell`, `row` and the similarity methods use zero-based
/// indices.
#[derive(Default)]
pub struct SvdRec {
    matrix: Option<InteractionMatrix>,
    decomposition: Option<Decomposition>,
    item_encoder: Option<NameEncoder>,
    user_encoder: Option<NameEncoder>,
}

impl SvdRec {

    pub fn new() -> Self {
        SvdRec::default()
    }

    pub fn with_matrix(matrix: InteractionMatrix) -> Self {
        let mut session = SvdRec::new();
        session.set_matrix(matrix);
        session
    }

    pub fn set_matrix(&mut self, matrix: InteractionMatrix) {
        info!("Created matrix of shape: {:?}", matrix.shape());

        if self.decomposition.take().is_some() {
            info!("Discarding the decomposition of the previous matrix");
        }

        self.matrix = Some(matrix);
    }

    pub fn load_dense<R: AsRef<[f64]>>(&mut self, rows: &[R]) -> Result<()> {
        let matrix = InteractionMatrix::from_dense(rows)?;
        self.set_matrix(matrix);
        Ok(())
    }

    pub fn load_triplets<T>(&mut self, triplets: T) -> Result<()>
        where T: IntoIterator<Item=(usize, usize, f64)> {

        let matrix = InteractionMatrix::from_triplets(triplets)?;
        self.set_matrix(matrix);
        Ok(())
    }

    /// Reads `rowID, colID, value, ...` lines from a CSV file, skipping `skip_rows` header lines.
    pub fn load_csv(&mut self, file: &str, delimiter: u8, skip_rows: usize) -> Result<()> {
        let matrix = io::read_matrix(file, delimiter, skip_rows)?;
        self.set_matrix(matrix);
        Ok(())
    }

    pub fn matrix(&self) -> Result<&InteractionMatrix> {
        self.matrix.as_ref().ok_or(SvdRecError::NoDataLoaded)
    }

    pub fn shape(&self) -> Result<(usize, usize)> {
        Ok(self.matrix()?.shape())
    }

    pub fn cell(&self, row: usize, col: usize) -> Result<f64> {
        self.matrix()?.cell(row, col)
    }

    pub fn row(&self, row: usize) -> Result<DenseVector> {
        self.matrix()?.row(row)
    }

    /// Computes the truncated SVD of the loaded matrix. Without a `rank`, we keep
    /// `min(num_users, num_items) - 1` dimensions.
    pub fn decompose(&mut self, rank: Option<usize>) -> Result<&Decomposition> {
        let decomposition = Decomposition::compute(self.matrix()?, rank)?;
        Ok(self.decomposition.insert(decomposition))
    }

    pub fn is_decomposed(&self) -> bool {
        self.decomposition.is_some()
    }

    pub fn decomposition(&self) -> Result<&Decomposition> {
        self.decomposition.as_ref().ok_or(SvdRecError::DecompositionRequired)
    }

    pub fn item_similarity(&self, item_a: usize, item_b: usize) -> Result<f64> {
        similarity::item_similarity(self.decomposition()?, item_a, item_b)
    }

    pub fn user_similarity(&self, user_a: usize, user_b: usize) -> Result<f64> {
        similarity::user_similarity(self.decomposition()?, user_a, user_b)
    }

    /// Latent affinity of `user` for `item`, which doubles as the predicted rating.
    pub fn user_item_score(&self, user: usize, item: usize) -> Result<f64> {
        similarity::user_item_score(self.decomposition()?, user, item)
    }

    pub fn similar_items(&self, item_id: usize, count: usize) -> Result<Vec<usize>> {
        Ok(ids(self.similar_items_scored(item_id, count)?))
    }

    pub fn similar_items_scored(&self, item_id: usize, count: usize) -> Result<Vec<ScoredItem>> {
        recommend::similar_items(self.decomposition()?, item_id, count)
    }

    pub fn recommend_for_user(&self, user_id: usize, count: usize) -> Result<Vec<usize>> {
        Ok(ids(self.recommend_for_user_scored(user_id, count)?))
    }

    pub fn recommend_for_user_scored(&self, user_id: usize, count: usize) -> Result<Vec<ScoredItem>> {
        recommend::recommend_for_user(self.decomposition()?, user_id, count)
    }

    pub fn recommend_from_nearest_neighbors(
        &self,
        user_id: usize,
        neighbor_count: usize,
    ) -> Result<ItemSet> {
        let decomposition = self.decomposition()?;
        recommend::recommend_from_nearest_neighbors(
            self.matrix()?, decomposition, user_id, neighbor_count)
    }

    pub fn set_item_encoder(&mut self, encoder: NameEncoder) {
        self.item_encoder = Some(encoder);
    }

    pub fn set_user_encoder(&mut self, encoder: NameEncoder) {
        self.user_encoder = Some(encoder);
    }

    /// Expects a JSON object of the form `{"itemID": "item name"}`.
    pub fn load_item_encoder(&mut self, mapping: &Value) -> Result<()> {
        self.set_item_encoder(NameEncoder::from_json(mapping)?);
        Ok(())
    }

    /// Expects a JSON object of the form `{"userID": "user name"}`.
    pub fn load_user_encoder(&mut self, mapping: &Value) -> Result<()> {
        self.set_user_encoder(NameEncoder::from_json(mapping)?);
        Ok(())
    }

    pub fn item_name(&self, item_id: usize) -> String {
        encoders::lookup(self.item_encoder.as_ref(), item_id, "item", encoders::NO_ITEM_ENCODER)
    }

    pub fn user_name(&self, user_id: usize) -> String {
        encoders::lookup(self.user_encoder.as_ref(), user_id, "user", encoders::NO_USER_ENCODER)
    }
}

fn ids(scored_items: Vec<ScoredItem>) -> Vec<usize> {
    scored_items.into_iter().map(|scored_item| scored_item.item).collect()
}
