//! Regression trees and the random-forest ensemble.
//!
//! Implements CART regression trees with a mean-squared-error split
//! criterion and a bagged forest that averages tree predictions. The forest
//! is the model behind the severity score: trained once on encoded survey
//! features, then queried row-by-row at inference time.
//!
//! # Example
//!
//! ```
//! use sondeo::tree::RandomForestRegressor;
//! use sondeo::primitives::{Matrix, Vector};
//! use sondeo::traits::Estimator;
//!
//! let x = Matrix::from_vec(5, 1, vec![1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//! let y = Vector::from_slice(&[2.0, 4.0, 6.0, 8.0, 10.0]);
//!
//! let mut forest = RandomForestRegressor::new(10).with_random_state(42);
//! forest.fit(&x, &y).unwrap();
//! let predictions = forest.predict(&x);
//! assert_eq!(predictions.len(), 5);
//! ```

use crate::error::Result;
use crate::primitives::{Matrix, Vector};
use crate::traits::Estimator;
use serde::{Deserialize, Serialize};

/// Leaf of a regression tree: predicts the mean target of the samples that
/// reached it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Leaf {
    /// Predicted value (mean of training targets in this leaf)
    pub value: f32,
    /// Number of training samples in this leaf
    pub n_samples: usize,
}

/// Internal split node: samples with `feature <= threshold` go left.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Split {
    /// Index of the feature to split on
    pub feature_idx: usize,
    /// Threshold value for the split
    pub threshold: f32,
    /// Subtree for samples where feature <= threshold
    pub left: Box<TreeNode>,
    /// Subtree for samples where feature > threshold
    pub right: Box<TreeNode>,
}

/// A node in a regression tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TreeNode {
    /// Internal decision node
    Split(Split),
    /// Terminal node with a value prediction
    Leaf(Leaf),
}

impl TreeNode {
    /// Returns the depth of the tree rooted at this node.
    ///
    /// Leaves have depth 0, split nodes 1 + max(left, right).
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            TreeNode::Leaf(_) => 0,
            TreeNode::Split(split) => 1 + split.left.depth().max(split.right.depth()),
        }
    }
}

/// Decision tree regressor using the CART algorithm.
///
/// Splits greedily on the feature/threshold pair that most reduces the
/// weighted variance of the target; leaves predict the mean.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTreeRegressor {
    root: Option<TreeNode>,
    max_depth: Option<usize>,
    min_samples_split: usize,
    min_samples_leaf: usize,
}

impl DecisionTreeRegressor {
    /// Creates a regressor with default parameters (unbounded depth).
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: None,
            max_depth: None,
            min_samples_split: 2,
            min_samples_leaf: 1,
        }
    }

    /// Sets the maximum depth of the tree.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Sets the minimum number of samples required to split a node.
    #[must_use]
    pub fn with_min_samples_split(mut self, min_samples: usize) -> Self {
        self.min_samples_split = min_samples.max(2);
        self
    }

    /// Sets the minimum number of samples required at a leaf.
    #[must_use]
    pub fn with_min_samples_leaf(mut self, min_samples: usize) -> Self {
        self.min_samples_leaf = min_samples.max(1);
        self
    }

    /// Returns the fitted tree root, if any.
    #[must_use]
    pub fn root(&self) -> Option<&TreeNode> {
        self.root.as_ref()
    }

    /// Predicts the value for a single feature row.
    ///
    /// # Panics
    ///
    /// Panics if called before `fit()`.
    #[must_use]
    pub fn predict_one(&self, sample: &[f32]) -> f32 {
        let mut node = self.root.as_ref().expect("Model not fitted");
        loop {
            match node {
                TreeNode::Leaf(leaf) => return leaf.value,
                TreeNode::Split(split) => {
                    node = if sample[split.feature_idx] <= split.threshold {
                        &split.left
                    } else {
                        &split.right
                    };
                }
            }
        }
    }
}

impl Estimator for DecisionTreeRegressor {
    fn fit(&mut self, x: &Matrix<f32>, y: &Vector<f32>) -> Result<()> {
        let (n_rows, _) = x.shape();
        if n_rows != y.len() {
            return Err("Number of samples in X and y must match".into());
        }
        if n_rows == 0 {
            return Err("Cannot fit with zero samples".into());
        }

        self.root = Some(grow_tree(
            x,
            y.as_slice(),
            0,
            self.max_depth,
            self.min_samples_split,
            self.min_samples_leaf,
        ));
        Ok(())
    }

    fn predict(&self, x: &Matrix<f32>) -> Vector<f32> {
        let (n_samples, n_features) = x.shape();
        let mut predictions = Vec::with_capacity(n_samples);
        let mut sample = vec![0.0; n_features];

        for row in 0..n_samples {
            for (col, slot) in sample.iter_mut().enumerate() {
                *slot = x.get(row, col);
            }
            predictions.push(self.predict_one(&sample));
        }

        Vector::from_vec(predictions)
    }
}

impl Default for DecisionTreeRegressor {
    fn default() -> Self {
        Self::new()
    }
}

/// Random forest regressor: bagged CART trees with averaged predictions.
///
/// Each tree is trained on a bootstrap sample drawn with replacement. With
/// a fixed `random_state`, fitting is fully deterministic; tree `i` draws
/// its bootstrap from seed `random_state + i`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForestRegressor {
    trees: Vec<DecisionTreeRegressor>,
    n_estimators: usize,
    max_depth: Option<usize>,
    random_state: Option<u64>,
    n_features: usize,
}

impl RandomForestRegressor {
    /// Creates a forest with the given number of trees.
    #[must_use]
    pub fn new(n_estimators: usize) -> Self {
        Self {
            trees: Vec::new(),
            n_estimators,
            max_depth: None,
            random_state: None,
            n_features: 0,
        }
    }

    /// Sets the maximum depth for each tree.
    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Sets the random state for reproducible bootstrap sampling.
    #[must_use]
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self
    }

    /// Number of trees configured for this forest.
    #[must_use]
    pub fn n_estimators(&self) -> usize {
        self.n_estimators
    }

    /// True once the forest has been fitted.
    #[must_use]
    pub fn is_fitted(&self) -> bool {
        !self.trees.is_empty()
    }

    /// Predicts the value for a single feature row by averaging all trees.
    ///
    /// # Panics
    ///
    /// Panics if called before `fit()`.
    #[must_use]
    pub fn predict_one(&self, sample: &[f32]) -> f32 {
        assert!(
            self.is_fitted(),
            "Cannot predict with an unfitted forest. Call fit() first."
        );
        let total: f32 = self.trees.iter().map(|t| t.predict_one(sample)).sum();
        total / self.trees.len() as f32
    }

    /// Returns per-feature importances, normalized to sum to 1.0.
    ///
    /// Importance is the number of training samples routed through each
    /// feature's split nodes, aggregated over all trees. Returns `None`
    /// before fitting.
    #[must_use]
    pub fn feature_importances(&self) -> Option<Vec<f32>> {
        if !self.is_fitted() {
            return None;
        }

        let mut importances = vec![0.0_f32; self.n_features];
        for tree in &self.trees {
            if let Some(root) = tree.root() {
                accumulate_importances(root, &mut importances);
            }
        }

        let total: f32 = importances.iter().sum();
        if total > 0.0 {
            for value in &mut importances {
                *value /= total;
            }
        }

        Some(importances)
    }
}

impl Estimator for RandomForestRegressor {
    fn fit(&mut self, x: &Matrix<f32>, y: &Vector<f32>) -> Result<()> {
        let (n_samples, n_features) = x.shape();
        if n_samples != y.len() {
            return Err("Number of samples in X and y must match".into());
        }
        if n_samples == 0 {
            return Err("Cannot fit with zero samples".into());
        }

        self.n_features = n_features;
        self.trees = Vec::with_capacity(self.n_estimators);

        for i in 0..self.n_estimators {
            let seed = self.random_state.map(|s| s + i as u64);
            let indices = bootstrap_indices(n_samples, seed);
            let (boot_x, boot_y) = take_rows(x, y.as_slice(), &indices);

            let mut tree = DecisionTreeRegressor::new();
            if let Some(max_depth) = self.max_depth {
                tree = tree.with_max_depth(max_depth);
            }
            tree.fit(&boot_x, &boot_y)?;
            self.trees.push(tree);
        }

        Ok(())
    }

    fn predict(&self, x: &Matrix<f32>) -> Vector<f32> {
        assert!(
            self.is_fitted(),
            "Cannot predict with an unfitted forest. Call fit() first."
        );

        let (n_samples, n_features) = x.shape();
        let mut predictions = Vec::with_capacity(n_samples);
        let mut sample = vec![0.0; n_features];

        for row in 0..n_samples {
            for (col, slot) in sample.iter_mut().enumerate() {
                *slot = x.get(row, col);
            }
            predictions.push(self.predict_one(&sample));
        }

        Vector::from_vec(predictions)
    }
}

impl Default for RandomForestRegressor {
    fn default() -> Self {
        Self::new(100)
    }
}

// ========================================================================
// Tree building
// ========================================================================

fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f32>() / values.len() as f32
    }
}

fn variance(values: &[f32]) -> f32 {
    if values.len() <= 1 {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|&v| (v - m).powi(2)).sum::<f32>() / values.len() as f32
}

/// Weighted variance of a candidate split's two sides.
fn split_cost(y_left: &[f32], y_right: &[f32]) -> f32 {
    let n_left = y_left.len() as f32;
    let n_right = y_right.len() as f32;
    let n_total = n_left + n_right;
    if n_total == 0.0 {
        return 0.0;
    }
    (n_left * variance(y_left) + n_right * variance(y_right)) / n_total
}

/// Best (feature, threshold) pair by variance reduction, if any split helps.
fn best_split(x: &Matrix<f32>, y: &[f32]) -> Option<(usize, f32)> {
    let (n_samples, n_features) = x.shape();
    if n_samples < 2 {
        return None;
    }

    let parent_variance = variance(y);
    let mut best: Option<(usize, f32)> = None;
    let mut best_gain = 0.0_f32;

    for feature_idx in 0..n_features {
        let mut values: Vec<f32> = (0..n_samples).map(|i| x.get(i, feature_idx)).collect();
        values.sort_by(|a, b| a.partial_cmp(b).expect("feature values are comparable"));
        values.dedup();

        for pair in values.windows(2) {
            let threshold = (pair[0] + pair[1]) / 2.0;
            let mut y_left = Vec::new();
            let mut y_right = Vec::new();
            for (row, &target) in y.iter().enumerate() {
                if x.get(row, feature_idx) <= threshold {
                    y_left.push(target);
                } else {
                    y_right.push(target);
                }
            }
            if y_left.is_empty() || y_right.is_empty() {
                continue;
            }

            let gain = parent_variance - split_cost(&y_left, &y_right);
            if gain > best_gain {
                best_gain = gain;
                best = Some((feature_idx, threshold));
            }
        }
    }

    best
}

/// Recursively grow a CART regression tree.
fn grow_tree(
    x: &Matrix<f32>,
    y: &[f32],
    depth: usize,
    max_depth: Option<usize>,
    min_samples_split: usize,
    min_samples_leaf: usize,
) -> TreeNode {
    let n_samples = y.len();
    let depth_reached = max_depth.is_some_and(|max| depth >= max);

    if n_samples < min_samples_split || depth_reached || variance(y) < 1e-10 {
        return leaf(y);
    }

    let Some((feature_idx, threshold)) = best_split(x, y) else {
        return leaf(y);
    };

    let (left_idx, right_idx): (Vec<usize>, Vec<usize>) =
        (0..n_samples).partition(|&row| x.get(row, feature_idx) <= threshold);

    if left_idx.len() < min_samples_leaf || right_idx.len() < min_samples_leaf {
        return leaf(y);
    }

    let (left_x, left_y) = take_rows_slice(x, y, &left_idx);
    let (right_x, right_y) = take_rows_slice(x, y, &right_idx);

    TreeNode::Split(Split {
        feature_idx,
        threshold,
        left: Box::new(grow_tree(
            &left_x,
            &left_y,
            depth + 1,
            max_depth,
            min_samples_split,
            min_samples_leaf,
        )),
        right: Box::new(grow_tree(
            &right_x,
            &right_y,
            depth + 1,
            max_depth,
            min_samples_split,
            min_samples_leaf,
        )),
    })
}

fn leaf(y: &[f32]) -> TreeNode {
    TreeNode::Leaf(Leaf {
        value: mean(y),
        n_samples: y.len(),
    })
}

/// Extract the rows at `indices` into a new matrix and target slice.
fn take_rows_slice(x: &Matrix<f32>, y: &[f32], indices: &[usize]) -> (Matrix<f32>, Vec<f32>) {
    let n_features = x.shape().1;
    let mut data = Vec::with_capacity(indices.len() * n_features);
    let mut targets = Vec::with_capacity(indices.len());

    for &idx in indices {
        for col in 0..n_features {
            data.push(x.get(idx, col));
        }
        targets.push(y[idx]);
    }

    let matrix = Matrix::from_vec(indices.len(), n_features, data)
        .expect("row extraction preserves dimensions");
    (matrix, targets)
}

fn take_rows(x: &Matrix<f32>, y: &[f32], indices: &[usize]) -> (Matrix<f32>, Vector<f32>) {
    let (matrix, targets) = take_rows_slice(x, y, indices);
    (matrix, Vector::from_vec(targets))
}

/// Draw a bootstrap sample (with replacement) of row indices.
fn bootstrap_indices(n_samples: usize, seed: Option<u64>) -> Vec<usize> {
    use rand::distributions::{Distribution, Uniform};
    use rand::SeedableRng;

    let dist = Uniform::from(0..n_samples);
    let mut indices = Vec::with_capacity(n_samples);

    if let Some(seed) = seed {
        let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
        for _ in 0..n_samples {
            indices.push(dist.sample(&mut rng));
        }
    } else {
        let mut rng = rand::thread_rng();
        for _ in 0..n_samples {
            indices.push(dist.sample(&mut rng));
        }
    }

    indices
}

/// Accumulate sample-weighted split counts per feature.
fn accumulate_importances(node: &TreeNode, importances: &mut [f32]) {
    if let TreeNode::Split(split) = node {
        importances[split.feature_idx] += subtree_samples(node) as f32;
        accumulate_importances(&split.left, importances);
        accumulate_importances(&split.right, importances);
    }
}

fn subtree_samples(node: &TreeNode) -> usize {
    match node {
        TreeNode::Leaf(l) => l.n_samples,
        TreeNode::Split(split) => subtree_samples(&split.left) + subtree_samples(&split.right),
    }
}
