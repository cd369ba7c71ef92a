//! Cox-Ross-Rubinstein lattice.

use lattice_core::{LatticeError, LatticeResult, MarketInputs, OptionSpec};

/// Per-step parameters of a CRR lattice.
///
/// Up and down factors are reciprocal (`d = 1 / u`), so the lattice
/// recombines: node `(i, j)` after `j` up-moves and `i - j` down-moves sits
/// at `spot * u^j * d^(i - j)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrrParameters {
    /// Time step in years.
    pub dt: f64,
    /// Log of the up factor, `volatility * sqrt(dt)`.
    pub log_up: f64,
    /// Up factor `u`.
    pub up: f64,
    /// Down factor `d = 1 / u`.
    pub down: f64,
    /// Risk-neutral up probability `p`.
    pub probability: f64,
    /// One-step discount factor `exp(-r dt)`.
    pub discount: f64,
}

impl CrrParameters {
    /// Derives the lattice parameters for `steps` steps to expiry.
    ///
    /// # Formula
    ///
    /// ```text
    /// dt = T / steps
    /// u  = exp(vol * sqrt(dt)),  d = 1 / u
    /// p  = (exp((r - q) dt) - d) / (u - d)
    /// ```
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `volatility` is not strictly positive and finite or
    ///   `steps` is zero
    /// - `InvalidModel` if `p` falls outside `[0, 1]`
    pub fn new(
        spec: &OptionSpec,
        market: &MarketInputs,
        volatility: f64,
        steps: usize,
    ) -> LatticeResult<Self> {
        if !(volatility.is_finite() && volatility > 0.0) {
            return Err(LatticeError::invalid_input(
                "volatility",
                format!("must be positive and finite, got {volatility}"),
            ));
        }
        if steps == 0 {
            return Err(LatticeError::invalid_input("steps", "must be at least 1"));
        }

        let dt = spec.time_to_expiry() / steps as f64;
        let log_up = volatility * dt.sqrt();
        let up = log_up.exp();
        let down = 1.0 / up;
        let growth = (market.carry() * dt).exp();
        let probability = (growth - down) / (up - down);

        if !(probability.is_finite() && (0.0..=1.0).contains(&probability)) {
            return Err(LatticeError::invalid_model(probability, volatility, dt));
        }

        Ok(Self {
            dt,
            log_up,
            up,
            down,
            probability,
            discount: market.discount_factor(dt),
        })
    }

    /// Underlying levels of a `steps`-step lattice, `spot * u^k` for `k` in
    /// `-steps..=steps`, indexed by `k + steps`.
    ///
    /// Node `(i, j)` of the lattice sits at index `steps + 2j - i`. Each level
    /// is computed from its own exponent, clamped to [`MAX_LOG_LEVEL`]; nodes
    /// that far out carry no risk-neutral weight.
    pub fn underlying_levels(&self, spot: f64, steps: usize) -> Vec<f64> {
        let log_spot = spot.ln();
        let n = steps as f64;
        (0..=2 * steps)
            .map(|k| {
                let log_level = log_spot + (k as f64 - n) * self.log_up;
                log_level.min(MAX_LOG_LEVEL).exp()
            })
            .collect()
    }
}

/// Largest log underlying level represented in a lattice.
///
/// Keeps terminal payoffs, and their discounted sums, finite.
pub const MAX_LOG_LEVEL: f64 = 700.0;

/// Largest step count for which [`BinomialTree::build`] materialises every
/// node. A tree of `n` steps holds `(n + 1)(n + 2) / 2` nodes.
pub const MAX_TREE_STEPS: usize = 2_000;

/// A single lattice node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeNode {
    /// Underlying price at the node.
    pub underlying: f64,
    /// Option value at the node.
    pub value: f64,
}

/// A fully materialised CRR lattice.
///
/// Layer `i` holds `i + 1` nodes; node `j` of layer `i` is reached after `j`
/// up-moves. Its children are node `j + 1` (up) and node `j` (down) of layer
/// `i + 1`.
///
/// ```text
///                 [0,0]
///                /     \
///           [1,1]       [1,0]
///          /    \      /    \
///      [2,2]   [2,1]  [2,1]  [2,0]
/// ```
///
/// The tree is built for one pricing call and dropped afterwards. It is meant
/// for inspection; [`BinomialTreeEngine::price`](super::BinomialTreeEngine::price)
/// performs the same induction on a single rolling layer.
#[derive(Debug, Clone)]
pub struct BinomialTree {
    params: CrrParameters,
    layers: Vec<Vec<TreeNode>>,
}

impl BinomialTree {
    /// Builds the lattice and runs backward induction over every node.
    ///
    /// # Errors
    ///
    /// - `InvalidInput` if `steps` exceeds [`MAX_TREE_STEPS`]
    /// - the errors of [`CrrParameters::new`]
    pub fn build(
        spec: &OptionSpec,
        market: &MarketInputs,
        volatility: f64,
        steps: usize,
    ) -> LatticeResult<Self> {
        if steps > MAX_TREE_STEPS {
            return Err(LatticeError::invalid_input(
                "steps",
                format!("full trees are limited to {MAX_TREE_STEPS} steps, got {steps}"),
            ));
        }
        let params = CrrParameters::new(spec, market, volatility, steps)?;
        let levels = params.underlying_levels(market.spot(), steps);

        let mut layers: Vec<Vec<TreeNode>> = (0..=steps)
            .map(|i| {
                (0..=i)
                    .map(|j| TreeNode {
                        underlying: levels[steps + 2 * j - i],
                        value: 0.0,
                    })
                    .collect()
            })
            .collect();

        for node in &mut layers[steps] {
            node.value = spec.payoff(node.underlying);
        }

        let early_exercise = spec.exercise_style().allows_early_exercise();
        let up_weight = params.discount * params.probability;
        let down_weight = params.discount * (1.0 - params.probability);

        for i in (0..steps).rev() {
            let (current, next) = layers.split_at_mut(i + 1);
            let children = &next[0];
            for (j, node) in current[i].iter_mut().enumerate() {
                let continuation =
                    up_weight * children[j + 1].value + down_weight * children[j].value;
                node.value = if early_exercise {
                    continuation.max(spec.payoff(node.underlying))
                } else {
                    continuation
                };
            }
        }

        Ok(Self { params, layers })
    }

    /// Number of time steps.
    pub fn steps(&self) -> usize {
        self.layers.len() - 1
    }

    /// Lattice parameters.
    pub fn parameters(&self) -> &CrrParameters {
        &self.params
    }

    /// Nodes of layer `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i > steps`.
    pub fn layer(&self, i: usize) -> &[TreeNode] {
        &self.layers[i]
    }

    /// Node `j` of layer `i`, if it exists.
    pub fn node(&self, i: usize, j: usize) -> Option<&TreeNode> {
        self.layers.get(i).and_then(|layer| layer.get(j))
    }

    /// Option value at the root, the theoretical price.
    pub fn root_value(&self) -> f64 {
        self.layers[0][0].value
    }

    /// Returns true if immediate exercise beats continuation at node `(i, j)`.
    pub fn is_exercised(&self, spec: &OptionSpec, i: usize, j: usize) -> bool {
        if i >= self.steps() || !spec.exercise_style().allows_early_exercise() {
            return false;
        }
        self.node(i, j).is_some_and(|node| {
            let intrinsic = spec.payoff(node.underlying);
            intrinsic > 0.0 && node.value <= intrinsic
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use lattice_core::OptionType;

    fn market() -> MarketInputs {
        MarketInputs::new(100.0, 0.05, 0.0).unwrap()
    }

    #[test]
    fn test_parameters() {
        let spec = OptionSpec::american(OptionType::Call, 100.0, 1.0).unwrap();
        let params = CrrParameters::new(&spec, &market(), 0.2, 4).unwrap();

        assert_relative_eq!(params.dt, 0.25);
        assert_relative_eq!(params.up, (0.2 * 0.5_f64).exp(), epsilon = 1e-15);
        assert_relative_eq!(params.up * params.down, 1.0, epsilon = 1e-15);

        let growth = (0.05 * 0.25_f64).exp();
        let expected_p = (growth - params.down) / (params.up - params.down);
        assert_relative_eq!(params.probability, expected_p, epsilon = 1e-15);
        assert_relative_eq!(params.discount, (-0.05 * 0.25_f64).exp(), epsilon = 1e-15);
    }

    #[test]
    fn test_probability_out_of_range() {
        // Drift far larger than the volatility step
        let market = MarketInputs::new(100.0, 0.5, 0.0).unwrap();
        let spec = OptionSpec::american(OptionType::Call, 100.0, 1.0).unwrap();

        let err = CrrParameters::new(&spec, &market, 0.01, 1).unwrap_err();

        match err {
            LatticeError::InvalidModel { probability, .. } => assert!(probability > 1.0),
            other => panic!("expected InvalidModel, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_probability() {
        // Dividend yield far above the rate pushes p below zero
        let market = MarketInputs::new(100.0, 0.0, 0.5).unwrap();
        let spec = OptionSpec::american(OptionType::Put, 100.0, 1.0).unwrap();

        let err = CrrParameters::new(&spec, &market, 0.01, 1).unwrap_err();

        assert!(matches!(err, LatticeError::InvalidModel { probability, .. } if probability < 0.0));
    }

    #[test]
    fn test_invalid_volatility() {
        let spec = OptionSpec::american(OptionType::Call, 100.0, 1.0).unwrap();
        for vol in [0.0, -0.2, f64::NAN] {
            let err = CrrParameters::new(&spec, &market(), vol, 10).unwrap_err();
            assert!(matches!(err, LatticeError::InvalidInput { field: "volatility", .. }));
        }
    }

    #[test]
    fn test_tree_shape() {
        let spec = OptionSpec::european(OptionType::Call, 100.0, 1.0).unwrap();
        let tree = BinomialTree::build(&spec, &market(), 0.2, 5).unwrap();

        assert_eq!(tree.steps(), 5);
        for i in 0..=5 {
            assert_eq!(tree.layer(i).len(), i + 1);
        }
        assert!(tree.node(5, 6).is_none());
        assert!(tree.node(6, 0).is_none());
    }

    #[test]
    fn test_recombining_nodes() {
        let spec = OptionSpec::european(OptionType::Call, 100.0, 1.0).unwrap();
        let tree = BinomialTree::build(&spec, &market(), 0.2, 4).unwrap();
        let params = *tree.parameters();

        assert_relative_eq!(tree.layer(0)[0].underlying, 100.0, epsilon = 1e-12);

        // up then down returns to the starting level
        assert_relative_eq!(tree.layer(2)[1].underlying, 100.0, epsilon = 1e-12);

        let top = tree.layer(4)[4].underlying;
        assert_relative_eq!(top, 100.0 * params.up.powi(4), max_relative = 1e-12);
    }

    #[test]
    fn test_underlying_levels() {
        let spec = OptionSpec::european(OptionType::Call, 100.0, 1.0).unwrap();
        let params = CrrParameters::new(&spec, &market(), 0.2, 4).unwrap();
        let levels = params.underlying_levels(100.0, 4);

        assert_eq!(levels.len(), 9);
        assert_relative_eq!(levels[4], 100.0, max_relative = 1e-14);
        for (k, level) in levels.iter().enumerate() {
            let expected = 100.0 * params.up.powi(k as i32 - 4);
            assert_relative_eq!(*level, expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_extreme_levels_stay_representable() {
        // 20,000 steps at 300% volatility over ten years spans about e^1342
        let spec = OptionSpec::european(OptionType::Call, 100.0, 10.0).unwrap();
        let params = CrrParameters::new(&spec, &market(), 3.0, 20_000).unwrap();
        let levels = params.underlying_levels(100.0, 20_000);

        assert!(levels.iter().all(|level| level.is_finite()));
        assert_relative_eq!(levels[20_000], 100.0, max_relative = 1e-12);
        assert_relative_eq!(levels[40_000], MAX_LOG_LEVEL.exp());
        assert_relative_eq!(levels[20_001], 100.0 * params.up, max_relative = 1e-12);
        assert!(levels[0] >= 0.0);
    }

    #[test]
    fn test_tree_step_limit() {
        let spec = OptionSpec::european(OptionType::Call, 100.0, 1.0).unwrap();

        let err = BinomialTree::build(&spec, &market(), 0.2, MAX_TREE_STEPS + 1).unwrap_err();

        assert!(matches!(err, LatticeError::InvalidInput { field: "steps", .. }));
    }

    #[test]
    fn test_terminal_payoff() {
        let spec = OptionSpec::european(OptionType::Put, 100.0, 1.0).unwrap();
        let tree = BinomialTree::build(&spec, &market(), 0.3, 6).unwrap();

        for node in tree.layer(6) {
            assert_relative_eq!(node.value, (100.0 - node.underlying).max(0.0));
        }
    }

    #[test]
    fn test_one_step_by_hand() {
        let spec = OptionSpec::european(OptionType::Call, 100.0, 1.0).unwrap();
        let tree = BinomialTree::build(&spec, &market(), 0.2, 1).unwrap();
        let params = tree.parameters();

        let up_value = 100.0 * params.up - 100.0;
        let expected = params.discount * params.probability * up_value;
        assert_relative_eq!(tree.root_value(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_american_put_exercises_deep_in_the_money() {
        let spec = OptionSpec::american(OptionType::Put, 100.0, 1.0).unwrap();
        let tree = BinomialTree::build(&spec, &market(), 0.2, 50).unwrap();

        // Bottom node one step before expiry is deep in the money
        assert!(tree.is_exercised(&spec, 49, 0));
        // Top node is worthless to exercise
        assert!(!tree.is_exercised(&spec, 49, 49));

        let european = spec.with_exercise_style(lattice_core::ExerciseStyle::European);
        assert!(!tree.is_exercised(&european, 49, 0));
    }
}
