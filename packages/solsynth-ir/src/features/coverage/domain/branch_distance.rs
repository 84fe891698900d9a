//! Branch distance
//!
//! Korel-style distance of a relational condition from evaluating to the
//! wanted outcome, normalized to `d / (d + 1)`.

/// Stand-in for a normalized distance of exactly 1
///
/// Keeps `approach + distance` strictly below the next approach level.
pub const BRANCH_DISTANCE_TIE_BREAK: f64 = 0.999_999_999_999_99;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationalOperator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl RelationalOperator {
    /// First relational operator in a condition (`"a <= b"`, `"<="`)
    pub fn find(condition: &str) -> Option<Self> {
        const TOKENS: [(&str, RelationalOperator); 6] = [
            ("==", RelationalOperator::Eq),
            ("!=", RelationalOperator::Ne),
            ("<=", RelationalOperator::Le),
            (">=", RelationalOperator::Ge),
            ("<", RelationalOperator::Lt),
            (">", RelationalOperator::Gt),
        ];
        TOKENS
            .iter()
            .filter_map(|(token, op)| condition.find(token).map(|at| (at, *op)))
            .min_by_key(|(at, _)| *at)
            .map(|(_, op)| op)
    }

    pub fn negate(self) -> Self {
        match self {
            RelationalOperator::Eq => RelationalOperator::Ne,
            RelationalOperator::Ne => RelationalOperator::Eq,
            RelationalOperator::Lt => RelationalOperator::Ge,
            RelationalOperator::Le => RelationalOperator::Gt,
            RelationalOperator::Gt => RelationalOperator::Le,
            RelationalOperator::Ge => RelationalOperator::Lt,
        }
    }

    /// Raw distance of `left op right` from being true
    pub fn distance(self, left: f64, right: f64) -> f64 {
        let d = match self {
            RelationalOperator::Eq => (left - right).abs(),
            RelationalOperator::Ne => {
                if left != right {
                    0.0
                } else {
                    1.0
                }
            }
            RelationalOperator::Lt => {
                if left < right {
                    0.0
                } else {
                    left - right + 1.0
                }
            }
            RelationalOperator::Le => {
                if left <= right {
                    0.0
                } else {
                    left - right
                }
            }
            RelationalOperator::Gt => {
                if left > right {
                    0.0
                } else {
                    right - left + 1.0
                }
            }
            RelationalOperator::Ge => {
                if left >= right {
                    0.0
                } else {
                    right - left
                }
            }
        };
        d.max(0.0)
    }
}

/// `d / (d + 1)` with the tie-break applied
pub fn normalize(distance: f64) -> f64 {
    let normalized = if distance.is_finite() {
        distance / (distance + 1.0)
    } else {
        1.0
    };
    if normalized >= 1.0 {
        BRANCH_DISTANCE_TIE_BREAK
    } else {
        normalized
    }
}

/// Normalized distance of `left op right` from evaluating to `outcome`
///
/// Missing operator or operands give the maximal distance.
pub fn branch_distance(
    condition: Option<&str>,
    left: Option<f64>,
    right: Option<f64>,
    outcome: bool,
) -> f64 {
    let (Some(op), Some(left), Some(right)) = (condition.and_then(RelationalOperator::find), left, right) else {
        return normalize(f64::INFINITY);
    };
    let op = if outcome { op } else { op.negate() };
    normalize(op.distance(left, right))
}
