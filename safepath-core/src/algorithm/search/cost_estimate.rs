use crate::model::network::MinRatios;
use crate::model::optimization::Optimization;
use crate::util::geo::straight_line_meters;
use geo::Coord;

/// conservative cost-per-meter fallback for the risk heuristic when the
/// graph produced no positive risk/length ratio. admissible only because
/// `risk_score` is normalized to [0, 1]; revisit if that normalization is
/// ever relaxed.
pub const RISK_FALLBACK_COST_PER_METER: f64 = 1e-4;

/// conservative cost-per-meter fallback for the incident heuristic, see
/// [`RISK_FALLBACK_COST_PER_METER`]. smaller because incident counts are
/// sparse integers rather than a dense score.
pub const INCIDENT_FALLBACK_COST_PER_METER: f64 = 1e-5;

/// the A* cost estimate: a data-driven admissible lower bound on the
/// remaining cost from a vertex to the search target.
///
/// for distance the straight line itself is the bound. for the other
/// optimizations the straight line is scaled by the smallest observed
/// cost-per-meter ratio, which cannot overestimate any real path.
pub struct CostEstimateFunction {
    target: Coord<f64>,
    optimization: Optimization,
    min_ratios: MinRatios,
}

impl CostEstimateFunction {
    pub fn new(
        target: Coord<f64>,
        optimization: Optimization,
        min_ratios: MinRatios,
    ) -> CostEstimateFunction {
        CostEstimateFunction {
            target,
            optimization,
            min_ratios,
        }
    }

    /// estimated remaining cost from `from` to the target
    pub fn estimate(&self, from: &Coord<f64>) -> f64 {
        let d = straight_line_meters(from, &self.target);
        match self.optimization {
            Optimization::Distance => d,
            Optimization::Combined => d * self.min_ratios.combined,
            Optimization::Risk => {
                if self.min_ratios.risk > 0.0 {
                    d * self.min_ratios.risk
                } else {
                    d * RISK_FALLBACK_COST_PER_METER
                }
            }
            Optimization::Incidents => {
                if self.min_ratios.incidents > 0.0 {
                    d * self.min_ratios.incidents
                } else {
                    d * INCIDENT_FALLBACK_COST_PER_METER
                }
            }
        }
    }
}
