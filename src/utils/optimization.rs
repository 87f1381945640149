//! Nelder-Mead simplex minimization for parameter estimation.

/// Standard simplex coefficients: reflection, expansion, contraction, shrink.
const ALPHA: f64 = 1.0;
const GAMMA: f64 = 2.0;
const RHO: f64 = 0.5;
const SIGMA: f64 = 0.5;

/// Options for the simplex search.
#[derive(Debug, Clone)]
pub struct SimplexOptions {
    /// Maximum number of iterations.
    pub max_iter: usize,
    /// Convergence tolerance on the objective spread across the simplex.
    pub tolerance: f64,
    /// Relative step used to seed the initial simplex.
    pub initial_step: f64,
}

impl Default for SimplexOptions {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            tolerance: 1e-8,
            initial_step: 0.05,
        }
    }
}

/// Result of a simplex minimization.
#[derive(Debug, Clone)]
pub struct SimplexResult {
    /// Best point found.
    pub point: Vec<f64>,
    /// Objective value at the best point.
    pub value: f64,
    /// Whether the objective spread fell below tolerance.
    pub converged: bool,
}

fn clamp_to_bounds(mut point: Vec<f64>, bounds: Option<&[(f64, f64)]>) -> Vec<f64> {
    if let Some(bounds) = bounds {
        for (x, &(lo, hi)) in point.iter_mut().zip(bounds) {
            *x = x.clamp(lo, hi);
        }
    }
    point
}

fn combine(centroid: &[f64], point: &[f64], coeff: f64) -> Vec<f64> {
    centroid
        .iter()
        .zip(point)
        .map(|(c, p)| c + coeff * (c - p))
        .collect()
}

/// Minimize `objective` starting from `initial`, optionally clamping every
/// trial point to per-dimension `bounds`.
pub fn minimize<F>(
    objective: F,
    initial: &[f64],
    bounds: Option<&[(f64, f64)]>,
    options: &SimplexOptions,
) -> SimplexResult
where
    F: Fn(&[f64]) -> f64,
{
    let n = initial.len();
    if n == 0 {
        return SimplexResult {
            point: vec![],
            value: f64::NAN,
            converged: false,
        };
    }

    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
    simplex.push(initial.to_vec());
    for i in 0..n {
        let mut vertex = initial.to_vec();
        let step = if initial[i].abs() > 1e-10 {
            options.initial_step * initial[i].abs()
        } else {
            options.initial_step
        };
        vertex[i] += step;
        simplex.push(clamp_to_bounds(vertex, bounds));
    }
    let mut values: Vec<f64> = simplex.iter().map(|v| objective(v)).collect();

    let mut converged = false;
    for _ in 0..options.max_iter {
        // Order vertices best-to-worst.
        let mut order: Vec<usize> = (0..=n).collect();
        order.sort_by(|&a, &b| {
            values[a]
                .partial_cmp(&values[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let best = order[0];
        let second_worst = order[n - 1];
        let worst = order[n];

        if values[worst] - values[best] < options.tolerance {
            converged = true;
            break;
        }

        // Centroid of all but the worst vertex.
        let mut centroid = vec![0.0; n];
        for (i, vertex) in simplex.iter().enumerate() {
            if i != worst {
                for (c, x) in centroid.iter_mut().zip(vertex) {
                    *c += x;
                }
            }
        }
        for c in &mut centroid {
            *c /= n as f64;
        }

        let reflected = clamp_to_bounds(combine(&centroid, &simplex[worst], ALPHA), bounds);
        let reflected_value = objective(&reflected);

        if reflected_value < values[best] {
            let expanded = clamp_to_bounds(combine(&centroid, &simplex[worst], GAMMA), bounds);
            let expanded_value = objective(&expanded);
            if expanded_value < reflected_value {
                simplex[worst] = expanded;
                values[worst] = expanded_value;
            } else {
                simplex[worst] = reflected;
                values[worst] = reflected_value;
            }
            continue;
        }

        if reflected_value < values[second_worst] {
            simplex[worst] = reflected;
            values[worst] = reflected_value;
            continue;
        }

        // Contract towards the better of the worst vertex and its reflection.
        let towards = if reflected_value < values[worst] {
            &reflected
        } else {
            &simplex[worst]
        };
        let contracted: Vec<f64> = centroid
            .iter()
            .zip(towards.iter())
            .map(|(c, p)| c + RHO * (p - c))
            .collect();
        let contracted = clamp_to_bounds(contracted, bounds);
        let contracted_value = objective(&contracted);
        if contracted_value < values[worst].min(reflected_value) {
            simplex[worst] = contracted;
            values[worst] = contracted_value;
            continue;
        }

        // Shrink everything towards the best vertex.
        let anchor = simplex[best].clone();
        for i in 0..=n {
            if i != best {
                for (x, a) in simplex[i].iter_mut().zip(&anchor) {
                    *x = a + SIGMA * (*x - a);
                }
                simplex[i] = clamp_to_bounds(simplex[i].clone(), bounds);
                values[i] = objective(&simplex[i]);
            }
        }
    }

    let best = values
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0);

    SimplexResult {
        point: simplex[best].clone(),
        value: values[best],
        converged,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn quadratic_2d() {
        let result = minimize(
            |x| (x[0] - 2.0).powi(2) + (x[1] - 3.0).powi(2),
            &[0.0, 0.0],
            None,
            &SimplexOptions::default(),
        );
        assert!(result.converged);
        assert_relative_eq!(result.point[0], 2.0, epsilon = 1e-3);
        assert_relative_eq!(result.point[1], 3.0, epsilon = 1e-3);
    }

    #[test]
    fn respects_bounds() {
        // Unconstrained optimum at 5; bound caps it at 3.
        let result = minimize(
            |x| (x[0] - 5.0).powi(2),
            &[1.0],
            Some(&[(0.0, 3.0)]),
            &SimplexOptions::default(),
        );
        assert_relative_eq!(result.point[0], 3.0, epsilon = 1e-3);
    }

    #[test]
    fn starts_at_optimum() {
        let result = minimize(
            |x| (x[0] - 2.0).powi(2),
            &[2.0],
            None,
            &SimplexOptions::default(),
        );
        assert!(result.converged);
        assert_relative_eq!(result.point[0], 2.0, epsilon = 1e-3);
    }

    #[test]
    fn empty_initial_does_not_converge() {
        let result = minimize(|_| 0.0, &[], None, &SimplexOptions::default());
        assert!(!result.converged);
        assert!(result.value.is_nan());
    }

    #[test]
    fn rosenbrock() {
        let options = SimplexOptions {
            max_iter: 5000,
            tolerance: 1e-12,
            ..Default::default()
        };
        let result = minimize(
            |x| (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0].powi(2)).powi(2),
            &[0.0, 0.0],
            None,
            &options,
        );
        assert_relative_eq!(result.point[0], 1.0, epsilon = 1e-2);
        assert_relative_eq!(result.point[1], 1.0, epsilon = 1e-2);
    }
}
