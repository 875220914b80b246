//! Comparative evaluation of several solvers over the same query.
//!
//! The evaluator exists to compare scoring formulas side by side: add
//! one solver per cost-function family, run them all, and read back a
//! labelled result table.

use crate::solver::{Solution, SolveError, Solver};

/// A labelled set of ranked results from one solver.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    /// Caller-supplied label, typically naming the cost family.
    pub label: String,
    /// The solver's ranked solutions.
    pub solutions: Vec<Solution>,
}

/// Runs a collection of solvers and collects their results.
///
/// # Examples
///
/// ```
/// use cskq_core::{Evaluator, Solution, SolveError, Solver};
///
/// struct Empty;
/// impl Solver for Empty {
///     fn solve(&self) -> Result<Vec<Solution>, SolveError> {
///         Ok(Vec::new())
///     }
/// }
///
/// let mut evaluator = Evaluator::new();
/// evaluator.add_solver("empty", Box::new(Empty));
/// let results = evaluator.run()?;
/// assert_eq!(results[0].label, "empty");
/// # Ok::<(), SolveError>(())
/// ```
#[derive(Default)]
pub struct Evaluator {
    solvers: Vec<(String, Box<dyn Solver>)>,
}

impl Evaluator {
    /// An evaluator with no solvers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a solver under a label.
    pub fn add_solver(&mut self, label: impl Into<String>, solver: Box<dyn Solver>) {
        self.solvers.push((label.into(), solver));
    }

    /// Number of registered solvers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.solvers.len()
    }

    /// Whether no solvers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.solvers.is_empty()
    }

    /// Run every solver in registration order.
    ///
    /// # Errors
    /// Stops at the first failing solver and propagates its
    /// [`SolveError`]; the run is all-or-nothing like the searches it
    /// wraps.
    pub fn run(&self) -> Result<Vec<EvaluationResult>, SolveError> {
        let mut results = Vec::with_capacity(self.solvers.len());
        for (label, solver) in &self.solvers {
            log::debug!("evaluating solver {label}");
            let solutions = solver.solve()?;
            results.push(EvaluationResult {
                label: label.clone(),
                solutions,
            });
        }
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::TaggedLocation;
    use rstest::rstest;

    struct FixedSolver(f64);

    impl Solver for FixedSolver {
        fn solve(&self) -> Result<Vec<Solution>, SolveError> {
            Ok(vec![Solution {
                cost: self.0,
                members: vec![TaggedLocation::new(0.0, 0.0, ["food"])],
            }])
        }
    }

    struct FailingSolver;

    impl Solver for FailingSolver {
        fn solve(&self) -> Result<Vec<Solution>, SolveError> {
            Err(SolveError::EmptyDataset)
        }
    }

    #[rstest]
    fn runs_solvers_in_registration_order() {
        let mut evaluator = Evaluator::new();
        evaluator.add_solver("first", Box::new(FixedSolver(1.0)));
        evaluator.add_solver("second", Box::new(FixedSolver(2.0)));
        let results = evaluator.run().expect("fixed solvers cannot fail");
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].label, "first");
        assert_eq!(results[0].solutions[0].cost, 1.0);
        assert_eq!(results[1].label, "second");
    }

    #[rstest]
    fn first_failure_aborts_the_run() {
        let mut evaluator = Evaluator::new();
        evaluator.add_solver("bad", Box::new(FailingSolver));
        evaluator.add_solver("good", Box::new(FixedSolver(1.0)));
        assert_eq!(evaluator.run(), Err(SolveError::EmptyDataset));
    }
}
