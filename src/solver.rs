use crate::error::MunkresError;
use crate::instance::ProblemInstance;
use crate::solution::{Assignment, Cost};
use tracing::{debug, trace};

/// State of the Kuhn-Munkres procedure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    /// instance constructed, nothing reduced yet
    Init,
    RowReduce,
    InitialStar,
    /// cover starred columns and test for a complete matching
    CoverCheck,
    /// prime uncovered zeros until an augmenting path starts
    FindZero,
    /// flip the alternating path found by `FindZero`
    Augment,
    /// shift dual potentials by the smallest uncovered reduced cost
    DualUpdate,
    Done,
}

/// Solver configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SolverOptions {
    /// find the maximum-cost matching instead of the minimum-cost one
    pub maximize: bool,
    /// ceiling on the number of state transitions, unlimited if `None`
    pub max_iterations: Option<u64>,
}

impl SolverOptions {
    pub fn maximize(mut self, maximize: bool) -> Self {
        self.maximize = maximize;
        self
    }

    pub fn max_iterations(mut self, max_iterations: Option<u64>) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Kuhn-Munkres state machine
///
/// Owns its `ProblemInstance` exclusively. Each call to `advance` performs exactly one transition
/// of the procedure:
///
/// `Init -> RowReduce -> InitialStar -> CoverCheck -> (FindZero -> (Augment -> CoverCheck | DualUpdate -> FindZero))* -> Done`
#[derive(Debug, Clone)]
pub struct MunkresSolver<C: Cost> {
    instance: ProblemInstance<C>,
    step: Step,
    max_iterations: Option<u64>,

    /// number of performed transitions
    pub nits: u64,
    pub naugmentations: u32,
    pub ndual_updates: u32,
    /// number of cells of the longest augmenting path
    pub longest_path: usize,
}

impl<C: Cost> MunkresSolver<C> {
    pub fn new(instance: ProblemInstance<C>, options: &SolverOptions) -> Self {
        MunkresSolver {
            instance,
            step: Step::Init,
            max_iterations: options.max_iterations,
            nits: 0,
            naugmentations: 0,
            ndual_updates: 0,
            longest_path: 0,
        }
    }

    #[inline]
    pub fn step(&self) -> Step {
        self.step
    }

    pub fn instance(&self) -> &ProblemInstance<C> {
        &self.instance
    }

    pub fn into_instance(self) -> ProblemInstance<C> {
        self.instance
    }

    /// Performs one transition and returns the new state
    pub fn advance(&mut self) -> Result<Step, MunkresError> {
        if self.step == Step::Done {
            return Ok(Step::Done);
        }
        if let Some(limit) = self.max_iterations {
            if self.nits >= limit {
                return Err(MunkresError::IterationLimitExceeded(limit));
            }
        }
        let next = match self.step {
            Step::Init => Step::RowReduce,
            Step::RowReduce => {
                self.instance.reduce_rows()?;
                Step::InitialStar
            }
            Step::InitialStar => {
                self.instance.star_initial_zeros();
                Step::CoverCheck
            }
            Step::CoverCheck => self.cover_check(),
            Step::FindZero => self.find_zero()?,
            Step::Augment => self.augment()?,
            Step::DualUpdate => self.dual_update()?,
            Step::Done => Step::Done,
        };
        self.nits += 1;
        trace!("{:?} -> {:?}", self.step, next);
        self.step = next;
        Ok(next)
    }

    /// Advances until `Done` and extracts the matching
    pub fn run(&mut self) -> Result<Assignment<C>, MunkresError> {
        while self.advance()? != Step::Done {}
        debug_assert!(self.instance.complementary_slackness_holds());
        debug!(
            "finished: nits {}, naugmentations {}, ndual_updates {}",
            self.nits, self.naugmentations, self.ndual_updates
        );
        self.assignment()
    }

    /// Matching of the finished run
    pub fn assignment(&self) -> Result<Assignment<C>, MunkresError> {
        if self.step != Step::Done {
            return Err(MunkresError::AlgorithmInvariantViolation(
                "assignment requested before the matching was complete",
            ));
        }
        let row_to_column = self.instance.starred_columns();
        let num_matched = row_to_column.iter().filter(|j| j.is_some()).count();
        if num_matched < self.instance.num_rows().min(self.instance.num_cols()) {
            return Err(MunkresError::AlgorithmInvariantViolation(
                "finished matching does not cover the smaller side",
            ));
        }
        let total_cost = self.instance.starred_cost()?;
        Ok(Assignment::from_row_to_column(
            row_to_column,
            self.instance.num_cols(),
            total_cost,
        ))
    }

    fn cover_check(&mut self) -> Step {
        let num_covered = self.instance.cover_starred_columns();
        trace!("covered columns: {}", num_covered);
        if num_covered >= self.instance.num_rows() || num_covered >= self.instance.num_cols() {
            Step::Done
        } else {
            Step::FindZero
        }
    }

    fn find_zero(&mut self) -> Result<Step, MunkresError> {
        while let Some((i, j)) = self.instance.find_uncovered_zero() {
            self.instance.prime(i, j);
            match self.instance.find_star_in_row(i) {
                Some(star_col) => {
                    self.instance.cover_row(i);
                    self.instance.uncover_col(star_col);
                }
                None => {
                    self.instance.path.clear();
                    self.instance.path.push(i, j)?;
                    return Ok(Step::Augment);
                }
            }
        }
        Ok(Step::DualUpdate)
    }

    fn augment(&mut self) -> Result<Step, MunkresError> {
        let (_, mut col) = self
            .instance
            .path
            .last()
            .ok_or(MunkresError::AlgorithmInvariantViolation(
                "augmentation started without a primed zero",
            ))?;
        while let Some(row) = self.instance.find_star_in_col(col) {
            self.instance.path.push(row, col)?;
            col = self.instance.find_prime_in_row(row).ok_or(
                MunkresError::AlgorithmInvariantViolation("starred row on the path has no prime"),
            )?;
            self.instance.path.push(row, col)?;
        }
        trace!("augmenting path: {:?}", self.instance.path.as_slice());
        self.longest_path = self.longest_path.max(self.instance.path.len());

        self.instance.augment_path();
        self.instance.clear_covers();
        self.instance.clear_primes();
        self.instance.path.clear();
        self.naugmentations += 1;
        Ok(Step::CoverCheck)
    }

    fn dual_update(&mut self) -> Result<Step, MunkresError> {
        let delta = self
            .instance
            .min_uncovered()
            .ok_or(MunkresError::AlgorithmInvariantViolation(
                "dual update found no uncovered cell",
            ))?;
        trace!("delta: {}", delta);
        self.instance.shift_potentials(delta)?;
        self.ndual_updates += 1;
        Ok(Step::FindZero)
    }
}
