use std::time::{Duration, Instant};

#[derive(thiserror::Error, Debug)]
pub enum TerminationModelError {
    #[error("exceeded runtime limit of {0:?}")]
    RuntimeLimitReached(Duration),
}

/// the termination model for a query is evaluated at the top of each
/// iteration of a search's outer loop. the searches return no partial
/// result on termination; the error propagates to the caller.
#[derive(Clone, Debug, Default)]
pub enum TerminationModel {
    /// no externally imposed limit; the searches self-limit via their own
    /// depth, iteration, and incumbent bounds
    #[default]
    Unbounded,
    /// terminates a query if the runtime exceeds some limit. only checks at
    /// the provided iteration frequency, since reading the clock is not free
    QueryRuntimeLimit { limit: Duration, frequency: u64 },
}

impl TerminationModel {
    /// a per-query deadline measured from the moment the search starts.
    pub fn deadline(limit: Duration) -> TerminationModel {
        TerminationModel::QueryRuntimeLimit {
            limit,
            frequency: 100,
        }
    }

    /// tests whether a search should terminate at this iteration.
    pub fn test(&self, start_time: &Instant, iteration: u64) -> Result<(), TerminationModelError> {
        match self {
            TerminationModel::Unbounded => Ok(()),
            TerminationModel::QueryRuntimeLimit { limit, frequency } => {
                let frequency = (*frequency).max(1);
                if iteration % frequency == 0
                    && Instant::now().duration_since(*start_time) > *limit
                {
                    Err(TerminationModelError::RuntimeLimitReached(*limit))
                } else {
                    Ok(())
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unbounded_never_terminates() {
        let model = TerminationModel::Unbounded;
        let start = Instant::now();
        for i in 0..1000 {
            assert!(model.test(&start, i).is_ok());
        }
    }

    #[test]
    fn test_expired_deadline_terminates() {
        let model = TerminationModel::QueryRuntimeLimit {
            limit: Duration::ZERO,
            frequency: 1,
        };
        let start = Instant::now() - Duration::from_millis(10);
        assert!(model.test(&start, 0).is_err());
    }

    #[test]
    fn test_frequency_skips_off_iterations() {
        let model = TerminationModel::QueryRuntimeLimit {
            limit: Duration::ZERO,
            frequency: 100,
        };
        let start = Instant::now() - Duration::from_millis(10);
        assert!(model.test(&start, 1).is_ok());
        assert!(model.test(&start, 100).is_err());
    }
}
