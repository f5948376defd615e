use serde::{Deserialize, Serialize};

/// Label for one sampled year. Labels are carried through to the output
/// series unchanged; they never influence the draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Year(pub u32);

/// How many years to sample, and how to label them.
///
/// `Count(n)` labels the years `Year(1)..=Year(n)`. `Labels` passes an
/// explicit list through (e.g. the calendar years a hazard set was run for)
/// and its length determines the number of sampled years.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetYears {
    Count(usize),
    Labels(Vec<Year>),
}

impl TargetYears {
    pub fn n_years(&self) -> usize {
        match self {
            TargetYears::Count(n) => *n,
            TargetYears::Labels(labels) => labels.len(),
        }
    }

    /// Materialize the year labels for the output series.
    pub fn labels(&self) -> Vec<Year> {
        match self {
            TargetYears::Count(n) => (1..=*n as u32).map(Year).collect(),
            TargetYears::Labels(labels) => labels.clone(),
        }
    }
}

impl From<usize> for TargetYears {
    fn from(n: usize) -> Self {
        TargetYears::Count(n)
    }
}

impl From<Vec<Year>> for TargetYears {
    fn from(labels: Vec<Year>) -> Self {
        TargetYears::Labels(labels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_labels_start_at_one() {
        let ty = TargetYears::Count(3);
        assert_eq!(ty.n_years(), 3);
        assert_eq!(ty.labels(), vec![Year(1), Year(2), Year(3)]);
    }

    #[test]
    fn explicit_labels_pass_through() {
        let ty = TargetYears::Labels(vec![Year(2000), Year(2004), Year(1998)]);
        assert_eq!(ty.n_years(), 3);
        assert_eq!(ty.labels(), vec![Year(2000), Year(2004), Year(1998)]);
    }

    #[test]
    fn year_serializes_as_bare_number() {
        assert_eq!(serde_json::to_string(&Year(2026)).unwrap(), "2026");
    }
}
