/// One reading of the ranking endpoint. `rank` is kept as a normalized
/// string so `150` and `"150"` compare equal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankObservation {
    pub rank: String,
    pub quota: i64,
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Unchanged {
        rank: String,
    },
    Changed {
        observation: RankObservation,
        previous: Option<String>,
    },
}

impl Outcome {
    /// One-line summary for the end of the activity log.
    pub fn summary(&self) -> String {
        match self {
            Outcome::Unchanged { rank } => format!("Run complete: rank {} unchanged", rank),
            Outcome::Changed {
                observation,
                previous,
            } => format!(
                "Run complete: rank {} -> {} (quota {})",
                previous.as_deref().unwrap_or("-"),
                observation.rank,
                observation.quota
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_wording() {
        let same = Outcome::Unchanged { rank: "150".into() };
        assert_eq!(same.summary(), "Run complete: rank 150 unchanged");

        let first = Outcome::Changed {
            observation: RankObservation {
                rank: "150".into(),
                quota: 300,
            },
            previous: None,
        };
        assert_eq!(first.summary(), "Run complete: rank - -> 150 (quota 300)");
    }
}
