use anyhow::Result;
use serde::Serialize;
use tracing::debug;

use crate::db::{ProblemDetail, Store};
use crate::entities::{actuators, dtc_codes, problems, sensors, symptoms};
use crate::search::keywords::KeywordSet;

#[derive(Debug, Clone, Serialize)]
pub struct SymptomHit {
    #[serde(flatten)]
    pub symptom: symptoms::Model,
    pub problem: Option<problems::Model>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DtcHit {
    #[serde(flatten)]
    pub dtc: dtc_codes::Model,
    pub problem: Option<problems::Model>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SensorHit {
    #[serde(flatten)]
    pub sensor: sensors::Model,
    pub problem: Option<problems::Model>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActuatorHit {
    #[serde(flatten)]
    pub actuator: actuators::Model,
    pub problem: Option<problems::Model>,
}

/// Grouped results of one federated search. Request-scoped; never cached.
#[derive(Debug, Clone, Serialize)]
pub struct SearchResultBundle {
    pub problems: Vec<ProblemDetail>,
    pub symptoms: Vec<SymptomHit>,
    pub dtc_codes: Vec<DtcHit>,
    pub sensors: Vec<SensorHit>,
    pub actuators: Vec<ActuatorHit>,
    pub has_results: bool,
}

/// Runs one keyword set against the five entity collections concurrently.
/// All-or-nothing: if any sub-query fails the whole search fails, rather
/// than returning a silently incomplete bundle.
pub struct FederatedSearch {
    store: Store,
    result_limit: u64,
}

impl FederatedSearch {
    #[must_use]
    pub const fn new(store: Store, result_limit: u64) -> Self {
        Self {
            store,
            result_limit,
        }
    }

    /// Precondition: `keywords` is non-empty. An empty set would OR over
    /// nothing and match nothing; callers reject empty queries before
    /// getting here.
    pub async fn execute(&self, keywords: &KeywordSet) -> Result<SearchResultBundle> {
        debug_assert!(!keywords.is_empty());

        let limit = self.result_limit;
        let problems_repo = self.store.problems();
        let lookups = self.store.lookups();

        let (problems, symptoms, dtc_codes, sensors, actuators) = tokio::try_join!(
            problems_repo.search_by_keywords(keywords, limit),
            lookups.symptoms_by_keywords(keywords, limit),
            lookups.dtc_codes_by_keywords(keywords, limit),
            lookups.sensors_by_keywords(keywords, limit),
            lookups.actuators_by_keywords(keywords, limit),
        )?;

        let bundle = SearchResultBundle {
            has_results: !problems.is_empty()
                || !symptoms.is_empty()
                || !dtc_codes.is_empty()
                || !sensors.is_empty()
                || !actuators.is_empty(),
            problems,
            symptoms: symptoms
                .into_iter()
                .map(|(symptom, problem)| SymptomHit { symptom, problem })
                .collect(),
            dtc_codes: dtc_codes
                .into_iter()
                .map(|(dtc, problem)| DtcHit { dtc, problem })
                .collect(),
            sensors: sensors
                .into_iter()
                .map(|(sensor, problem)| SensorHit { sensor, problem })
                .collect(),
            actuators: actuators
                .into_iter()
                .map(|(actuator, problem)| ActuatorHit { actuator, problem })
                .collect(),
        };

        debug!(
            problems = bundle.problems.len(),
            symptoms = bundle.symptoms.len(),
            dtc_codes = bundle.dtc_codes.len(),
            sensors = bundle.sensors.len(),
            actuators = bundle.actuators.len(),
            has_results = bundle.has_results,
            "federated search complete"
        );

        Ok(bundle)
    }
}
