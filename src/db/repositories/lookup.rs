use anyhow::Result;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect,
};

use crate::entities::{actuators, dtc_codes, prelude::*, problems, sensors, symptoms};
use crate::search::keywords::KeywordSet;

/// Keyword lookups over the four satellite collections. Each row comes back
/// with its parent problem so results can link into the detail view.
pub struct LookupRepository {
    conn: DatabaseConnection,
}

impl LookupRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn symptoms_by_keywords(
        &self,
        keywords: &KeywordSet,
        limit: u64,
    ) -> Result<Vec<(symptoms::Model, Option<problems::Model>)>> {
        let mut cond = Condition::any();
        for kw in keywords {
            cond = cond
                .add(symptoms::Column::SymptomDescription.contains(kw))
                .add(symptoms::Column::OccurrenceCondition.contains(kw));
        }

        Ok(Symptoms::find()
            .filter(cond)
            .limit(limit)
            .find_also_related(Problems)
            .all(&self.conn)
            .await?)
    }

    pub async fn dtc_codes_by_keywords(
        &self,
        keywords: &KeywordSet,
        limit: u64,
    ) -> Result<Vec<(dtc_codes::Model, Option<problems::Model>)>> {
        let mut cond = Condition::any();
        for kw in keywords {
            cond = cond
                .add(dtc_codes::Column::DtcCode.contains(kw))
                .add(dtc_codes::Column::DtcDescription.contains(kw));
        }

        Ok(DtcCodes::find()
            .filter(cond)
            .limit(limit)
            .find_also_related(Problems)
            .all(&self.conn)
            .await?)
    }

    pub async fn sensors_by_keywords(
        &self,
        keywords: &KeywordSet,
        limit: u64,
    ) -> Result<Vec<(sensors::Model, Option<problems::Model>)>> {
        let mut cond = Condition::any();
        for kw in keywords {
            cond = cond
                .add(sensors::Column::SensorName.contains(kw))
                .add(sensors::Column::FailureMode.contains(kw));
        }

        Ok(Sensors::find()
            .filter(cond)
            .limit(limit)
            .find_also_related(Problems)
            .all(&self.conn)
            .await?)
    }

    pub async fn actuators_by_keywords(
        &self,
        keywords: &KeywordSet,
        limit: u64,
    ) -> Result<Vec<(actuators::Model, Option<problems::Model>)>> {
        let mut cond = Condition::any();
        for kw in keywords {
            cond = cond
                .add(actuators::Column::ActuatorName.contains(kw))
                .add(actuators::Column::FailureSymptoms.contains(kw));
        }

        Ok(Actuators::find()
            .filter(cond)
            .limit(limit)
            .find_also_related(Problems)
            .all(&self.conn)
            .await?)
    }
}
