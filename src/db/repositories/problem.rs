use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use serde::Serialize;

use crate::entities::{
    actuators, cost_estimation, dtc_codes, parts_factors, prelude::*, problems,
    safety_precautions, sensors, solutions, symptoms, technical_theory, tools,
};
use crate::search::keywords::KeywordSet;

/// A problem with every child record the detail view renders.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemDetail {
    #[serde(flatten)]
    pub problem: problems::Model,
    pub symptoms: Vec<symptoms::Model>,
    pub solutions: Vec<SolutionDetail>,
    pub dtc_codes: Vec<dtc_codes::Model>,
    pub sensors: Vec<sensors::Model>,
    pub actuators: Vec<actuators::Model>,
    pub parts_factors: Vec<parts_factors::Model>,
    pub technical_theory: Vec<technical_theory::Model>,
    pub safety_precautions: Vec<safety_precautions::Model>,
    pub cost_estimation: Vec<cost_estimation::Model>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SolutionDetail {
    #[serde(flatten)]
    pub solution: solutions::Model,
    pub tools: Vec<tools::Model>,
}

#[derive(Debug, Clone)]
pub struct ProblemInput {
    pub problem_code: String,
    pub problem_name: String,
    pub description: Option<String>,
    pub severity_level: String,
    pub system_category: String,
}

pub struct ProblemRepository {
    conn: DatabaseConnection,
}

impl ProblemRepository {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Text fields participating in keyword matching; a fixed list, not
    /// introspected from the schema.
    fn keyword_condition(keywords: &KeywordSet) -> Condition {
        let mut cond = Condition::any();
        for kw in keywords {
            cond = cond
                .add(problems::Column::ProblemName.contains(kw))
                .add(problems::Column::Description.contains(kw))
                .add(problems::Column::ProblemCode.contains(kw));
        }
        cond
    }

    /// Problems matching any keyword in any designated field, capped at
    /// `limit`, each eager-loaded with all child tables.
    pub async fn search_by_keywords(
        &self,
        keywords: &KeywordSet,
        limit: u64,
    ) -> Result<Vec<ProblemDetail>> {
        let matches = Problems::find()
            .filter(Self::keyword_condition(keywords))
            .limit(limit)
            .all(&self.conn)
            .await?;

        self.load_details(matches).await
    }

    pub async fn get_detail(&self, problem_id: i32) -> Result<Option<ProblemDetail>> {
        let Some(problem) = Problems::find_by_id(problem_id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut details = self.load_details(vec![problem]).await?;
        Ok(details.pop())
    }

    pub async fn list(&self) -> Result<Vec<problems::Model>> {
        Ok(Problems::find()
            .order_by_asc(problems::Column::ProblemCode)
            .all(&self.conn)
            .await?)
    }

    pub async fn insert(&self, input: ProblemInput) -> Result<problems::Model> {
        let now = chrono::Utc::now().to_rfc3339();
        let model = problems::ActiveModel {
            problem_code: Set(input.problem_code),
            problem_name: Set(input.problem_name),
            description: Set(input.description),
            severity_level: Set(input.severity_level),
            system_category: Set(input.system_category),
            created_at: Set(now.clone()),
            updated_at: Set(now),
            ..Default::default()
        };

        Ok(model.insert(&self.conn).await?)
    }

    pub async fn update(&self, problem_id: i32, input: ProblemInput) -> Result<Option<problems::Model>> {
        let Some(existing) = Problems::find_by_id(problem_id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut model: problems::ActiveModel = existing.into();
        model.problem_code = Set(input.problem_code);
        model.problem_name = Set(input.problem_name);
        model.description = Set(input.description);
        model.severity_level = Set(input.severity_level);
        model.system_category = Set(input.system_category);
        model.updated_at = Set(chrono::Utc::now().to_rfc3339());

        Ok(Some(model.update(&self.conn).await?))
    }

    pub async fn delete(&self, problem_id: i32) -> Result<bool> {
        let result = Problems::delete_by_id(problem_id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    /// Batch-load all child tables for the given problems. One query per
    /// child table regardless of how many problems matched.
    async fn load_details(&self, problems: Vec<problems::Model>) -> Result<Vec<ProblemDetail>> {
        if problems.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = problems.iter().map(|p| p.problem_id).collect();

        let symptoms = Symptoms::find()
            .filter(symptoms::Column::ProblemId.is_in(ids.clone()))
            .all(&self.conn)
            .await?;
        let dtc_codes = DtcCodes::find()
            .filter(dtc_codes::Column::ProblemId.is_in(ids.clone()))
            .all(&self.conn)
            .await?;
        let sensors = Sensors::find()
            .filter(sensors::Column::ProblemId.is_in(ids.clone()))
            .all(&self.conn)
            .await?;
        let actuators = Actuators::find()
            .filter(actuators::Column::ProblemId.is_in(ids.clone()))
            .all(&self.conn)
            .await?;
        let solutions = Solutions::find()
            .filter(solutions::Column::ProblemId.is_in(ids.clone()))
            .order_by_asc(solutions::Column::StepOrder)
            .all(&self.conn)
            .await?;
        let parts = PartsFactors::find()
            .filter(parts_factors::Column::ProblemId.is_in(ids.clone()))
            .all(&self.conn)
            .await?;
        let theory = TechnicalTheory::find()
            .filter(technical_theory::Column::ProblemId.is_in(ids.clone()))
            .all(&self.conn)
            .await?;
        let safety = SafetyPrecautions::find()
            .filter(safety_precautions::Column::ProblemId.is_in(ids.clone()))
            .all(&self.conn)
            .await?;
        let costs = CostEstimation::find()
            .filter(cost_estimation::Column::ProblemId.is_in(ids.clone()))
            .all(&self.conn)
            .await?;

        let solution_ids: Vec<i32> = solutions.iter().map(|s| s.solution_id).collect();
        let tools = if solution_ids.is_empty() {
            Vec::new()
        } else {
            Tools::find()
                .filter(tools::Column::SolutionId.is_in(solution_ids))
                .all(&self.conn)
                .await?
        };

        let details = problems
            .into_iter()
            .map(|problem| {
                let id = problem.problem_id;
                let solution_details = solutions
                    .iter()
                    .filter(|s| s.problem_id == id)
                    .map(|s| SolutionDetail {
                        solution: s.clone(),
                        tools: tools
                            .iter()
                            .filter(|t| t.solution_id == s.solution_id)
                            .cloned()
                            .collect(),
                    })
                    .collect();

                ProblemDetail {
                    problem,
                    symptoms: symptoms.iter().filter(|m| m.problem_id == id).cloned().collect(),
                    solutions: solution_details,
                    dtc_codes: dtc_codes.iter().filter(|m| m.problem_id == id).cloned().collect(),
                    sensors: sensors.iter().filter(|m| m.problem_id == id).cloned().collect(),
                    actuators: actuators.iter().filter(|m| m.problem_id == id).cloned().collect(),
                    parts_factors: parts.iter().filter(|m| m.problem_id == id).cloned().collect(),
                    technical_theory: theory.iter().filter(|m| m.problem_id == id).cloned().collect(),
                    safety_precautions: safety
                        .iter()
                        .filter(|m| m.problem_id == id)
                        .cloned()
                        .collect(),
                    cost_estimation: costs.iter().filter(|m| m.problem_id == id).cloned().collect(),
                }
            })
            .collect();

        Ok(details)
    }
}
