use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::Schema;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        // Parent table first, children follow (FK order matters on sqlite).
        manager
            .create_table(
                schema
                    .create_table_from_entity(Problems)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Symptoms)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(DtcCodes)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Sensors)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Actuators)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Solutions)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(Tools)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(PartsFactors)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(TechnicalTheory)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(SafetyPrecautions)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(CostEstimation)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                schema
                    .create_table_from_entity(SearchQueries)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        use crate::entities::{
            actuators, cost_estimation, dtc_codes, parts_factors, problems, safety_precautions,
            search_queries, sensors, solutions, symptoms, technical_theory, tools,
        };

        manager
            .drop_table(Table::drop().table(search_queries::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(cost_estimation::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(safety_precautions::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(technical_theory::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(parts_factors::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(tools::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(solutions::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(actuators::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(sensors::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(dtc_codes::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(symptoms::Entity).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(problems::Entity).to_owned())
            .await?;

        Ok(())
    }
}
