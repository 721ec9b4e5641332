pub mod gateway;

pub use gateway::{DiagnosticQuestion, GatewayClient, GatewayError, QuestionOption};
